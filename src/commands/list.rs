use crate::core::{
    colors::{Painter, Style},
    dirs::AppPaths,
    error::Result,
    status::repo_name,
    tracked::TrackedRepos,
};

/// "tracking N repositories:" followed by one tab-indented entry per repository
pub fn format_list(tracked: &TrackedRepos, quiet: bool, painter: Painter) -> String {
    let header = painter.paint(
        format!("tracking {} repositories:", tracked.len()),
        &[Style::Green],
    );

    let entries = tracked.repos().iter().map(|repo| {
        if quiet {
            format!("\t{}", repo_name(repo))
        } else {
            format!("\t{}", repo.display())
        }
    });

    std::iter::once(header)
        .chain(entries)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn execute_list(paths: &AppPaths, quiet: bool) -> Result<()> {
    let tracked = TrackedRepos::load_required(&paths.tracked_file)?;
    let painter = Painter::new(colored::control::SHOULD_COLORIZE.should_colorize());
    println!("{}", format_list(&tracked, quiet, painter));
    Ok(())
}
