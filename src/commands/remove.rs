use crate::core::{
    dirs::AppPaths,
    error::{GitTrackerError, Result},
    output::print_info,
    paths::clean_path,
    prompt::Prompter,
    status::repo_name,
    tracked::TrackedRepos,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Stop tracking each of `raw_paths`; the list is rewritten once at the end.
///
/// Every path must be tracked, otherwise nothing is removed. Returns the number of
/// repositories removed.
pub fn execute_remove<R: BufRead, W: Write>(
    paths: &AppPaths,
    raw_paths: &[PathBuf],
    yes: bool,
    prompter: &mut Prompter<R, W>,
) -> Result<usize> {
    let mut tracked = TrackedRepos::load(&paths.tracked_file)?;

    let targets = raw_paths.iter().map(clean_path).collect::<Result<Vec<_>>>()?;
    if let Some(untracked) = targets.iter().find(|target| !tracked.contains(target)) {
        return Err(GitTrackerError::not_tracked(untracked));
    }

    let mut removed = 0;
    for target in &targets {
        if !tracked.contains(target) {
            // listed twice on the command line
            continue;
        }
        let question = format!("Stop tracking {}?", target.display());
        if !yes && !prompter.confirm(&question, Some(false), false)? {
            continue;
        }
        tracked.remove(target)?;
        removed += 1;
        print_info(&format!("stopped tracking '{}'", repo_name(target)));
    }

    if removed > 0 {
        tracked.save()?;
    }
    Ok(removed)
}
