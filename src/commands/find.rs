use crate::core::{
    config::PermissionPolicy,
    discovery::{find_repos, SearchOptions},
    dirs::AppPaths,
    error::{GitTrackerError, Result},
    output::{print_alert, print_info, print_success},
    paths::clean_path,
    prompt::Prompter,
    tracked::TrackedRepos,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FindOptions {
    pub topdir: PathBuf,
    pub ignore: Vec<String>,
    pub search_hidden: bool,
    pub permission_errors: PermissionPolicy,
    pub quiet: bool,
    pub yes: bool,
}

/// Search `options.topdir` for untracked repositories and offer to track them.
///
/// Returns the number of repositories added to the tracked list.
pub fn execute_find<R: BufRead, W: Write>(
    paths: &AppPaths,
    options: &FindOptions,
    prompter: &mut Prompter<R, W>,
) -> Result<usize> {
    let topdir = clean_path(&options.topdir)?;
    let mut tracked = TrackedRepos::load(&paths.tracked_file)?;

    let policy = if options.quiet {
        PermissionPolicy::Ignore
    } else {
        options.permission_errors
    };
    let search = SearchOptions::new(options.search_hidden, policy, &options.ignore)?;
    let outcome = find_repos(&topdir, &tracked, &search)?;

    if !options.quiet {
        for denied in &outcome.permission_denied {
            print_alert(&format!("permission denied for {}", denied.display()));
        }
        for skipped in &outcome.already_tracked {
            print_info(&format!("skipping {} (already tracked)", skipped.display()));
        }
    }

    if outcome.found.is_empty() {
        return Err(GitTrackerError::no_repositories_found(topdir));
    }

    if !options.quiet {
        print_info(&format!("found {} untracked repositories:", outcome.found.len()));
        for repo in &outcome.found {
            print_info(&format!("\t{}", repo.display()));
        }
    }

    if !options.yes
        && !prompter.confirm(
            "Do you want GitTracker to track these repositories?",
            Some(true),
            false,
        )?
    {
        print_info("no repositories added");
        return Ok(0);
    }

    let added = tracked.extend(outcome.found);
    tracked.save()?;
    print_success(&format!("now tracking {added} more repositories"));
    Ok(added)
}
