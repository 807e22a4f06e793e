use crate::core::{
    dirs::AppPaths,
    error::{GitTrackerError, Result},
    output::{print_alert, print_info},
    paths::{clean_path, validate_repo},
    prompt::Prompter,
    status::repo_name,
    tracked::TrackedRepos,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Start tracking each of `raw_paths`.
///
/// Paths that are not git repositories are only added after confirmation (or with `yes`).
/// Returns the number of repositories added.
pub fn execute_add<R: BufRead, W: Write>(
    paths: &AppPaths,
    raw_paths: &[PathBuf],
    yes: bool,
    prompter: &mut Prompter<R, W>,
) -> Result<usize> {
    let mut tracked = TrackedRepos::load(&paths.tracked_file)?;
    let mut added = 0;

    for raw in raw_paths {
        let path = clean_path(raw)?;

        if let Err(e) = validate_repo(&path) {
            let question = match e {
                GitTrackerError::RepoNotFound { .. } => {
                    format!("{} does not appear to be a directory. Add it anyway?", path.display())
                }
                GitTrackerError::NoGitdir { .. } => format!(
                    "{} does not appear to be a git repository. Add it anyway?",
                    path.display()
                ),
                other => return Err(other),
            };
            if !yes && !prompter.confirm(&question, Some(false), false)? {
                continue;
            }
        }

        match tracked.add(path.clone()) {
            Ok(()) => {
                added += 1;
                print_info(&format!("repository '{}' stored for tracking", repo_name(&path)));
            }
            Err(e @ GitTrackerError::AlreadyTracked { .. }) => print_alert(&e.to_string()),
            Err(e) => return Err(e),
        }
    }

    if added > 0 {
        tracked.save()?;
    }
    Ok(added)
}
