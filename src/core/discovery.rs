//! Repository discovery under a top-level directory.
//!
//! The walk records every directory that holds a `.git` entry and never descends into one,
//! so nested repositories and submodules are left to their superproject. Hidden and ignored
//! directories are pruned before they are read.

use crate::core::{
    config::PermissionPolicy,
    error::{GitTrackerError, Result},
    paths::clean_path,
    tracked::TrackedRepos,
};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Pruning and error-handling rules for one search
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub search_hidden: bool,
    pub permission_policy: PermissionPolicy,
    ignore_names: Vec<String>,
    ignore_paths: Vec<PathBuf>,
}

impl SearchOptions {
    /// `ignore` entries match a directory by name or by full path
    pub fn new(search_hidden: bool, permission_policy: PermissionPolicy, ignore: &[String]) -> Result<Self> {
        let ignore_paths = ignore
            .iter()
            .filter(|entry| entry.contains(std::path::MAIN_SEPARATOR) || entry.starts_with('~'))
            .map(clean_path)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            search_hidden,
            permission_policy,
            ignore_names: ignore.to_vec(),
            ignore_paths,
        })
    }

    fn is_ignored(&self, path: &Path) -> bool {
        let name_matches = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .is_some_and(|name| self.ignore_names.iter().any(|ignored| *ignored == name));
        name_matches || self.ignore_paths.iter().any(|ignored| ignored == path)
    }

    fn is_pruned(&self, path: &Path) -> bool {
        (!self.search_hidden && is_hidden(path)) || self.is_ignored(path)
    }
}

/// What a search turned up
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Repositories not yet tracked, in walk order
    pub found: Vec<PathBuf>,
    /// Repositories skipped because they are already tracked
    pub already_tracked: Vec<PathBuf>,
    /// Directories that could not be read (only recorded under [`PermissionPolicy::Show`])
    pub permission_denied: Vec<PathBuf>,
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

fn is_repository(path: &Path) -> bool {
    path.join(".git").exists()
}

/// Reject search roots the walk would prune or that are tracked already.
pub fn validate_search_root(topdir: &Path, tracked: &TrackedRepos, options: &SearchOptions) -> Result<()> {
    let reason = if !topdir.is_dir() {
        "not a directory"
    } else if tracked.contains(topdir) {
        "it is already a tracked repository"
    } else if !options.search_hidden && is_hidden(topdir) {
        "hidden directories are excluded (pass --search-hidden to include them)"
    } else if options.is_ignored(topdir) {
        "it is listed in --ignore"
    } else {
        return Ok(());
    };
    Err(GitTrackerError::invalid_search_root(topdir, reason))
}

/// Walk `topdir` and collect the repositories underneath it.
pub fn find_repos(topdir: &Path, tracked: &TrackedRepos, options: &SearchOptions) -> Result<SearchOutcome> {
    validate_search_root(topdir, tracked, options)?;

    let mut outcome = SearchOutcome::default();
    let mut walker = WalkDir::new(topdir).sort_by_file_name().into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let denied = err
                    .io_error()
                    .is_some_and(|io| io.kind() == std::io::ErrorKind::PermissionDenied);
                if !denied {
                    log::warn!("skipping unreadable entry: {err}");
                    continue;
                }
                match options.permission_policy {
                    PermissionPolicy::Ignore => {}
                    PermissionPolicy::Show => {
                        if let Some(path) = err.path() {
                            outcome.permission_denied.push(path.to_path_buf());
                        }
                    }
                    PermissionPolicy::Raise => return Err(err.into()),
                }
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        if entry.depth() > 0 && options.is_pruned(path) {
            log::debug!("pruning {}", path.display());
            walker.skip_current_dir();
            continue;
        }

        if is_repository(path) {
            if tracked.contains(path) {
                log::debug!("already tracked: {}", path.display());
                outcome.already_tracked.push(path.to_path_buf());
            } else {
                log::debug!("found repository: {}", path.display());
                outcome.found.push(path.to_path_buf());
            }
            walker.skip_current_dir();
        }
    }

    Ok(outcome)
}
