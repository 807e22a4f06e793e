//! Path normalization and validation for tracked repositories and output files.

use crate::core::error::{GitTrackerError, Result};
use std::path::{Path, PathBuf};

/// Normalize a user-supplied path.
///
/// Expands a leading `~` and `$VAR`/`${VAR}` references (unknown variables are left as
/// written), resolves relative paths against the current directory, and resolves symlinks
/// when the path exists.
pub fn clean_path(raw: impl AsRef<Path>) -> Result<PathBuf> {
    let raw = raw.as_ref().to_string_lossy();
    let expanded = shellexpand::full_with_context_no_errors(
        &*raw,
        || dirs::home_dir().map(|home| home.to_string_lossy().into_owned()),
        |var: &str| std::env::var(var).ok(),
    );

    let path = PathBuf::from(expanded.into_owned());
    let absolute = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()?.join(path)
    };

    match dunce::canonicalize(&absolute) {
        Ok(resolved) => Ok(resolved),
        Err(_) => Ok(absolute),
    }
}

/// Check that `path` is a directory holding a `.git` entry.
///
/// The `.git` entry may be a directory or a gitfile, so worktrees and submodule checkouts
/// are accepted.
pub fn validate_repo(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(GitTrackerError::repo_not_found(path));
    }
    if !path.join(".git").exists() {
        return Err(GitTrackerError::no_gitdir(path));
    }
    Ok(())
}

/// Normalize an output file path and check that its directory can be written to.
pub fn validate_writable_path(raw: impl AsRef<Path>) -> Result<PathBuf> {
    let path = clean_path(raw)?;
    let parent = match path.parent() {
        Some(parent) => parent.to_path_buf(),
        None => return Err(GitTrackerError::invalid_output_path(&path, "no parent directory")),
    };

    if !parent.is_dir() {
        let reason = format!("directory {} does not exist", parent.display());
        return Err(GitTrackerError::invalid_output_path(&path, reason));
    }

    let metadata = std::fs::metadata(&parent)?;
    if metadata.permissions().readonly() {
        let reason = format!("lacking write permission for parent directory: {}", parent.display());
        return Err(GitTrackerError::invalid_output_path(&path, reason));
    }

    Ok(path)
}
