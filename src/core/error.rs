//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`GitTrackerError`] which covers every failure mode of git-tracker,
//! from a missing tracked-repository list to a repository without any commits. It uses
//! `thiserror` for ergonomic error definitions and includes named constructors for the
//! common failure scenarios.
//!
//! # Public API
//! - [`GitTrackerError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, GitTrackerError>`
//!
//! # Error Categories
//! - **Setup**: empty tracked list, unusable output path, bad search root
//! - **Per repository**: missing directory, missing `.git`, no commit history
//! - **Tracked list**: duplicate additions, removing untracked paths
//! - **Interaction**: bug reports entered at a prompt, closed stdin

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for git-tracker
#[derive(Error, Debug)]
pub enum GitTrackerError {
    // Setup errors
    #[error("GitTracker isn't currently tracking any repositories (list file: {path})")]
    TrackedListEmpty { path: PathBuf },

    #[error("unable to write to {path}: {reason}")]
    InvalidOutputPath { path: PathBuf, reason: String },

    #[error("Could not find configuration directory")]
    ConfigDirectoryNotFound,

    #[error("cannot search under {path}: {reason}")]
    InvalidSearchRoot { path: PathBuf, reason: String },

    // Per-repository errors
    #[error("{path} has no commits yet (empty repositories are not supported)")]
    EmptyRepository { path: PathBuf },

    #[error("{path} does not appear to be a directory")]
    RepoNotFound { path: PathBuf },

    #[error("{path} does not appear to be a git repository (no .git directory found)")]
    NoGitdir { path: PathBuf },

    // Tracked list errors
    #[error("{path} is already tracked by GitTracker")]
    AlreadyTracked { path: PathBuf },

    #[error("{path} is not currently tracked by GitTracker")]
    NotTracked { path: PathBuf },

    #[error("No untracked repositories found under {path}")]
    NoRepositoriesFound { path: PathBuf },

    // Interaction errors
    #[error("Bug identified via user input while {context}")]
    BugIdentified { context: String },

    #[error("Input closed while waiting for a response")]
    InputClosed,

    #[error("Aborted")]
    Aborted,

    // Wrapped library errors
    #[error("Git repository error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to walk directory tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using GitTrackerError
pub type Result<T> = std::result::Result<T, GitTrackerError>;

impl GitTrackerError {
    pub fn tracked_list_empty(path: impl Into<PathBuf>) -> Self {
        Self::TrackedListEmpty { path: path.into() }
    }

    pub fn invalid_output_path(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidOutputPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_search_root(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidSearchRoot {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn empty_repository(path: impl Into<PathBuf>) -> Self {
        Self::EmptyRepository { path: path.into() }
    }

    pub fn repo_not_found(path: impl Into<PathBuf>) -> Self {
        Self::RepoNotFound { path: path.into() }
    }

    pub fn no_gitdir(path: impl Into<PathBuf>) -> Self {
        Self::NoGitdir { path: path.into() }
    }

    pub fn already_tracked(path: impl Into<PathBuf>) -> Self {
        Self::AlreadyTracked { path: path.into() }
    }

    pub fn not_tracked(path: impl Into<PathBuf>) -> Self {
        Self::NotTracked { path: path.into() }
    }

    pub fn no_repositories_found(path: impl Into<PathBuf>) -> Self {
        Self::NoRepositoriesFound { path: path.into() }
    }

    pub fn bug_identified(context: impl Into<String>) -> Self {
        Self::BugIdentified {
            context: context.into(),
        }
    }

    /// Whether the error points at a defect rather than at something the user can fix.
    ///
    /// Unexpected errors are written to the logfile before the process exits.
    pub fn is_unexpected(&self) -> bool {
        matches!(
            self,
            Self::BugIdentified { .. }
                | Self::Git(_)
                | Self::Io(_)
                | Self::Walk(_)
                | Self::Json(_)
                | Self::ConfigDirectoryNotFound
        )
    }
}
