//! Per-repository status records.
//!
//! A [`RepoStatus`] is built fresh for every run from live repository state and thrown away
//! after rendering. Its HEAD part is a [`HeadState`]: either tracking a branch or detached,
//! never both. Submodules are a tagged union ([`SubmoduleStatus`]) so that a submodule that
//! cannot be inspected normally is never mistaken for a clean repository.
//!
//! # Public API
//! - [`Verbosity`]: Requested level of detail (1 = minimal, 2 = moderate, 3 = full)
//! - [`RepoStatus`]: Status record for one repository
//! - [`HeadState`], [`TrackingState`], [`DetachedHead`]: HEAD classification
//! - [`ChangeCounts`], [`FileLists`], [`StagedFile`], [`UnstagedFile`]: Uncommitted changes
//! - [`SubmoduleStatus`]: Outcome of inspecting a submodule

use crate::core::change_type::ChangeType;
use std::path::{Path, PathBuf};

/// Requested level of detail for collection and rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Minimal = 1,
    Moderate = 2,
    Full = 3,
}

impl Verbosity {
    /// Map a numeric level onto a verbosity, clamping into `1..=3`.
    pub fn from_level(level: u8) -> Self {
        match level {
            0 | 1 => Verbosity::Minimal,
            2 => Verbosity::Moderate,
            _ => Verbosity::Full,
        }
    }

    pub fn level(&self) -> u8 {
        *self as u8
    }
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity::Moderate
    }
}

/// Branch tracking information for a repository with an attached HEAD.
///
/// `ahead` and `behind` are `None` exactly when `remote_branch` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingState {
    pub local_branch: String,
    pub remote_branch: Option<String>,
    pub ahead: Option<usize>,
    pub behind: Option<usize>,
}

impl TrackingState {
    /// A branch without an upstream
    pub fn untracked(local_branch: impl Into<String>) -> Self {
        Self {
            local_branch: local_branch.into(),
            remote_branch: None,
            ahead: None,
            behind: None,
        }
    }

    /// A branch tracking `remote_branch`
    pub fn with_remote(
        local_branch: impl Into<String>,
        remote_branch: impl Into<String>,
        ahead: usize,
        behind: usize,
    ) -> Self {
        Self {
            local_branch: local_branch.into(),
            remote_branch: Some(remote_branch.into()),
            ahead: Some(ahead),
            behind: Some(behind),
        }
    }

    /// Remote branch name, or the empty string when the branch has no upstream
    pub fn remote_name(&self) -> &str {
        self.remote_branch.as_deref().unwrap_or("")
    }

    /// True when there is no upstream or the branch is even with it
    pub fn is_in_sync(&self) -> bool {
        match (self.ahead, self.behind) {
            (Some(ahead), Some(behind)) => ahead == 0 && behind == 0,
            _ => true,
        }
    }
}

/// Detached HEAD details.
///
/// `ref_sha` and `detached_commits` are `None` when the commit HEAD was detached at is the
/// current commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachedHead {
    pub hexsha: String,
    pub from_branch: String,
    pub ref_sha: Option<String>,
    pub detached_commits: Option<usize>,
}

impl DetachedHead {
    /// Commits made since detaching, zero when nothing was committed
    pub fn new_commits(&self) -> usize {
        self.detached_commits.unwrap_or(0)
    }
}

/// HEAD classification of a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadState {
    Tracking(TrackingState),
    Detached(DetachedHead),
}

impl HeadState {
    pub fn is_detached(&self) -> bool {
        matches!(self, HeadState::Detached(_))
    }
}

/// Number of uncommitted changes, by area
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeCounts {
    pub staged: usize,
    pub not_staged: usize,
    pub untracked: usize,
}

impl ChangeCounts {
    pub fn total(&self) -> usize {
        self.staged + self.not_staged + self.untracked
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// A change recorded between the HEAD commit and the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub change: ChangeType,
    pub old_path: PathBuf,
    pub new_path: PathBuf,
}

/// A change recorded between the index and the working tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnstagedFile {
    pub change: ChangeType,
    pub path: PathBuf,
}

/// Itemized uncommitted changes, only collected at [`Verbosity::Full`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileLists {
    pub staged: Vec<StagedFile>,
    pub not_staged: Vec<UnstagedFile>,
    pub untracked: Vec<PathBuf>,
}

/// Outcome of inspecting a submodule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmoduleStatus {
    /// The submodule could be opened and inspected like any repository
    Status(Box<RepoStatus>),
    /// The submodule's HEAD is detached at the given short hash, which may or may not be the
    /// commit the superproject records for it
    Detached { hexsha: String, at_recorded_commit: bool },
    /// The submodule directory is an uninitialized stub
    NotInitialized,
}

impl SubmoduleStatus {
    /// A detached submodule is clean only at the commit its superproject records; an
    /// uninitialized one has nothing to report.
    pub fn is_clean(&self) -> bool {
        match self {
            SubmoduleStatus::Status(status) => status.is_clean(),
            SubmoduleStatus::Detached {
                at_recorded_commit, ..
            } => *at_recorded_commit,
            SubmoduleStatus::NotInitialized => true,
        }
    }
}

/// Status record for one tracked repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoStatus {
    pub path: PathBuf,
    pub head: HeadState,
    pub changes: ChangeCounts,
    pub files: Option<FileLists>,
    pub submodules: Option<Vec<(PathBuf, SubmoduleStatus)>>,
}

impl RepoStatus {
    pub fn new(path: impl Into<PathBuf>, head: HeadState, changes: ChangeCounts) -> Self {
        Self {
            path: path.into(),
            head,
            changes,
            files: None,
            submodules: None,
        }
    }

    /// Directory name used as the repository's display name
    pub fn name(&self) -> String {
        repo_name(&self.path)
    }

    pub fn is_detached(&self) -> bool {
        self.head.is_detached()
    }

    /// A repository is clean when HEAD is attached and in sync with its upstream (if any),
    /// nothing is staged, modified or untracked, and every inspected submodule is clean.
    pub fn is_clean(&self) -> bool {
        let head_clean = match &self.head {
            HeadState::Tracking(tracking) => tracking.is_in_sync(),
            HeadState::Detached(_) => false,
        };

        let submodules_clean = self
            .submodules
            .as_ref()
            .map_or(true, |subs| subs.iter().all(|(_, sub)| sub.is_clean()));

        head_clean && self.changes.is_empty() && submodules_clean
    }
}

/// Last component of a repository path, falling back to the full path
pub fn repo_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
