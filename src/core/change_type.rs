//! Type-safe change types for itemized file lists.
//!
//! [`ChangeType`] replaces git's one-letter delta codes with a proper enumeration. It keeps
//! the original letter available for logging and maps every variant to the keyword shown in
//! full-verbosity reports.
//!
//! # Key Features
//! - **git2 integration**: Direct conversion from [`git2::Delta`]
//! - **Display formatting**: Status letter via `Display`, report keyword via [`ChangeType::keyword`]

use std::fmt;

/// Kind of change recorded for a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeType {
    /// New file (A)
    Added,
    /// Modified file (M)
    Modified,
    /// Deleted file (D)
    Deleted,
    /// Renamed file (R)
    Renamed,
    /// Copied file (C)
    Copied,
    /// Type changed (T)
    TypeChanged,
}

impl ChangeType {
    /// Convert a git2 delta into a change type.
    ///
    /// Deltas that do not describe a change between two trees (untracked, ignored,
    /// unreadable, conflicted, unmodified) return `None`.
    pub fn from_delta(delta: git2::Delta) -> Option<Self> {
        match delta {
            git2::Delta::Added => Some(ChangeType::Added),
            git2::Delta::Modified => Some(ChangeType::Modified),
            git2::Delta::Deleted => Some(ChangeType::Deleted),
            git2::Delta::Renamed => Some(ChangeType::Renamed),
            git2::Delta::Copied => Some(ChangeType::Copied),
            git2::Delta::Typechange => Some(ChangeType::TypeChanged),
            git2::Delta::Unmodified
            | git2::Delta::Ignored
            | git2::Delta::Untracked
            | git2::Delta::Unreadable
            | git2::Delta::Conflicted => None,
        }
    }

    /// git's single-letter code for the change
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Added => "A",
            ChangeType::Modified => "M",
            ChangeType::Deleted => "D",
            ChangeType::Renamed => "R",
            ChangeType::Copied => "C",
            ChangeType::TypeChanged => "T",
        }
    }

    /// Keyword used in itemized file lists
    pub fn keyword(&self) -> &'static str {
        match self {
            ChangeType::Added => "new file",
            ChangeType::Modified => "modified",
            ChangeType::Deleted => "deleted",
            ChangeType::Renamed => "renamed",
            ChangeType::Copied => "copied",
            ChangeType::TypeChanged => "typechange",
        }
    }

    /// Whether the change carries a distinct old and new path
    pub fn has_source_path(&self) -> bool {
        matches!(self, ChangeType::Renamed | ChangeType::Copied)
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
