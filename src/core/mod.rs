//! Core functionality for the git-tracker tool.
//!
//! This module provides the building blocks the subcommands are assembled from: status
//! collection and rendering, the tracked-repository list, discovery, prompts, configuration
//! and error handling.

pub mod change_type;
pub mod collector;
pub mod colors;
pub mod config;
pub mod dirs;
pub mod discovery;
pub mod error;
pub mod error_log;
pub mod git;
pub mod output;
pub mod paths;
pub mod prompt;
pub mod report;
pub mod status;
pub mod tracked;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{GitTrackerError, Result};

// === Git operations ===
// Repository access used by the status collector
pub use git::{GitRepo, SubmoduleCheckout};

// === Status model ===
// Per-repository status records and the collector that builds them
pub use change_type::ChangeType;
pub use collector::collect_status;
pub use status::{
    ChangeCounts, DetachedHead, FileLists, HeadState, RepoStatus, StagedFile, SubmoduleStatus,
    TrackingState, UnstagedFile, Verbosity,
};

// === Rendering ===
// Report tree, renderer and output sinks
pub use colors::{strip_ansi_codes, Painter, Style};
pub use report::{Line, Renderer, Report, RepoBlock, Sink};

// === Tracked repositories ===
// Persisted list, discovery and path handling
pub use discovery::{find_repos, SearchOptions, SearchOutcome};
pub use paths::{clean_path, validate_repo, validate_writable_path};
pub use tracked::TrackedRepos;

// === Configuration ===
pub use config::{ErrorPolicy, PermissionPolicy, TrackerConfig};
pub use dirs::AppPaths;

// === Interaction and output ===
pub use output::{print_alert, print_error, print_error_with_hint, print_info, print_success, print_warning};
pub use prompt::Prompter;
