//! GitTracker - keep track of all your local git repositories with a single command.
//!
//! This library provides the core functionality behind the `gittracker` binary: collecting
//! the status of every tracked repository, rendering it as one report, and maintaining the
//! list of tracked repositories.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - Status collection ([`collect_status`]) and the [`RepoStatus`] model
//! - Report rendering ([`Renderer`], [`Report`], [`Sink`])
//! - The tracked-repository list ([`TrackedRepos`]) and discovery ([`find_repos`])
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    collect_status,
    find_repos,
    // Configuration
    AppPaths,
    ChangeCounts,
    // Error handling
    GitTrackerError,
    // Git operations
    GitRepo,
    HeadState,
    Painter,
    // Rendering
    Renderer,
    Report,
    // Status model
    RepoStatus,
    Result,
    Sink,
    SubmoduleStatus,
    TrackedRepos,
    TrackerConfig,
    Verbosity,
};
