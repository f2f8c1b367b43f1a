//! Git Steward - fleet housekeeping for large collections of git checkouts.
//!
//! This library provides the core functionality for git-steward: discovering
//! git repositories one level below a root directory, caching lightweight
//! metadata (origin, branch, last commit time) in a JSON sidecar file beside
//! each repository, and refreshing stale sidecars on a 24-hour schedule while
//! bounding the number of concurrent git invocations.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which
//! provides:
//! - Throttled execution of the external git binary
//! - Repository metadata queries (clean, branch, origin, last commit)
//! - Per-repository state persistence
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    // Configuration
    Conf,
    // Git metadata
    GitClient,
    // Process execution
    GitRunner,
    // Error handling
    GitStewardError,
    // State management
    RepoState,
    Result,

    // Output formatting
    print_error,
    print_info,
    print_success,
};
