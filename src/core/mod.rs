//! Core functionality for the git-steward tool.
//!
//! This module provides the fundamental building blocks for throttled git
//! execution, repository metadata queries, per-repository state persistence,
//! configuration, and error handling.

pub mod config;
pub mod error;
pub mod git;
pub mod output;
pub mod process;
pub mod state;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{GitStewardError, Result};

// === Process execution ===
// Throttled gateway to the external git binary
pub use process::{GitRunner, DEFAULT_CONCURRENCY_LIMIT, GIT_BINARY};

// === Git metadata ===
// Clean/branch/origin/commit-time queries over a repository working directory
pub use git::{GitClient, CLEAN_TREE_MARKER, GIT_TIME_FORMAT};

// === State management ===
// Per-repository cached state and its sidecar file store
pub use state::{RepoState, STATE_FILE_SUFFIX};

// === Configuration ===
// Optional JSON config read once at startup
pub use config::{Conf, CONFIG_FILE_NAME};

// === Output formatting ===
// Unified output formatting for consistent CLI presentation
pub use output::{print_error, print_info, print_success};
