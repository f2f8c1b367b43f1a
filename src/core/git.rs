//! Repository metadata queries over the external git binary.
//!
//! This module provides [`GitClient`], a thin parsing layer over [`GitRunner`]
//! that answers the four questions git-steward asks about a checkout: is it
//! clean, what branch is it on, where is its origin, and when was its last
//! commit. All of the fragile output-matching lives here so the parsing
//! contract is a single, testable seam.
//!
//! # Public API
//! - [`GitClient`]: Metadata adapter for a repository working directory
//!
//! # Parsing Contract
//! - **Clean tree**: `git status` output contains [`CLEAN_TREE_MARKER`]
//! - **Branch**: `git rev-parse --abbrev-ref HEAD`, returned trimmed verbatim
//! - **Origin**: `git config --get remote.origin.url`; any failure means the
//!   distinguished no-origin condition, not a generic fault
//! - **Commit time**: `git log -1 --format=%cd` in git's default date layout,
//!   parsed with [`GIT_TIME_FORMAT`]

use crate::core::error::{GitStewardError, Result};
use crate::core::process::GitRunner;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;

/// Literal phrase git prints when a working tree has no pending changes
pub const CLEAN_TREE_MARKER: &str = "working tree clean";

/// Layout of git's default committer date output, e.g. `Wed Sep 25 15:30:25 2019 +0200`
pub const GIT_TIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y %z";

/// Metadata adapter for repository working directories
pub struct GitClient {
    runner: Arc<GitRunner>,
}

impl GitClient {
    pub fn new(runner: Arc<GitRunner>) -> Self {
        Self { runner }
    }

    /// Whether the working tree at `cwd` has no uncommitted changes.
    ///
    /// Fails closed: an unreadable repository is never a refresh candidate, so
    /// any execution error reports as not clean.
    pub async fn is_clean(&self, cwd: &Path) -> bool {
        match self.runner.run_git(cwd, "status", &[]).await {
            Ok(out) => out.contains(CLEAN_TREE_MARKER),
            Err(err) => {
                log::debug!("treating '{}' as not clean: {err}", cwd.display());
                false
            }
        }
    }

    /// Abbreviated name of the currently checked-out branch/ref
    pub async fn current_branch(&self, cwd: &Path) -> Result<String> {
        self.runner
            .run_git(cwd, "rev-parse", &["--abbrev-ref", "HEAD"])
            .await
    }

    /// Configured `origin` remote URL.
    ///
    /// A failing lookup (typically: no such remote) is the distinguished
    /// [`GitStewardError::NoOrigin`] condition rather than a generic error.
    pub async fn remote_origin(&self, cwd: &Path) -> Result<String> {
        self.runner
            .run_git(cwd, "config", &["--get", "remote.origin.url"])
            .await
            .map_err(|err| {
                log::debug!("no origin for '{}': {err}", cwd.display());
                GitStewardError::NoOrigin
            })
    }

    /// Committer date of the most recent commit, as an absolute timestamp.
    ///
    /// A parse failure is a hard error for this repository's scan.
    pub async fn last_commit_time(&self, cwd: &Path) -> Result<DateTime<Utc>> {
        let raw = self
            .runner
            .run_git(cwd, "log", &["-1", "--format=%cd"])
            .await?;
        let parsed = DateTime::parse_from_str(&raw, GIT_TIME_FORMAT)
            .map_err(|e| GitStewardError::commit_time_parse(&raw, e))?;
        Ok(parsed.with_timezone(&Utc))
    }
}
