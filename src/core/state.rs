//! Per-repository cached state and its sidecar file store.
//!
//! This module defines [`RepoState`], the single persisted entity of
//! git-steward. Each tracked repository gets one JSON sidecar file stored
//! beside it (not inside it), named by a pure function of the repository path,
//! so repository and sidecar always travel together and no global index is
//! needed.
//!
//! # Public API
//! - [`RepoState`]: Cached repository metadata with lifecycle timestamps
//!
//! # Persistence Strategy
//! - **JSON serialization**: Human-readable sidecar files for debugging
//! - **Tolerant decoding**: Partial JSON decodes against struct defaults, so
//!   older or newer sidecars never fail to load
//! - **Path-based identity**: Uniqueness is enforced by the filesystem, one
//!   sidecar per repository path

use crate::core::error::{GitStewardError, Result};
use crate::core::git::GitClient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Fixed marker in every sidecar file name
pub const STATE_FILE_SUFFIX: &str = "git-steward.state";

/// Cached metadata for one tracked repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RepoState {
    /// Absolute path of the root the scan was run from (provenance, not identity)
    pub manager_path: PathBuf,
    /// Path of the repository this state describes; the identity key
    pub repo_path: PathBuf,
    /// Configured origin URL at last refresh
    pub remote_origin: String,
    /// Current branch name at last refresh
    pub branch: String,
    /// Committer date of the most recent commit at last refresh
    pub last_commit_time: DateTime<Utc>,
    /// Set once, at first creation of this state
    pub created_at: DateTime<Utc>,
    /// Stamped on every persist
    pub updated_at: DateTime<Utc>,
    /// Reserved for the archival lifecycle, always false here
    pub is_compressed: bool,
    /// Reserved for the archival lifecycle, always false here
    pub is_purged: bool,
}

impl Default for RepoState {
    fn default() -> Self {
        Self {
            manager_path: PathBuf::new(),
            repo_path: PathBuf::new(),
            remote_origin: String::new(),
            branch: String::new(),
            last_commit_time: DateTime::UNIX_EPOCH,
            created_at: DateTime::UNIX_EPOCH,
            updated_at: DateTime::UNIX_EPOCH,
            is_compressed: false,
            is_purged: false,
        }
    }
}

impl RepoState {
    pub fn new(repo_path: impl Into<PathBuf>, manager_path: impl Into<PathBuf>) -> Self {
        Self {
            manager_path: manager_path.into(),
            repo_path: repo_path.into(),
            created_at: Utc::now(),
            ..Self::default()
        }
    }

    /// Sidecar file path for a repository: `<parent>/.<basename>.git-steward.state.json`.
    ///
    /// Pure function of the repository path; no filesystem access.
    pub fn sidecar_path(repo_path: &Path) -> PathBuf {
        let base = repo_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parent = repo_path.parent().unwrap_or_else(|| Path::new("."));
        parent.join(format!(".{base}.{STATE_FILE_SUFFIX}.json"))
    }

    /// Load the sidecar for `repo_path`, if one exists.
    ///
    /// A missing file is plainly absent; malformed content is logged and also
    /// treated as absent, so the caller re-creates the state from scratch.
    pub fn read(repo_path: &Path) -> Option<Self> {
        let path = Self::sidecar_path(repo_path);
        let content = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(state) => Some(state),
            Err(err) => {
                log::warn!("Ignoring malformed state file '{}': {err}", path.display());
                None
            }
        }
    }

    /// Load the existing state for `repo_path`, or build, refresh, and persist
    /// a fresh one.
    ///
    /// The no-origin condition propagates without persisting: a state with no
    /// resolvable origin is never written to disk.
    pub async fn get_or_create(
        git: &GitClient,
        repo_path: &Path,
        manager_path: &Path,
    ) -> Result<Self> {
        if let Some(state) = Self::read(repo_path) {
            return Ok(state);
        }

        let mut state = Self::new(repo_path, manager_path);
        state.refresh_from_git(git).await?;
        state.persist()?;
        Ok(state)
    }

    /// Re-query branch, origin, and last commit time for this repository.
    ///
    /// The three queries run in a fixed sequence within one repository; only
    /// different repositories overlap through the runner's throttle.
    pub async fn refresh_from_git(&mut self, git: &GitClient) -> Result<()> {
        let cwd = self.repo_path.clone();
        self.branch = git.current_branch(&cwd).await?;
        self.remote_origin = git.remote_origin(&cwd).await?;
        self.last_commit_time = git.last_commit_time(&cwd).await?;
        Ok(())
    }

    /// Stamp `updated_at` and write the full entity to its sidecar path
    pub fn persist(&mut self) -> Result<()> {
        self.updated_at = Utc::now();
        let path = Self::sidecar_path(&self.repo_path);
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content).map_err(|e| GitStewardError::state_write(&path, e))?;
        log::debug!("persisted state for '{}'", self.repo_path.display());
        Ok(())
    }

    /// Whether the cached copy is old enough to warrant a refresh (once a day)
    pub fn is_stale(&self) -> bool {
        Utc::now() - self.updated_at > chrono::Duration::hours(24)
    }
}
