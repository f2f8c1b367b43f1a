//! The scan command: discover, track, and refresh repositories under the root.
//!
//! One scan enumerates the immediate children of the configured root (one
//! directory level, non-recursive), runs the per-directory state machine for
//! every child concurrently, and joins the results. Failures never stop
//! sibling directories; they are collected under a lock and surfaced as one
//! aggregate error at the end of the run.

use crate::core::config::Conf;
use crate::core::error::{GitStewardError, Result};
use crate::core::git::GitClient;
use crate::core::process::GitRunner;
use crate::core::state::RepoState;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinSet;

/// Program name used for self-exclusion during the scan
const SELF_NAME: &str = env!("CARGO_PKG_NAME");

/// Counts reported after a successful scan
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// Repositories with a live sidecar after this run
    pub tracked: usize,
    /// Subset of tracked repositories whose metadata was re-queried
    pub refreshed: usize,
    /// Children skipped by the state machine (non-repos, dirty trees, no origin)
    pub skipped: usize,
}

/// What the per-directory state machine decided for one child
enum Outcome {
    Skipped,
    Tracked { refreshed: bool },
}

/// Scan the immediate children of `conf.path` concurrently.
///
/// Each child gets its own unit of concurrency; within a unit every git
/// invocation still passes through the runner's permit pool. Per-directory
/// failures are tagged with the child's name and joined into a single
/// [`GitStewardError::ScanFailed`] after the join barrier.
pub async fn execute_scan(conf: &Conf) -> Result<ScanSummary> {
    let manager_path = std::env::current_dir()?;
    let runner = Arc::new(GitRunner::new(conf.concurrency));
    let git = Arc::new(GitClient::new(runner));

    let entries = std::fs::read_dir(&conf.path)?;

    let failures: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let mut units = JoinSet::new();

    for entry in entries {
        let entry = entry?;
        let is_dir = entry.file_type()?.is_dir();
        let name = entry.file_name().to_string_lossy().into_owned();
        let path = conf.path.join(entry.file_name());

        let git = Arc::clone(&git);
        let failures = Arc::clone(&failures);
        let manager_path = manager_path.clone();
        units.spawn(async move {
            match handle_directory(&git, &path, is_dir, &manager_path).await {
                Ok(outcome) => Some(outcome),
                Err(err) => {
                    let mut list = failures.lock().await;
                    list.push(format!("{name} error: {err}"));
                    None
                }
            }
        });
    }

    let mut summary = ScanSummary::default();
    while let Some(joined) = units.join_next().await {
        match joined {
            Ok(Some(Outcome::Tracked { refreshed })) => {
                summary.tracked += 1;
                if refreshed {
                    summary.refreshed += 1;
                }
            }
            Ok(Some(Outcome::Skipped)) => summary.skipped += 1,
            Ok(None) => {}
            Err(join_err) => log::error!("scan unit crashed: {join_err}"),
        }
    }

    let failures = failures.lock().await;
    if !failures.is_empty() {
        return Err(GitStewardError::scan_failed(failures.join("\n")));
    }

    Ok(summary)
}

/// Per-directory state machine, terminal at every return.
///
/// Skips are ordinary outcomes, not errors: a plain file, our own checkout, a
/// non-repository, a dirty tree, and a repository with no origin all
/// short-circuit with [`Outcome::Skipped`].
async fn handle_directory(
    git: &GitClient,
    path: &Path,
    is_dir: bool,
    manager_path: &Path,
) -> Result<Outcome> {
    if !is_dir {
        return Ok(Outcome::Skipped);
    }

    // skip ourselves
    if file_name_of(path).contains(SELF_NAME) {
        log::debug!("skipping our own checkout at '{}'", path.display());
        return Ok(Outcome::Skipped);
    }

    // a .git entry (directory or worktree file) is what makes this a repository
    if !path.join(".git").exists() {
        return Ok(Outcome::Skipped);
    }
    log::debug!("{}", RepoState::sidecar_path(path).display());

    if !git.is_clean(path).await {
        log::debug!("'{}' is not clean, skipping this run", path.display());
        return Ok(Outcome::Skipped);
    }

    let mut state = match RepoState::get_or_create(git, path, manager_path).await {
        Ok(state) => state,
        Err(GitStewardError::NoOrigin) => {
            log::debug!("'{}' has no origin, skipping", path.display());
            return Ok(Outcome::Skipped);
        }
        Err(err) => return Err(err),
    };
    log::debug!("'{}' state {:?}", path.display(), state);

    // update once a day
    if state.is_stale() {
        match state.refresh_from_git(git).await {
            Ok(()) => {}
            // origin went away after being cached: leave the old sidecar as is
            Err(GitStewardError::NoOrigin) => {
                log::debug!("'{}' lost its origin, leaving state stale", path.display());
                return Ok(Outcome::Skipped);
            }
            Err(err) => return Err(err),
        }
        state.persist()?;
        return Ok(Outcome::Tracked { refreshed: true });
    }

    Ok(Outcome::Tracked { refreshed: false })
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
