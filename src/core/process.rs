//! External git process execution with bounded concurrency.
//!
//! This module provides [`GitRunner`], the single gateway through which every git
//! invocation in git-steward passes. It shells out to the `git` binary with
//! `tokio::process::Command` and bounds the number of simultaneously running
//! processes with a counting semaphore.
//!
//! # Public API
//! - [`GitRunner`]: Throttled executor for git subcommands
//!
//! # Concurrency Model
//! - **Permit pool**: A `tokio::sync::Semaphore` with a configured capacity
//!   (default 10) gates every invocation across the whole run
//! - **Panic isolation**: The actual execution runs in a spawned task; a panic
//!   there surfaces as a `JoinError` and is converted into an error value
//! - **Unconditional release**: The permit is an RAII guard held in the caller
//!   frame, so pool occupancy returns to capacity after every invocation,
//!   success, failure, or panic

use crate::core::error::{GitStewardError, Result};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::Arc;
use tokio::process::Command;
use tokio::sync::Semaphore;
use tokio::task::JoinError;

/// Name of the external version-control binary, resolved via PATH
pub const GIT_BINARY: &str = "git";

/// Default capacity of the git invocation permit pool
pub const DEFAULT_CONCURRENCY_LIMIT: usize = 10;

/// Throttled executor for git subcommands
pub struct GitRunner {
    permits: Arc<Semaphore>,
    limit: usize,
}

impl GitRunner {
    pub fn new(limit: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    /// Number of permits currently available in the pool
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    /// Configured capacity of the pool
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Run `git <first_arg> <rest...>` in `cwd` and return the trimmed combined output.
    ///
    /// The mandatory `first_arg` prevents accidentally invoking the binary with no
    /// arguments at all. Non-zero exit and spawn failures both surface as
    /// [`GitStewardError::GitCommandFailed`]; no retries happen at this layer.
    pub async fn run_git(&self, cwd: &Path, first_arg: &str, rest: &[&str]) -> Result<String> {
        let mut args = Vec::with_capacity(rest.len() + 1);
        args.push(first_arg.to_string());
        args.extend(rest.iter().map(|s| s.to_string()));

        let context = args.clone();
        self.guarded(cwd, &context, execute(cwd.to_path_buf(), args))
            .await
    }

    /// Acquire a permit, run `task` in a spawned task, and release the permit
    /// no matter how `task` ends.
    ///
    /// A panic inside `task` is recovered here: it is logged with the working
    /// directory and arguments for diagnosis and converted into
    /// [`GitStewardError::GitPanicked`]. The permit lives in this frame, which
    /// never unwinds, so a crashed invocation cannot shrink the pool.
    async fn guarded<T, F>(&self, cwd: &Path, args: &[String], task: F) -> Result<T>
    where
        T: Send + 'static,
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let _permit = self.permits.acquire().await.map_err(|_| {
            GitStewardError::git_command_failed(cwd, args, "concurrency throttle closed")
        })?;

        match tokio::spawn(task).await {
            Ok(result) => result,
            Err(join_err) => {
                let detail = panic_detail(join_err);
                log::error!(
                    "recovered panic running git in '{}' with args {:?}: {}",
                    cwd.display(),
                    args,
                    detail
                );
                Err(GitStewardError::git_panicked(cwd, args, detail))
            }
        }
    }
}

async fn execute(cwd: PathBuf, args: Vec<String>) -> Result<String> {
    let output = Command::new(GIT_BINARY)
        .args(&args)
        .current_dir(&cwd)
        .output()
        .await
        .map_err(|e| GitStewardError::git_command_failed(&cwd, &args, e.to_string()))?;

    if !output.status.success() {
        let mut detail = combined_output(&output);
        if detail.is_empty() {
            detail = output.status.to_string();
        }
        return Err(GitStewardError::git_command_failed(&cwd, &args, detail));
    }

    Ok(combined_output(&output))
}

/// Stdout followed by stderr, lossily decoded and trimmed
fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text.trim().to_string()
}

fn panic_detail(err: JoinError) -> String {
    if err.is_panic() {
        let payload = err.into_panic();
        if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        }
    } else {
        "task cancelled".to_string()
    }
}
