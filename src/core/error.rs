//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`GitStewardError`] which provides comprehensive error handling
//! for all git-steward operations. It uses `thiserror` for ergonomic error definitions
//! and includes specialized error constructors for common failure scenarios.
//!
//! # Public API
//! - [`GitStewardError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, GitStewardError>`
//!
//! # Error Categories
//! - **Startup errors**: Malformed configuration file, unreadable scan root
//! - **Git process errors**: Command failures, recovered panics at the process boundary
//! - **Repository conditions**: The distinguished no-origin outcome, commit date parsing
//! - **State errors**: Sidecar read/write failures, serialization issues
//! - **Aggregate**: The combined per-repository failure report for a whole scan

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for git-steward
#[derive(Error, Debug)]
pub enum GitStewardError {
    // Startup errors
    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    // Git process errors
    #[error("git {args:?} in '{cwd}' failed: {detail}")]
    GitCommandFailed {
        cwd: PathBuf,
        args: Vec<String>,
        detail: String,
    },

    #[error("git {args:?} in '{cwd}' panicked: {detail}")]
    GitPanicked {
        cwd: PathBuf,
        args: Vec<String>,
        detail: String,
    },

    // Repository conditions
    #[error("No origin remote configured")]
    NoOrigin,

    #[error("Failed to parse commit time '{raw}': {source}")]
    CommitTimeParse {
        raw: String,
        source: chrono::ParseError,
    },

    // State errors
    #[error("Failed to read state file '{path}': {source}")]
    StateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write state file '{path}': {source}")]
    StateWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Aggregate scan failure
    #[error("scan failed:\n{report}")]
    ScanFailed { report: String },
}

/// Convenience type alias for Results using GitStewardError
pub type Result<T> = std::result::Result<T, GitStewardError>;

impl GitStewardError {
    /// Create a config parse error
    pub fn config_parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }

    /// Create a git command failed error
    pub fn git_command_failed(
        cwd: impl Into<PathBuf>,
        args: &[String],
        detail: impl Into<String>,
    ) -> Self {
        Self::GitCommandFailed {
            cwd: cwd.into(),
            args: args.to_vec(),
            detail: detail.into(),
        }
    }

    /// Create a git panicked error for a fault recovered at the process boundary
    pub fn git_panicked(
        cwd: impl Into<PathBuf>,
        args: &[String],
        detail: impl Into<String>,
    ) -> Self {
        Self::GitPanicked {
            cwd: cwd.into(),
            args: args.to_vec(),
            detail: detail.into(),
        }
    }

    /// Create a commit time parse error
    pub fn commit_time_parse(raw: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::CommitTimeParse {
            raw: raw.into(),
            source,
        }
    }

    /// Create a state read error
    pub fn state_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StateRead {
            path: path.into(),
            source,
        }
    }

    /// Create a state write error
    pub fn state_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StateWrite {
            path: path.into(),
            source,
        }
    }

    /// Create the aggregate scan failure from collected per-repository reports
    pub fn scan_failed(report: impl Into<String>) -> Self {
        Self::ScanFailed {
            report: report.into(),
        }
    }

    /// True when this error is the distinguished no-origin skip condition
    pub fn is_no_origin(&self) -> bool {
        matches!(self, Self::NoOrigin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_origin_display() {
        let err = GitStewardError::NoOrigin;
        assert_eq!(err.to_string(), "No origin remote configured");
        assert!(err.is_no_origin());
    }

    #[test]
    fn test_git_command_failed_display() {
        let args = vec!["status".to_string()];
        let err = GitStewardError::git_command_failed("/tmp/repo", &args, "exit status 128");
        assert!(err.to_string().contains("/tmp/repo"));
        assert!(err.to_string().contains("status"));
        assert!(err.to_string().contains("exit status 128"));
    }

    #[test]
    fn test_git_panicked_display() {
        let args = vec!["log".to_string(), "-1".to_string()];
        let err = GitStewardError::git_panicked("/tmp/repo", &args, "boom");
        assert!(err.to_string().contains("panicked"));
        assert!(err.to_string().contains("boom"));
        assert!(!err.is_no_origin());
    }

    #[test]
    fn test_commit_time_parse_display() {
        let parse_err = chrono::DateTime::parse_from_str("garbage", "%a %b %e %H:%M:%S %Y %z")
            .expect_err("garbage must not parse");
        let err = GitStewardError::commit_time_parse("garbage", parse_err);
        assert!(err.to_string().contains("garbage"));
    }

    #[test]
    fn test_state_write_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = GitStewardError::state_write("/repos/.foo.git-steward.state.json", io_err);
        assert!(err.to_string().contains(".foo.git-steward.state.json"));
        assert!(err.to_string().contains("access denied"));
    }

    #[test]
    fn test_scan_failed_display() {
        let err = GitStewardError::scan_failed("alpha error: boom\nbeta error: bust");
        let text = err.to_string();
        assert!(text.starts_with("scan failed:"));
        assert!(text.contains("alpha error: boom"));
        assert!(text.contains("beta error: bust"));
    }
}
