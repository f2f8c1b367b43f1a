//! Git repository management and setup utilities
//!
//! Provides functions for building scan roots populated with real git
//! repositories in various states (clean, dirty, origin-less) for
//! comprehensive testing scenarios.

#![allow(dead_code)]

use git_steward::core::error::{GitStewardError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary scan root. The TempDir must be kept alive for the duration
/// of the test to prevent cleanup.
pub struct TestRoot {
    pub temp_dir: TempDir,
}

impl TestRoot {
    /// Get the root path as a reference
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}

/// Creates a fresh, empty scan root
pub fn setup_scan_root() -> Result<TestRoot> {
    let temp_dir = TempDir::new().map_err(GitStewardError::Io)?;
    Ok(TestRoot { temp_dir })
}

/// Runs one git command in `cwd`, ignoring its output
fn git(cwd: &Path, args: &[&str]) -> Result<()> {
    std::process::Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(GitStewardError::Io)?;
    Ok(())
}

/// Initializes a git repository at `root/<name>` with test user config
pub fn init_repo(root: &Path, name: &str) -> Result<PathBuf> {
    let repo_path = root.join(name);
    fs::create_dir(&repo_path).map_err(GitStewardError::Io)?;

    git(&repo_path, &["init"])?;
    // Set git config to avoid prompts during tests
    git(&repo_path, &["config", "user.name", "Test User"])?;
    git(&repo_path, &["config", "user.email", "test@example.com"])?;

    Ok(repo_path)
}

/// Creates a file with specified content in the repository
pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    fs::write(repo_path.join(filename), content).map_err(GitStewardError::Io)?;
    Ok(())
}

/// Adds a file to the git index
pub fn git_add(repo_path: &Path, filename: &str) -> Result<()> {
    git(repo_path, &["add", filename])
}

/// Creates a git commit with the specified message
pub fn git_commit(repo_path: &Path, message: &str) -> Result<()> {
    git(repo_path, &["commit", "-m", message])
}

/// Points the repository's `origin` remote at `url`
pub fn set_origin(repo_path: &Path, url: &str) -> Result<()> {
    git(repo_path, &["remote", "add", "origin", url])
}

/// Removes the repository's `origin` remote
pub fn remove_origin(repo_path: &Path) -> Result<()> {
    git(repo_path, &["remote", "remove", "origin"])
}

/// A committed repository with an `origin` remote: clean and trackable
pub fn add_clean_repo(root: &Path, name: &str, origin_url: &str) -> Result<PathBuf> {
    let repo_path = init_repo(root, name)?;
    create_file(&repo_path, "initial.txt", "initial content\n")?;
    git_add(&repo_path, "initial.txt")?;
    git_commit(&repo_path, "Initial commit")?;
    set_origin(&repo_path, origin_url)?;
    Ok(repo_path)
}

/// A committed repository without any remote configured
pub fn add_repo_without_origin(root: &Path, name: &str) -> Result<PathBuf> {
    let repo_path = init_repo(root, name)?;
    create_file(&repo_path, "initial.txt", "initial content\n")?;
    git_add(&repo_path, "initial.txt")?;
    git_commit(&repo_path, "Initial commit")?;
    Ok(repo_path)
}

/// A repository with uncommitted changes on top of its initial commit
pub fn add_dirty_repo(root: &Path, name: &str, origin_url: &str) -> Result<PathBuf> {
    let repo_path = add_clean_repo(root, name, origin_url)?;
    create_file(&repo_path, "initial.txt", "uncommitted modification\n")?;
    Ok(repo_path)
}

/// A plain subdirectory that is not a repository at all
pub fn add_plain_dir(root: &Path, name: &str) -> Result<PathBuf> {
    let dir = root.join(name);
    fs::create_dir(&dir).map_err(GitStewardError::Io)?;
    Ok(dir)
}
