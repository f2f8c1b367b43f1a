//! End-to-end tests running the git-steward binary.

use assert_cmd::prelude::*;
use git_steward::core::RepoState;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

mod common;
use common::repository::*;

#[test]
fn test_binary_scans_the_working_directory_by_default() -> anyhow::Result<()> {
    let root = setup_scan_root()?;
    let repo = add_clean_repo(root.path(), "widget", "git@example.com:acme/widget.git")?;

    let mut cmd = Command::cargo_bin("git-steward")?;
    cmd.current_dir(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("tracked"));

    assert!(RepoState::sidecar_path(&repo).exists());

    Ok(())
}

#[test]
fn test_binary_honors_config_directed_root() -> anyhow::Result<()> {
    let launch_dir = setup_scan_root()?;
    let fleet = setup_scan_root()?;
    let repo = add_clean_repo(fleet.path(), "widget", "git@example.com:acme/widget.git")?;

    let config = format!(r#"{{"path": {}}}"#, serde_json::to_string(fleet.path())?);
    fs::write(launch_dir.path().join(".git-steward"), config)?;

    let mut cmd = Command::cargo_bin("git-steward")?;
    cmd.current_dir(launch_dir.path()).assert().success();

    assert!(RepoState::sidecar_path(&repo).exists());

    Ok(())
}

#[test]
fn test_malformed_config_is_a_fatal_startup_error() -> anyhow::Result<()> {
    let root = setup_scan_root()?;
    fs::write(root.path().join(".git-steward"), "{ path: nope")?;

    let mut cmd = Command::cargo_bin("git-steward")?;
    cmd.current_dir(root.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Failed to parse config file"));

    Ok(())
}

#[test]
fn test_scan_failure_exits_nonzero_and_names_the_culprit() -> anyhow::Result<()> {
    let root = setup_scan_root()?;
    let beta = add_clean_repo(root.path(), "beta", "git@example.com:acme/beta.git")?;
    fs::create_dir(RepoState::sidecar_path(&beta))?;

    let mut cmd = Command::cargo_bin("git-steward")?;
    cmd.current_dir(root.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("beta error"));

    Ok(())
}

#[test]
fn test_dirty_repo_scan_still_exits_zero() -> anyhow::Result<()> {
    let root = setup_scan_root()?;
    let repo = add_dirty_repo(root.path(), "messy", "git@example.com:acme/messy.git")?;

    let mut cmd = Command::cargo_bin("git-steward")?;
    cmd.current_dir(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped"));

    assert!(!RepoState::sidecar_path(&repo).exists());

    Ok(())
}
