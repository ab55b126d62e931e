//! End-to-end tests of the `vrsn` binary.
#![allow(deprecated)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Runs `vrsn` in `dir` with user config lookups pointed at `dir`.
fn vrsn(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vrsn").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_DIR", dir)
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_check_valid_transition() {
    let dir = TempDir::new().unwrap();

    vrsn(dir.path())
        .args(["check", "--was", "1.2.3", "--now", "1.3.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("was: "))
        .stdout(predicate::str::contains("valid version bump"));
}

#[test]
fn test_check_invalid_transition() {
    let dir = TempDir::new().unwrap();

    vrsn(dir.path())
        .args(["check", "--was", "1.2.3", "--now", "1.2.5"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid version bump: 1.2.3 -> 1.2.5"));
}

#[test]
fn test_check_not_bumped() {
    let dir = TempDir::new().unwrap();

    vrsn(dir.path())
        .args(["check", "--was", "v2.0.0", "--now", "v2.0.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("version has not been bumped"));
}

#[test]
fn test_check_without_file_or_flags() {
    let dir = TempDir::new().unwrap();

    vrsn(dir.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--now flag"));
}

#[test]
fn test_bump_patch_in_version_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("VERSION"), "0.9.9\n").unwrap();

    vrsn(dir.path())
        .args(["bump", "patch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("version bumped from 0.9.9 to 0.9.10"));

    assert_eq!(
        fs::read_to_string(dir.path().join("VERSION")).unwrap(),
        "0.9.10\n"
    );
}

#[test]
fn test_bump_with_file_flag() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("VERSION"), "1.0.0\n").unwrap();
    fs::write(
        dir.path().join("pyproject.toml"),
        "[project]\nname = \"demo\"\nversion = \"1.0.0\"\n",
    )
    .unwrap();

    vrsn(dir.path())
        .args(["bump", "major", "--file", "pyproject.toml"])
        .assert()
        .success();

    assert!(fs::read_to_string(dir.path().join("pyproject.toml"))
        .unwrap()
        .contains("version = \"2.0.0\""));
    assert_eq!(
        fs::read_to_string(dir.path().join("VERSION")).unwrap(),
        "1.0.0\n"
    );
}

#[test]
fn test_bump_multiple_files_requires_flag() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("VERSION"), "1.0.0\n").unwrap();
    fs::write(dir.path().join("package.json"), "{\"version\": \"1.0.0\"}\n").unwrap();

    vrsn(dir.path())
        .args(["bump", "patch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("multiple version files found"));
}

#[test]
fn test_bump_interactive_selection() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("VERSION"), "v1.4.2\n").unwrap();

    vrsn(dir.path())
        .arg("bump")
        .write_stdin("2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("minor (v1.5.0)"));

    assert_eq!(
        fs::read_to_string(dir.path().join("VERSION")).unwrap(),
        "v1.5.0\n"
    );
}

#[test]
fn test_bump_rejects_unknown_increment() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("VERSION"), "1.0.0\n").unwrap();

    vrsn(dir.path()).args(["bump", "huge"]).assert().failure();
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();

    vrsn(dir.path())
        .args(["--config", "missing.toml", "check", "--was", "1.0.0", "--now", "1.0.1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error loading config"));
}
