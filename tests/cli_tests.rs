//! CLI entry point tests.
//!
//! These exercise the validation that runs before any subprocess could be
//! spawned, so they need neither a java runtime nor the toolchain jars. Each
//! test runs in its own scratch directory to keep the log output out of the
//! project tree.

use assert_cmd::Command;
use predicates::boolean::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use tempfile::TempDir;

fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("apkrename").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn missing_input_fails_before_tool_resolution() {
    let temp = TempDir::new().unwrap();

    cmd(&temp)
        .args([
            "--input",
            "does-not-exist.apk",
            "--instring",
            "OldName",
            "--outstring",
            "NewName",
        ])
        .assert()
        .failure()
        .stderr(contains("APK path does not exist").and(contains("apktool jar not found").not()));
}

#[test]
fn missing_toolchain_is_fatal() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("example.apk"), b"stub").unwrap();

    // The input exists, so validation proceeds to toolchain resolution,
    // which fails: no libs/ tree next to the test binary and no flags
    cmd(&temp)
        .args([
            "--input",
            "example.apk",
            "--instring",
            "OldName",
            "--outstring",
            "NewName",
        ])
        .assert()
        .failure()
        .stderr(contains("jar not found"));
}

#[test]
fn rename_operands_are_required() {
    let temp = TempDir::new().unwrap();

    cmd(&temp)
        .args(["--input", "example.apk"])
        .assert()
        .failure()
        .stderr(contains("--instring"));
}

#[test]
fn help_documents_the_flags() {
    let temp = TempDir::new().unwrap();

    cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(
            contains("--input")
                .and(contains("--instring"))
                .and(contains("--outstring"))
                .and(contains("--apktool"))
                .and(contains("--apksigner"))
                .and(contains("--overwrite"))
                .and(contains("--delete-workdir"))
                .and(contains("--open-folder")),
        );
}
