//! Smoke tests for the cubridor CLI
//!
//! These tests verify basic CLI functionality works correctly, including
//! a full test/coverage cycle driven through stub external tools.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get a command for the cubridor binary
fn cubridor() -> Command {
    Command::cargo_bin("cubridor").expect("cubridor binary should exist")
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    cubridor()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.3.1"));
}

#[test]
fn test_help_flag() {
    cubridor()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("coverage"))
        .stdout(predicate::str::contains("test"))
        .stdout(predicate::str::contains("clean"));
}

#[test]
fn test_no_args_shows_help() {
    // Running with no args should show help or error gracefully
    cubridor().assert().failure(); // Requires a subcommand
}

#[test]
fn test_test_subcommand_help() {
    cubridor()
        .args(["test", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("suite"))
        .stdout(predicate::str::contains("cover"));
}

#[test]
fn test_clean_subcommand_help() {
    cubridor()
        .args(["clean", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("output directory"));
}

#[test]
fn test_invalid_subcommand() {
    cubridor()
        .arg("notacommand")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_invalid_flag() {
    cubridor().arg("--notaflag").assert().failure();
}

#[test]
fn test_broken_config_fails() {
    let temp = TempDir::new().expect("create temp dir");
    let config = temp.path().join("cubrir.toml");
    fs::write(&config, "cover_enabled = [broken").expect("write config");

    cubridor()
        .args(["--config", config.to_str().unwrap(), "test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration"));
}

// ============================================================================
// Clean Command
// ============================================================================

#[test]
fn test_clean_removes_out_dir() {
    let temp = TempDir::new().expect("create temp dir");
    let out_dir = temp.path().join("out");
    fs::create_dir_all(&out_dir).expect("create out dir");
    fs::write(out_dir.join("stale.beam"), "obj").expect("write artifact");

    let config = temp.path().join("cubrir.toml");
    fs::write(
        &config,
        format!("out_dir = {:?}\n", out_dir.to_str().unwrap()),
    )
    .expect("write config");

    cubridor()
        .args(["--config", config.to_str().unwrap(), "clean"])
        .assert()
        .success();
    assert!(!out_dir.exists());

    // Cleaning again is still success
    cubridor()
        .args(["--config", config.to_str().unwrap(), "clean"])
        .assert()
        .success();
}

// ============================================================================
// End-to-End Runs Through Stub Tools
// ============================================================================

#[cfg(unix)]
fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, body).expect("write script");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).expect("chmod script");
}

/// Lay out a minimal project with stub compiler/runner/coverage tools.
#[cfg(unix)]
fn stub_project(temp: &TempDir, runner_exit: u8) -> std::path::PathBuf {
    let test_dir = temp.path().join("test");
    fs::create_dir_all(&test_dir).expect("create test dir");
    fs::write(test_dir.join("sample_tests.erl"), "-module(sample_tests).")
        .expect("write test source");

    // Compiler stub: find the -o argument and drop an artifact there
    let compiler = temp.path().join("fake-erlc");
    write_script(
        &compiler,
        r#"#!/bin/sh
out=""
prev=""
for a in "$@"; do
  if [ "$prev" = "-o" ]; then out="$a"; fi
  prev="$a"
done
touch "$out/sample_tests.beam"
"#,
    );

    let runner = temp.path().join("fake-runner");
    write_script(&runner, &format!("#!/bin/sh\nexit {runner_exit}\n"));

    let coverage = temp.path().join("fake-cover");
    write_script(
        &coverage,
        r#"#!/bin/sh
case "$1" in
  reset) exit 0 ;;
  instrument) exit 0 ;;
  analyze) echo "8 2"; exit 0 ;;
  detail) echo "<html>detail</html>" > "$3"; exit 0 ;;
  *) exit 1 ;;
esac
"#,
    );

    let config = temp.path().join("cubrir.toml");
    fs::write(
        &config,
        format!(
            r#"
src_dir = {src:?}
test_dir = {test:?}
out_dir = {out:?}

[tools]
compiler = {compiler:?}
runner = {runner:?}
coverage = {coverage:?}
"#,
            src = temp.path().join("src").to_str().unwrap(),
            test = test_dir.to_str().unwrap(),
            out = temp.path().join("out").to_str().unwrap(),
            compiler = compiler.to_str().unwrap(),
            runner = runner.to_str().unwrap(),
            coverage = coverage.to_str().unwrap(),
        ),
    )
    .expect("write config");
    config
}

#[cfg(unix)]
#[test]
fn test_e2e_passing_run_with_coverage() {
    let temp = TempDir::new().expect("create temp dir");
    let config = stub_project(&temp, 0);

    cubridor()
        .args(["--config", config.to_str().unwrap(), "test", "--cover"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All tests passed"))
        .stdout(predicate::str::contains("Coverage report"));

    let index = temp.path().join("out/index.html");
    assert!(index.exists(), "index page should be written");
    let html = fs::read_to_string(&index).expect("read index");
    assert!(html.contains("Total: 80%"));
    assert!(html.contains("sample_tests.COVER.html"));
    assert!(temp.path().join("out/sample_tests.COVER.html").exists());
}

#[cfg(unix)]
#[test]
fn test_e2e_failing_run_exits_nonzero() {
    let temp = TempDir::new().expect("create temp dir");
    let config = stub_project(&temp, 1);

    cubridor()
        .args(["--config", config.to_str().unwrap(), "test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Test execution failed"));
}

#[cfg(unix)]
#[test]
fn test_e2e_json_summary() {
    let temp = TempDir::new().expect("create temp dir");
    let config = stub_project(&temp, 0);

    cubridor()
        .args([
            "--config",
            config.to_str().unwrap(),
            "test",
            "--cover",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"passed\": true"))
        .stdout(predicate::str::contains("index.html"));
}
