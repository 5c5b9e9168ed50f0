//! End-to-end tests for the retab binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn retab(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_retab"))
        .args(["--no-config"])
        .args(args)
        .current_dir(dir)
        .env_remove("RETAB_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run retab")
}

#[test]
fn test_no_matching_files_exits_zero() {
    let dir = TempDir::new().unwrap();
    let output = retab(dir.path(), &["*.nothing"]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No matching files"), "stderr: {stderr}");
}

#[test]
fn test_missing_pattern_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let output = retab(dir.path(), &[]);
    assert!(!output.status.success());
}

#[test]
fn test_tabs_to_spaces_in_place() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "\t\tfoo\n").unwrap();

    let output = retab(dir.path(), &["-n", "4", "*.txt"]);
    assert!(output.status.success());

    let content = fs::read_to_string(dir.path().join("a.txt")).unwrap();
    assert_eq!(content.lines().collect::<Vec<_>>(), vec!["        foo"]);
    assert!(!dir.path().join("a.txt~").exists());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Processing file: a.txt"), "stderr: {stderr}");
}

#[test]
fn test_spaces_to_tabs_with_trim_and_backup() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("b.txt"), "    foo   \n").unwrap();

    let output = retab(dir.path(), &["-t", "-n", "4", "-r", "-b", "b.txt"]);
    assert!(output.status.success());

    let content = fs::read_to_string(dir.path().join("b.txt")).unwrap();
    assert_eq!(content.lines().collect::<Vec<_>>(), vec!["\tfoo"]);
    assert_eq!(
        fs::read_to_string(dir.path().join("b.txt~")).unwrap(),
        "    foo   \n"
    );
}

#[test]
fn test_unusable_log_file_only_warns() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("logs")).unwrap();
    fs::write(dir.path().join("d.txt"), "\tfoo\n").unwrap();

    let output = retab(dir.path(), &["--log-file", "logs", "d.txt"]);
    assert!(output.status.success(), "status: {:?}", output.status);

    let content = fs::read_to_string(dir.path().join("d.txt")).unwrap();
    assert_eq!(content.lines().collect::<Vec<_>>(), vec!["  foo"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Warning: Could not open log file"), "stderr: {stderr}");
}

#[test]
fn test_exclude_and_dotfiles() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("vendor")).unwrap();
    fs::write(dir.path().join("app.js"), "\tapp\n").unwrap();
    fs::write(dir.path().join(".hidden.js"), "\thidden\n").unwrap();
    fs::write(dir.path().join("vendor").join("dep.js"), "\tdep\n").unwrap();

    let output = retab(dir.path(), &["**/*.js", "!vendor/**"]);
    assert!(output.status.success());

    let app = fs::read_to_string(dir.path().join("app.js")).unwrap();
    assert_eq!(app.lines().collect::<Vec<_>>(), vec!["  app"]);
    assert_eq!(fs::read_to_string(dir.path().join(".hidden.js")).unwrap(), "\thidden\n");
    assert_eq!(fs::read_to_string(dir.path().join("vendor").join("dep.js")).unwrap(), "\tdep\n");
}

#[test]
fn test_unchanged_file_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("c.txt"), "  fine\n").unwrap();

    let output = retab(dir.path(), &["-b", "c.txt"]);
    assert!(output.status.success());
    assert!(!dir.path().join("c.txt~").exists());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unchanged: c.txt"), "stderr: {stderr}");
}

#[test]
fn test_dry_run_prints_diff() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("d.txt"), "\tfoo\n").unwrap();

    let output = retab(dir.path(), &["-d", "d.txt"]);
    assert!(output.status.success());
    assert_eq!(fs::read_to_string(dir.path().join("d.txt")).unwrap(), "\tfoo\n");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("+  foo"), "stdout: {stdout}");
    assert!(stdout.contains("1 line would change"), "stdout: {stdout}");
}

#[test]
fn test_failure_aborts_and_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("1.txt"), "\tone\n").unwrap();
    fs::write(dir.path().join("2.txt"), b"\t\xff\xfe\n").unwrap();
    fs::write(dir.path().join("3.txt"), "\tthree\n").unwrap();

    let output = retab(dir.path(), &["1.txt", "2.txt", "3.txt"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "stderr: {stderr}");
    assert!(stderr.contains("2.txt"), "stderr: {stderr}");

    // first file committed, third never touched
    assert_eq!(
        fs::read_to_string(dir.path().join("1.txt")).unwrap().lines().next(),
        Some("  one")
    );
    assert_eq!(fs::read_to_string(dir.path().join("3.txt")).unwrap(), "\tthree\n");
}

#[test]
fn test_config_file_defaults_and_cli_override() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("retab.toml");
    fs::write(&config, "[indent]\nuse_tabs = true\ntab_width = 4\n").unwrap();
    fs::write(dir.path().join("e.txt"), "        x\n").unwrap();
    fs::write(dir.path().join("f.txt"), "\tx\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_retab"))
        .args(["--config", config.to_str().unwrap(), "e.txt"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("e.txt")).unwrap().lines().next(),
        Some("\t\tx")
    );

    let output = Command::new(env!("CARGO_BIN_EXE_retab"))
        .args(["--config", config.to_str().unwrap(), "--spaces", "f.txt"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("f.txt")).unwrap().lines().next(),
        Some("    x")
    );
}
