//! Tests running the `convert` binary end to end

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const EXPORT: &str = "name,url,username,password\n\
                      Site,https://site.com,alice,pw-a\n\
                      Site,https://site.com,bob,pw-b\n";

fn convert_in(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("convert").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_no_arguments_prints_usage_and_exits_1() {
    let temp_dir = TempDir::new().unwrap();

    convert_in(&temp_dir)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_missing_input_exits_1() {
    let temp_dir = TempDir::new().unwrap();

    convert_in(&temp_dir)
        .arg("nope.csv")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found"));

    assert!(!temp_dir.path().join("apple_import.csv").exists());
}

#[test]
fn test_valid_export_writes_files_and_prints_instructions() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("export.csv"), EXPORT).unwrap();

    convert_in(&temp_dir)
        .arg("export.csv")
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted: 2 entries"))
        .stdout(predicate::str::contains("IMPORTANT:"))
        .stdout(predicate::str::contains("1. Import './apple_import.csv'"))
        .stdout(predicate::str::contains("raw data").not());

    let primary = std::fs::read_to_string(temp_dir.path().join("apple_import.csv")).unwrap();
    assert!(primary.starts_with("Title,URL,Username,Password,Notes,OTPAuth\n"));
    assert!(primary.contains("https://site.com?account=2"));
    assert!(temp_dir
        .path()
        .join("duplicates_manual_import.csv")
        .exists());
}

#[test]
fn test_debug_dump_printed() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("export.csv"), EXPORT).unwrap();

    convert_in(&temp_dir)
        .args(["export.csv", "--debug"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Row 1 raw data"));
}

#[test]
fn test_debug_dump_survives_rust_log_override() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("export.csv"), EXPORT).unwrap();

    convert_in(&temp_dir)
        .env("RUST_LOG", "info")
        .args(["export.csv", "--debug"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Row 1 raw data"))
        .stdout(predicate::str::contains("pw-a").not());
}
