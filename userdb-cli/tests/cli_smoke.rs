//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

const DEAD_URL: &str = "postgres://nobody@127.0.0.1:1/none";

/// `userdb` isolated from the caller's HOME, .env and DATABASE_URL
fn userdb(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("userdb").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("DATABASE_URL")
        .env_remove("RUST_LOG")
        .env("USERDB_QUIET", "1");
    cmd
}

fn write_config(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("userdb.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

// === Help Tests ===

#[test]
fn test_top_level_help() {
    let dir = tempfile::tempdir().unwrap();
    userdb(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("menu"));
}

#[test]
fn test_generate_help() {
    let dir = tempfile::tempdir().unwrap();
    userdb(&dir)
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Number of users to generate"))
        .stdout(predicate::str::contains("--bulk"))
        .stdout(predicate::str::contains("--seed"));
}

#[test]
fn test_list_help() {
    let dir = tempfile::tempdir().unwrap();
    userdb(&dir)
        .args(["list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--limit"))
        .stdout(predicate::str::contains("[default: 100]"));
}

#[test]
fn test_search_help() {
    let dir = tempfile::tempdir().unwrap();
    userdb(&dir)
        .args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("first-name"))
        .stdout(predicate::str::contains("last-name"));
}

// === Argument Errors ===

#[test]
fn test_search_rejects_unknown_field() {
    let dir = tempfile::tempdir().unwrap();
    userdb(&dir)
        .args(["search", "olena", "--field", "phone"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'phone'"));
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    userdb(&dir)
        .args(["--config", "missing.toml", "count"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

// === Unreachable Database ===

#[test]
fn test_check_fails_when_unreachable() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, "[database]\nconnect_timeout_secs = 2\n");
    userdb(&dir)
        .arg("--config")
        .arg(&config)
        .args(["--database-url", DEAD_URL, "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not connect to the database"));
}

#[test]
fn test_check_json_reports_unreachable() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        &dir,
        &format!("[database]\nurl = \"{DEAD_URL}\"\nconnect_timeout_secs = 2\n"),
    );
    userdb(&dir)
        .arg("--config")
        .arg(&config)
        .args(["--json", "check"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"reachable\": false"));
}

#[test]
fn test_data_commands_stop_before_querying() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, "[database]\nconnect_timeout_secs = 2\n");
    userdb(&dir)
        .arg("--config")
        .arg(&config)
        .args(["--database-url", DEAD_URL, "search", "olena"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not connect to the database"));
}
