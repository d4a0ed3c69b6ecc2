//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn biotracker() -> Command {
    let mut cmd = Command::cargo_bin("biotracker").unwrap();
    cmd.env_remove("BIOTRACKER_CONFIG")
        .env_remove("DB_URL")
        .env_remove("BIOTRACKER_BIND")
        .env_remove("BIOTRACKER_SPECS_SOURCE")
        .env_remove("BIOTRACKER_SPECS_CSV_DIR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    biotracker()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_serve_help() {
    biotracker()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"))
        .stdout(predicate::str::contains("--specs-source"));
}

#[test]
fn test_config_show_defaults() {
    let dir = tempfile::tempdir().unwrap();
    biotracker()
        .current_dir(dir.path())
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("bind = \"127.0.0.1:8000\""))
        .stdout(predicate::str::contains("source = \"database\""));
}

#[test]
fn test_config_show_reads_file_and_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracker.toml");
    std::fs::write(&path, "[specs]\nsource = \"csv\"\n").unwrap();

    biotracker()
        .current_dir(dir.path())
        .env("DB_URL", "sqlite://./other.db")
        .arg("--config")
        .arg(&path)
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("source = \"csv\""))
        .stdout(predicate::str::contains("sqlite://./other.db"));
}

#[test]
fn test_config_path_without_file() {
    let dir = tempfile::tempdir().unwrap();
    biotracker()
        .current_dir(dir.path())
        .arg("config")
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("built-in defaults"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    biotracker()
        .current_dir(dir.path())
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("config")
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_migrate_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("tracker.db");

    biotracker()
        .current_dir(dir.path())
        .arg("migrate")
        .arg("--database-url")
        .arg(format!("sqlite://{}", db.display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema up to date"));

    assert!(db.exists());
}

#[test]
fn test_invalid_log_level_warns_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracker.toml");
    std::fs::write(&path, "[logging]\nlevel = \"biotracker=loud\"\n").unwrap();

    biotracker()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&path)
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stderr(predicate::str::contains("invalid log level 'biotracker=loud'"))
        .stdout(predicate::str::contains("level = \"biotracker=loud\""));
}
