use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_show_without_store_is_logged_out() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("gatehouse")
        .env("GATEHOUSE_HOME", dir.path())
        .args(["session", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("logged out"))
        .stdout(predicate::str::contains("isLoggedIn is not set"))
        .stdout(predicate::str::contains("session.json"));
}

#[test]
fn test_show_with_flag_is_logged_in() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("session.json"), r#"{"isLoggedIn":"1"}"#).unwrap();

    cargo_bin_cmd!("gatehouse")
        .env("GATEHOUSE_HOME", dir.path())
        .args(["session", "show"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("logged in"));
}

#[test]
fn test_show_other_value_is_logged_out() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("session.json"), r#"{"isLoggedIn":"true"}"#).unwrap();

    cargo_bin_cmd!("gatehouse")
        .env("GATEHOUSE_HOME", dir.path())
        .args(["session", "show"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("logged out"))
        .stdout(predicate::str::contains(r#"isLoggedIn = "true""#));
}

#[test]
fn test_show_corrupt_store_is_logged_out() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("session.json"), "not json").unwrap();

    cargo_bin_cmd!("gatehouse")
        .env("GATEHOUSE_HOME", dir.path())
        .args(["session", "show"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("logged out"))
        .stdout(predicate::str::contains("could not be read"));
}

#[test]
fn test_clear_removes_flag_and_keeps_other_keys() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("session.json");
    fs::write(&store, r#"{"isLoggedIn":"1","theme":"dark"}"#).unwrap();

    cargo_bin_cmd!("gatehouse")
        .env("GATEHOUSE_HOME", dir.path())
        .args(["session", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session cleared"));

    let entries: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&store).unwrap()).unwrap();
    assert!(entries.get("isLoggedIn").is_none());
    assert_eq!(entries["theme"], "dark");
}

#[test]
fn test_session_file_flag_overrides_location() {
    let home = tempdir().unwrap();
    let other = tempdir().unwrap();
    let store = other.path().join("elsewhere.json");
    fs::write(&store, r#"{"isLoggedIn":"1"}"#).unwrap();

    cargo_bin_cmd!("gatehouse")
        .env("GATEHOUSE_HOME", home.path())
        .args(["session", "show", "--session-file"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("logged in"))
        .stdout(predicate::str::contains("elsewhere.json"));
}

#[test]
fn test_commands_write_log_file() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("gatehouse")
        .env("GATEHOUSE_HOME", dir.path())
        .env("GATEHOUSE_LOG", "info")
        .args(["session", "clear"])
        .assert()
        .success();

    assert!(dir.path().join("logs").join("gatehouse.log").exists());
}
