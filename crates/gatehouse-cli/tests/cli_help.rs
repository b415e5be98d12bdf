use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_help_lists_commands_and_global_flags() {
    cargo_bin_cmd!("gatehouse")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("session"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("--debounce-ms"))
        .stdout(predicate::str::contains("--session-file"));
}

#[test]
fn test_session_help_shows_subcommands() {
    cargo_bin_cmd!("gatehouse")
        .args(["session", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("clear"));
}

#[test]
fn test_app_refuses_to_start_without_terminal() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("gatehouse")
        .env("GATEHOUSE_HOME", dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}

#[test]
fn test_unknown_subcommand_fails() {
    cargo_bin_cmd!("gatehouse")
        .arg("frobnicate")
        .assert()
        .failure();
}
