//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let mut cmd = Command::cargo_bin("filmdb").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("init-db"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("filmdb").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--bind"))
        .stdout(predicate::str::contains("--memory"))
        .stdout(predicate::str::contains("--cors-permissive"));
}

#[test]
fn test_init_db_print() {
    let mut cmd = Command::cargo_bin("filmdb").unwrap();
    cmd.arg("init-db").arg("--print").env_remove("DATABASE_URL");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("CREATE TABLE IF NOT EXISTS film_actors"));
}

#[test]
fn test_unknown_command_fails() {
    let mut cmd = Command::cargo_bin("filmdb").unwrap();
    cmd.arg("split");

    cmd.assert().failure();
}
