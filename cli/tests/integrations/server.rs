use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_help_lists_server() {
    Command::cargo_bin("mamdani")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("server"))
        .stdout(predicate::str::contains("show"));
}

#[test]
fn test_cli_server_help_shows_port() {
    Command::cargo_bin("mamdani")
        .unwrap()
        .args(["server", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("3000"));
}
