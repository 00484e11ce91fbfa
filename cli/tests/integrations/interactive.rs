use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_run_help_mentions_interactive() {
    Command::cargo_bin("mamdani")
        .unwrap()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--interactive"))
        .stdout(predicate::str::contains("Prompt for every input"));
}
