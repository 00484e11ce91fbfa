use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn shipped_knowledge() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../knowledge/economy.json")
}

#[test]
fn test_cli_show_lists_knowledge() {
    Command::cargo_bin("mamdani")
        .unwrap()
        .env_remove("MAMDANI_KNOWLEDGE")
        .arg("show")
        .arg("-k")
        .arg(shipped_knowledge())
        .assert()
        .success()
        .stdout(predicate::str::contains("Knowledge: "))
        .stdout(predicate::str::contains("economic_condition (output)"))
        .stdout(predicate::str::contains("fx_reserves"))
        .stdout(predicate::str::contains("otherwise"))
        .stdout(predicate::str::contains("inflation is high and unemployment is high"));
}

#[test]
fn test_cli_show_rejects_invalid_json() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, "{ \"inputs\": [").unwrap();

    Command::cargo_bin("mamdani")
        .unwrap()
        .arg("show")
        .arg("-k")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid knowledge file"));
}
