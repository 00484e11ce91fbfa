use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SMALL_ECONOMY: &str = r#"{
    "inputs": [
        { "name": "inflation",
          "labels": [ { "label": "low", "triangle": [0, 0, 8] },
                      { "label": "high", "triangle": [10, 20, 20] } ] },
        { "name": "unemployment",
          "labels": [ { "label": "low", "triangle": [0, 0, 8] },
                      { "label": "high", "triangle": [10, 20, 20] } ] }
    ],
    "output": {
        "name": "economic_condition",
        "universe": { "min": 0, "max": 10, "step": 0.1 },
        "labels": [ { "label": "poor", "triangle": [0, 0, 3] },
                    { "label": "normal", "triangle": [2, 5, 8] },
                    { "label": "good", "triangle": [7, 10, 10] } ]
    },
    "rules": [
        { "when": "inflation is high and unemployment is high", "then": "poor" },
        { "when": "inflation is low and unemployment is low", "then": "good" }
    ]
}"#;

fn write_knowledge(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("knowledge.json");
    fs::write(&path, content).unwrap();
    path
}

fn mamdani() -> Command {
    let mut cmd = Command::cargo_bin("mamdani").unwrap();
    cmd.env_remove("MAMDANI_KNOWLEDGE");
    cmd
}

#[test]
fn test_cli_run_scores_inputs() {
    let temp_dir = TempDir::new().unwrap();
    let knowledge = write_knowledge(&temp_dir, SMALL_ECONOMY);

    mamdani()
        .arg("run")
        .arg("inflation=18")
        .arg("unemployment=17")
        .arg("--knowledge")
        .arg(&knowledge)
        .assert()
        .success()
        .stdout(predicate::str::contains("economic_condition = 1."))
        .stdout(predicate::str::contains("(poor)"))
        .stdout(predicate::str::contains(
            "if inflation is high and unemployment is high then poor",
        ));
}

#[test]
fn test_cli_run_raw_output() {
    let temp_dir = TempDir::new().unwrap();
    let knowledge = write_knowledge(&temp_dir, SMALL_ECONOMY);

    mamdani()
        .args(["run", "inflation=1", "unemployment=2", "--raw", "-k"])
        .arg(&knowledge)
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d+\.\d{4} good\n$").unwrap());
}

#[test]
fn test_cli_run_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let knowledge = write_knowledge(&temp_dir, SMALL_ECONOMY);

    let output = mamdani()
        .args(["run", "inflation=18", "unemployment=17", "--json", "-k"])
        .arg(&knowledge)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["category"], "poor");
    assert_eq!(json["rules"].as_array().unwrap().len(), 2);
    assert!((json["rules"][0]["strength"].as_f64().unwrap() - 0.7).abs() < 1e-9);
}

#[test]
fn test_cli_run_knowledge_from_env() {
    let temp_dir = TempDir::new().unwrap();
    let knowledge = write_knowledge(&temp_dir, SMALL_ECONOMY);

    Command::cargo_bin("mamdani")
        .unwrap()
        .env("MAMDANI_KNOWLEDGE", &knowledge)
        .args(["run", "inflation=18", "unemployment=17", "--raw"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("poor\n"));
}

#[test]
fn test_cli_run_missing_input() {
    let temp_dir = TempDir::new().unwrap();
    let knowledge = write_knowledge(&temp_dir, SMALL_ECONOMY);

    mamdani()
        .args(["run", "inflation=18", "deficit=3", "-k"])
        .arg(&knowledge)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing: unemployment"))
        .stderr(predicate::str::contains("Unexpected: deficit"));
}

#[test]
fn test_cli_run_without_inputs_shows_usage() {
    let temp_dir = TempDir::new().unwrap();
    let knowledge = write_knowledge(&temp_dir, SMALL_ECONOMY);

    mamdani()
        .arg("run")
        .arg("-k")
        .arg(&knowledge)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No inputs given"))
        .stderr(predicate::str::contains("inflation, unemployment"));
}

#[test]
fn test_cli_run_invalid_input_syntax() {
    let temp_dir = TempDir::new().unwrap();
    let knowledge = write_knowledge(&temp_dir, SMALL_ECONOMY);

    mamdani()
        .args(["run", "inflation=high", "unemployment=3", "-k"])
        .arg(&knowledge)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}

#[test]
fn test_cli_run_no_rule_fired() {
    let temp_dir = TempDir::new().unwrap();
    let knowledge = write_knowledge(&temp_dir, SMALL_ECONOMY);

    mamdani()
        .args(["run", "inflation=9", "unemployment=9", "-k"])
        .arg(&knowledge)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No rule fired"))
        .stderr(predicate::str::contains("--fallback"));
}

#[test]
fn test_cli_run_fallback_score() {
    let temp_dir = TempDir::new().unwrap();
    let knowledge = write_knowledge(&temp_dir, SMALL_ECONOMY);

    mamdani()
        .args(["run", "inflation=9", "unemployment=9", "--fallback", "5", "--raw", "-k"])
        .arg(&knowledge)
        .assert()
        .success()
        .stdout("5.0000 normal\n");
}

#[test]
fn test_cli_run_fallback_score_as_json() {
    let temp_dir = TempDir::new().unwrap();
    let knowledge = write_knowledge(&temp_dir, SMALL_ECONOMY);

    let output = mamdani()
        .args(["run", "inflation=9", "unemployment=9", "--fallback", "5", "--json", "-k"])
        .arg(&knowledge)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["output_variable"], "economic_condition");
    assert_eq!(json["score"], 5.0);
    assert_eq!(json["category"], "normal");
    assert_eq!(json["fallback"], true);
}

#[test]
fn test_cli_run_warns_once_about_repeated_rule() {
    let temp_dir = TempDir::new().unwrap();
    let repeated = SMALL_ECONOMY.replace(
        r#""then": "good" }"#,
        r#""then": "good" },
        { "when": "inflation is low and unemployment is low", "then": "good" }"#,
    );
    let knowledge = write_knowledge(&temp_dir, &repeated);

    let output = mamdani()
        .env_remove("RUST_LOG")
        .args(["run", "inflation=1", "unemployment=2", "--raw", "-k"])
        .arg(&knowledge)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("rule repeats an earlier rule").count(), 1);
}

#[test]
fn test_cli_run_clamps_by_default() {
    let temp_dir = TempDir::new().unwrap();
    let knowledge = write_knowledge(&temp_dir, SMALL_ECONOMY);

    mamdani()
        .args(["run", "inflation=35", "unemployment=17", "-k"])
        .arg(&knowledge)
        .assert()
        .success()
        .stdout(predicate::str::contains("35 → 20"));
}

#[test]
fn test_cli_run_reject_out_of_range() {
    let temp_dir = TempDir::new().unwrap();
    let knowledge = write_knowledge(&temp_dir, SMALL_ECONOMY);

    mamdani()
        .args(["run", "inflation=35", "unemployment=17", "--reject-out-of-range", "-k"])
        .arg(&knowledge)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Domain error: inflation = 35"));

    mamdani()
        .args(["run", "inflation=20.5", "unemployment=17", "--reject-out-of-range"])
        .args(["--tolerance", "1", "-k"])
        .arg(&knowledge)
        .assert()
        .success();
}

#[test]
fn test_cli_run_reports_bad_knowledge() {
    let temp_dir = TempDir::new().unwrap();
    let broken = SMALL_ECONOMY.replace("inflation is low", "inflation is moderate");
    let knowledge = write_knowledge(&temp_dir, &broken);

    mamdani()
        .args(["run", "inflation=1", "unemployment=1", "-k"])
        .arg(&knowledge)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no label 'moderate'"))
        .stderr(predicate::str::contains("Available labels: low, high"));
}

#[test]
fn test_cli_run_missing_knowledge_file() {
    let temp_dir = TempDir::new().unwrap();

    mamdani()
        .args(["run", "inflation=1", "-k"])
        .arg(temp_dir.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read knowledge file"));
}

#[test]
fn test_cli_run_shipped_economy() {
    let knowledge = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../knowledge/economy.json");

    mamdani()
        .arg("run")
        .args([
            "inflation=2",
            "unemployment=3",
            "economic_growth=6",
            "budget_deficit=1",
            "foreign_investment=40",
            "consumer_satisfaction=85",
            "price_stability=1",
            "hdi=0.9",
            "exports=280",
            "imports=50",
            "exchange_rate=11",
            "fx_reserves=180",
            "--raw",
            "-k",
        ])
        .arg(&knowledge)
        .assert()
        .success()
        .stdout(predicate::str::ends_with("good\n"));
}
