//! Tests for the `massbal evaluate` and `massbal history` commands

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn massbal_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("target/debug/massbal")
}

const SAMPLE: &str = r#"
sample_id = "STR-0099"
analyst = "J. Okafor"
stress = "Oxidative"
initial_api_assay = 98.0
stressed_api_assay = 82.5
initial_degradants = 0.5
stressed_degradants = 4.9
parent_mw = 500.0
degradant_mw = 250.0
rrf = 0.80
"#;

#[test]
fn evaluate_prints_text_report() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("sample.toml");
    fs::write(&file, SAMPLE).unwrap();

    let output = Command::new(massbal_binary())
        .arg("evaluate")
        .arg(&file)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Sample ID : STR-0099"));
    assert!(stdout.contains("Recommended method : RMB"));
    assert!(stdout.contains("FINAL STATUS: OOS"));
    assert!(stdout.contains("FAIL: UV-Silent Impurity. Rec: CAD Detection."));
}

#[test]
fn evaluate_json_parses_back() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("sample.toml");
    fs::write(&file, SAMPLE).unwrap();

    let output = Command::new(massbal_binary())
        .args(["evaluate", "--format", "json"])
        .arg(&file)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(parsed["sample"]["sample_id"], "STR-0099");
    assert_eq!(parsed["result"]["status"], "Oos");
    assert_eq!(parsed["result"]["recommended_method"], "Rmb");
}

#[test]
fn evaluate_rejects_unknown_format() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("sample.toml");
    fs::write(&file, SAMPLE).unwrap();

    let output = Command::new(massbal_binary())
        .args(["evaluate", "--format", "pdf"])
        .arg(&file)
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown format"));
}

#[test]
fn evaluate_rejects_invalid_sample() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("bad.toml");
    fs::write(
        &file,
        r#"
        sample_id = "BAD-01"
        initial_api_assay = 98.0
        stressed_api_assay = 92.0
        stressed_degradants = 5.0
        rrf = 0.0
        "#,
    )
    .unwrap();

    let output = Command::new(massbal_binary())
        .arg("evaluate")
        .arg(&file)
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("relative response factor"));
}

#[test]
fn evaluate_writes_output_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("sample.toml");
    let report = dir.path().join("report.txt");
    fs::write(&file, SAMPLE).unwrap();

    let output = Command::new(massbal_binary())
        .arg("evaluate")
        .arg(&file)
        .arg("--output")
        .arg(&report)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let content = fs::read_to_string(&report).unwrap();
    assert!(content.contains("MASS BALANCE DIAGNOSTIC REPORT"));
}

#[test]
fn history_records_and_filters() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("sample.toml");
    let store = dir.path().join("history.jsonl");
    fs::write(&file, SAMPLE).unwrap();

    // Two evaluations into the same store
    for _ in 0..2 {
        let output = Command::new(massbal_binary())
            .arg("evaluate")
            .arg(&file)
            .arg("--history")
            .arg(&store)
            .output()
            .expect("Failed to execute command");
        assert!(output.status.success(), "evaluate --history should succeed");
    }

    // Matching filter lists both
    let output = Command::new(massbal_binary())
        .arg("history")
        .arg(&store)
        .args(["--analyst", "okafor", "--stress", "Oxidative"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "history should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("STR-0099"));
    assert!(stdout.contains("2 evaluation(s)"));

    // Non-matching stress filter lists none
    let output = Command::new(massbal_binary())
        .arg("history")
        .arg(&store)
        .args(["--stress", "Thermal"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No matching evaluations"));
}
