//! Tests for the `massbal trend` command

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

const STUDY: &str = r#"
name = "Accelerated 40C/75RH"

[[points]]
day = 0
[points.sample]
sample_id = "T0"
initial_api_assay = 99.5
stressed_api_assay = 99.5
initial_degradants = 0.3
stressed_degradants = 0.3

[[points]]
day = 7
[points.sample]
sample_id = "T7"
initial_api_assay = 99.5
stressed_api_assay = 98.0
initial_degradants = 0.3
stressed_degradants = 1.7

[[points]]
day = 30
[points.sample]
sample_id = "T30"
initial_api_assay = 99.5
stressed_api_assay = 93.8
initial_degradants = 0.3
stressed_degradants = 5.9
"#;

#[test]
fn trend_prints_one_row_per_timepoint() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("study.toml");
    fs::write(&file, STUDY).unwrap();

    let output = Command::new(massbal_binary())
        .arg("trend")
        .arg(&file)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Trend: Accelerated 40C/75RH"));
    // Title + header + 3 data rows
    assert_eq!(stdout.lines().count(), 5);
    assert!(stdout.contains("PASS"));
}

#[test]
fn trend_rejects_empty_study() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("empty.toml");
    fs::write(&file, "name = \"Empty\"\n").unwrap();

    let output = Command::new(massbal_binary())
        .arg("trend")
        .arg(&file)
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no timepoints"));
}

#[test]
fn trend_writes_output_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("study.toml");
    let table = dir.path().join("trend.txt");
    fs::write(&file, STUDY).unwrap();

    let output = Command::new(massbal_binary())
        .arg("trend")
        .arg(&file)
        .arg("--output")
        .arg(&table)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let content = fs::read_to_string(&table).unwrap();
    assert!(content.contains("LK-IMB"));
}
