use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const SCENARIO: &str = "Equipment Name,Type,Flowrate,Pressure,Temperature\n\
                        P-101,Pump,45.5,2.2,24.0\n\
                        P-102,Pump,50.2,2.4,25.5\n";

fn equiptrack(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("equiptrack").unwrap();
    cmd.arg("--db").arg(db).env_remove("EQUIPTRACK_RETENTION");
    cmd
}

fn write_csv(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("equiptrack").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Equipment dataset summaries"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("equiptrack").unwrap();
    cmd.arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_ingest_prints_summary() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cli.db");
    let csv = write_csv(&dir, "plant.csv", SCENARIO);

    equiptrack(&db)
        .args(["ingest", "--owner", "alice"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"record_count\": 2"))
        .stdout(predicate::str::contains("\"mean_flowrate\": 47.85"))
        .stdout(predicate::str::contains("\"source_name\": \"plant.csv\""));
}

#[test]
fn test_ingest_missing_column_fails() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cli.db");
    let csv = write_csv(&dir, "bad.csv", "Type,Flowrate,Temperature\nPump,1,1\n");

    equiptrack(&db)
        .args(["ingest", "--owner", "alice"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("pressure"));
}

#[test]
fn test_list_is_owner_scoped_and_bounded() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cli.db");
    let csv = write_csv(&dir, "plant.csv", SCENARIO);

    for _ in 0..6 {
        equiptrack(&db).args(["ingest", "--owner", "alice"]).arg(&csv).assert().success();
    }

    let output = equiptrack(&db).args(["list", "--owner", "alice"]).output().unwrap();
    assert!(output.status.success());
    let listed: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listed.len(), 5);

    let output = equiptrack(&db).args(["list", "--owner", "bob"]).output().unwrap();
    let listed: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert!(listed.is_empty());
}

#[test]
fn test_get_foreign_dataset_fails() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cli.db");
    let csv = write_csv(&dir, "plant.csv", SCENARIO);

    let output = equiptrack(&db).args(["ingest", "--owner", "alice"]).arg(&csv).output().unwrap();
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let id = summary["id"].as_i64().unwrap().to_string();

    equiptrack(&db)
        .args(["get", &id, "--owner", "bob"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
    equiptrack(&db).args(["get", &id, "--owner", "alice"]).assert().success();
}

#[test]
fn test_summary_for_new_owner_is_zero() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cli.db");

    equiptrack(&db)
        .args(["summary", "--owner", "nobody"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dataset_count\": 0"));
}

#[test]
fn test_report_writes_file() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cli.db");
    let csv = write_csv(&dir, "plant.csv", SCENARIO);
    let out = dir.path().join("report.txt");

    let output = equiptrack(&db).args(["ingest", "--owner", "alice"]).arg(&csv).output().unwrap();
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let id = summary["id"].as_i64().unwrap().to_string();

    equiptrack(&db)
        .args(["report", &id, "--owner", "alice", "--out"])
        .arg(&out)
        .assert()
        .success();

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("Dataset Analysis Report: plant.csv"));
}
