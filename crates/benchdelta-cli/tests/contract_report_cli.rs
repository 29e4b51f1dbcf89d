#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::tempdir;

fn benchdelta(cwd: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("benchdelta").unwrap();
    cmd.current_dir(cwd)
        .env_remove("BENCHDELTA_INPUT")
        .env_remove("BENCHDELTA_CONFIG")
        .env_remove("BENCHDELTA_BENCH_ROOT")
        .env_remove("BENCHDELTA_THRESHOLD")
        .env("RUST_LOG", "warn");
    cmd
}

fn doc(run_id: &str, p95: f64) -> serde_json::Value {
    json!({
        "metadata": {"runId": run_id, "nodeVersion": "v22.1.0"},
        "modules": {"apiWrite": {"endpointMetrics": [{
            "endpointName": "clients-create",
            "path": "/api/clients",
            "tier": "load",
            "method": "POST",
            "p95Ms": p95,
            "throughputRps": 20.0,
            "errorRatePct": 0.0,
            "statuses": {"201": 40}
        }]}}
    })
}

#[test]
fn report_writes_summary_next_to_input() {
    let dir = tempdir().unwrap();
    let run_dir = dir.path().join("run-2");
    fs::create_dir_all(&run_dir).unwrap();
    let input = run_dir.join("raw.json");
    fs::write(&input, doc("run-2", 80.0).to_string()).unwrap();

    benchdelta(dir.path())
        .arg("report")
        .arg("--input")
        .arg(&input)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("summary.md"));

    let summary = fs::read_to_string(run_dir.join("summary.md")).unwrap();
    assert!(summary.contains("- Run ID: `run-2`"));
    assert!(summary.contains("- Node: `v22.1.0`"));
    assert!(summary.contains("## API Write"));
    assert!(summary.contains("clients-create"));
    assert!(summary.contains("## API Core\nNo metrics captured."));
}

#[test]
fn report_against_baseline_writes_delta_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("now.json");
    let baseline = dir.path().join("base.json");
    fs::write(&input, doc("run-2", 80.0).to_string()).unwrap();
    fs::write(&baseline, doc("run-1", 100.0).to_string()).unwrap();

    benchdelta(dir.path())
        .arg("report")
        .arg("--input")
        .arg(&input)
        .arg("--against")
        .arg(&baseline)
        .assert()
        .code(0);

    assert!(dir.path().join("summary.md").is_file());
    let delta = fs::read_to_string(dir.path().join("delta-vs-run-1.md")).unwrap();
    assert!(delta.contains("- Against Run: `run-1`"));
    assert!(delta.contains("| clients-create | load | -20.00 | 0.00 | 0.00 | improved |"));
}

#[test]
fn output_names_the_summary_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("now.json");
    let baseline = dir.path().join("base.json");
    fs::write(&input, doc("run-2", 80.0).to_string()).unwrap();
    fs::write(&baseline, doc("run-1", 100.0).to_string()).unwrap();
    let out = dir.path().join("out").join("summary-custom.md");

    benchdelta(dir.path())
        .arg("report")
        .arg("--input")
        .arg(&input)
        .arg("--against")
        .arg(&baseline)
        .arg("--output")
        .arg(&out)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("summary-custom.md"));

    assert!(out.is_file());
    let summary = fs::read_to_string(&out).unwrap();
    assert!(summary.contains("- Run ID: `run-2`"));
    assert!(!dir.path().join("out").join("summary.md").exists());
    assert!(dir.path().join("out").join("delta-vs-run-1.md").is_file());
}

#[test]
fn invalid_config_file_exits_two() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("raw.json");
    fs::write(&input, doc("run-2", 80.0).to_string()).unwrap();
    fs::write(dir.path().join("benchdelta.yaml"), "duplicate_keys: sometimes\n").unwrap();

    benchdelta(dir.path())
        .arg("report")
        .arg("--input")
        .arg(&input)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to load config"));
}
