//! These tests run the agent end to end and check what it writes.

use std::io::Write;

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::util::{no_cfg_qubeley_command, qubeley_command};

fn records(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_once_writes_one_cpu_record() {
    let output = no_cfg_qubeley_command()
        .args(["--once", "-w", "250ms"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let records = records(&output);
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record["metric_type"], "cpu");
    assert!(record["total_percent"].is_number());
    assert!(record["timestamp"].is_string());
    assert!(record["hostname"].is_string());
    assert_eq!(record["load_average"].as_array().unwrap().len(), 3);

    // Per-core is on by default, one entry per logical core.
    let core_count = record["core_count"].as_u64().unwrap();
    if core_count > 0 {
        assert_eq!(
            record["per_core"].as_array().unwrap().len() as u64,
            core_count
        );
    }
}

#[test]
fn test_count() {
    let output = no_cfg_qubeley_command()
        .args(["-n", "2", "-i", "300ms", "-w", "250ms", "--no-per-core"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let records = records(&output);
    assert_eq!(records.len(), 2);
    for record in records {
        assert_eq!(record["metric_type"], "cpu");
        assert!(record.get("per_core").is_none());
    }
}

#[test]
fn test_all_options_config() {
    qubeley_command(&["-C", "./tests/valid_configs/all_options.toml"])
        .arg("--once")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"metric_type\":\"cpu\""))
        .stdout(predicate::str::contains("per_core").not());
}

#[test]
fn test_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("qubeley.log");
    let config_path = dir.path().join("qubeley.toml");

    let mut config = std::fs::File::create(&config_path).unwrap();
    writeln!(config, "[cpu]\nsample_window = \"250ms\"").unwrap();
    writeln!(config, "[logging]\nlevel = \"debug\"\nfile = {:?}", log_path.to_str().unwrap()).unwrap();
    drop(config);

    qubeley_command(&["-C", config_path.to_str().unwrap()])
        .arg("--once")
        .assert()
        .success();

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("starting the 'cpu' collector"));
}
