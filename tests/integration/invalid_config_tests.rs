//! These tests are for testing some invalid config-file-specific options.

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::util::qubeley_command;

#[test]
fn test_toml_mismatch_type() {
    qubeley_command(&["-C", "./tests/invalid_configs/toml_mismatch_type.toml"])
        .arg("--once")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid type"));
}

#[test]
fn test_not_toml() {
    qubeley_command(&["-C", "./tests/invalid_configs/not_toml.toml"])
        .arg("--once")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file error"));
}

#[test]
fn test_bad_interval() {
    qubeley_command(&["-C", "./tests/invalid_configs/bad_interval.toml"])
        .arg("--once")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'cpu.interval' was set with an invalid value",
        ));
}

#[test]
fn test_window_longer_than_interval() {
    qubeley_command(&[
        "-C",
        "./tests/invalid_configs/window_longer_than_interval.toml",
    ])
    .arg("--once")
    .assert()
    .failure()
    .stderr(predicate::str::contains(
        "'cpu.sample_window' cannot be longer than the collection interval",
    ));
}

#[test]
fn test_bad_log_level() {
    qubeley_command(&["-C", "./tests/invalid_configs/bad_log_level.toml"])
        .arg("--once")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'logging.level' was set with an invalid value",
        ));
}
