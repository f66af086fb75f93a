//! These tests are mostly here just to ensure that invalid results will be
//! caught when passing arguments.

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::util::no_cfg_qubeley_command;

#[test]
fn test_zero_interval() {
    no_cfg_qubeley_command()
        .arg("-i")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("'--interval' must be greater than 0"));
}

#[test]
fn test_invalid_interval() {
    no_cfg_qubeley_command()
        .arg("-i")
        .arg("whenever")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'--interval' was set with an invalid value",
        ));
}

#[test]
fn test_window_longer_than_interval() {
    no_cfg_qubeley_command()
        .args(["-i", "1s", "-w", "5s"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'--sample-window' cannot be longer than the collection interval",
        ));
}

#[test]
fn test_zero_count() {
    no_cfg_qubeley_command()
        .args(["-n", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'--count' must be greater than 0"));
}

#[test]
fn test_conflicting_per_core() {
    no_cfg_qubeley_command()
        .args(["--per-core", "--no-per-core"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_bad_log_level() {
    no_cfg_qubeley_command()
        .args(["--once", "--log-level", "loud"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'--log-level' was set with an invalid value",
        ));
}

#[test]
fn test_missing_config_file() {
    crate::util::qubeley_command(&["-C", "./tests/valid_configs/does_not_exist.toml"])
        .arg("--once")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to read"));
}

#[test]
fn test_help() {
    no_cfg_qubeley_command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("CPU Options"));
}

#[test]
fn test_version() {
    no_cfg_qubeley_command()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
