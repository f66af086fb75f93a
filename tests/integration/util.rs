use std::{ffi::OsString, path::Path, process::Command};

pub fn abs_path(path: &str) -> OsString {
    let path = Path::new(path);

    if path.exists() {
        path.canonicalize().unwrap().into_os_string()
    } else {
        // We are going to trust that the path given is valid...
        path.to_owned().into_os_string()
    }
}

const QUBELEY_EXE_PATH: &str = env!("CARGO_BIN_EXE_qubeley");
const DEFAULT_CFG: [&str; 2] = ["-C", "./tests/valid_configs/empty_config.toml"];

/// Returns the [`Command`] of a binary invocation of qubeley. Config paths
/// given with `-C` are made absolute.
pub fn qubeley_command(args: &[&str]) -> Command {
    let mut cmd = Command::new(QUBELEY_EXE_PATH);

    let mut prev = "";
    for arg in args.iter() {
        if prev == "-C" {
            // This is the config file; make sure we set it to absolute path!
            cmd.arg(abs_path(arg));
        } else {
            cmd.arg(arg);
        }

        prev = arg;
    }

    cmd
}

/// Returns the [`Command`] of a binary invocation of qubeley with the empty
/// config file, so a config in the user's config directory can't interfere.
pub fn no_cfg_qubeley_command() -> Command {
    qubeley_command(&DEFAULT_CFG)
}
