pub mod cpu;
pub mod logging;

use serde::{Deserialize, Serialize};

use self::{cpu::CpuConfig, logging::LoggingConfig};

/// The config file.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[cfg_attr(test, serde(deny_unknown_fields))]
pub struct Config {
    #[serde(default)]
    pub cpu: CpuConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// A value that may be given either as a string or as a number, e.g. a
/// duration as `"5s"` or as `5000` (milliseconds).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StringOrNum {
    String(String),
    Num(u64),
}
