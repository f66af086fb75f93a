use serde::{Deserialize, Serialize};

/// Logging settings.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[cfg_attr(test, serde(deny_unknown_fields))]
pub struct LoggingConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, or `trace`.
    pub level: Option<String>,
    /// Where to write logs. Defaults to stderr.
    pub file: Option<String>,
}
