use serde::{Deserialize, Serialize};

use super::StringOrNum;

/// CPU collector settings.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[cfg_attr(test, serde(deny_unknown_fields))]
pub struct CpuConfig {
    pub interval: Option<StringOrNum>,
    pub sample_window: Option<StringOrNum>,
    pub per_core: Option<bool>,
}
