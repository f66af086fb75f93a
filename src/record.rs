//! The record shapes produced by collectors.
//!
//! Every record starts with a [`RecordEnvelope`] (when, where, and what kind),
//! followed by a source-specific payload. Consumers discriminate payloads by
//! the envelope's `metric_type`, which is also why [`MetricRecord`] serializes
//! as its inner record without an extra tag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The hostname used when the local host name could not be resolved.
pub const HOSTNAME_SENTINEL: &str = "unknown";

/// The fields shared by every record regardless of source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordEnvelope {
    /// Wall-clock time at which the sample was taken.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub hostname: String,
    /// Tag of the collector that produced the record, e.g. `"cpu"`.
    pub metric_type: String,
}

impl RecordEnvelope {
    pub fn new(
        timestamp: OffsetDateTime, hostname: impl Into<String>, metric_type: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            hostname: hostname.into(),
            metric_type: metric_type.into(),
        }
    }
}

/// A CPU sample.
///
/// Sentinels mean "not available": an empty `per_core`, an all-zero
/// `load_average`, and a `core_count` of 0. Note a `core_count` of 0 is only
/// distinguishable from a real measurement by convention.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CpuMetricRecord {
    #[serde(flatten)]
    pub envelope: RecordEnvelope,
    /// Total busy percentage. Normally within [0, 100], but never clamped.
    pub total_percent: f64,
    /// Per-core busy percentages in core-index order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub per_core: Vec<f64>,
    /// 1, 5, and 15 minute load averages.
    pub load_average: [f64; 3],
    pub core_count: usize,
    /// Open slot for additional named values.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, f64>,
}

/// A record produced by any collector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricRecord {
    Cpu(CpuMetricRecord),
}

impl MetricRecord {
    pub fn envelope(&self) -> &RecordEnvelope {
        match self {
            MetricRecord::Cpu(cpu) => &cpu.envelope,
        }
    }

    pub fn metric_type(&self) -> &str {
        &self.envelope().metric_type
    }

    pub fn hostname(&self) -> &str {
        &self.envelope().hostname
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.envelope().timestamp
    }

    /// Returns the CPU payload, if this is a CPU record.
    pub fn as_cpu(&self) -> Option<&CpuMetricRecord> {
        match self {
            MetricRecord::Cpu(cpu) => Some(cpu),
        }
    }
}

impl From<CpuMetricRecord> for MetricRecord {
    fn from(record: CpuMetricRecord) -> Self {
        MetricRecord::Cpu(record)
    }
}
