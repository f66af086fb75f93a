//! Data collection for CPU usage and load average.
//!
//! [`CpuCollector`] applies a two-tier policy. The total busy percentage is
//! critical: if it can't be measured, no record is produced. Per-core usage,
//! load averages, and the core count are enrichments: a failure in any of
//! them is reported to the [`DiagnosticSink`] and replaced by a sentinel.

pub mod sysinfo;

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use time::OffsetDateTime;

pub use self::sysinfo::SysinfoCpuSource;
use super::{
    diagnostics::{Diagnostic, DiagnosticSink, Enrichment, LogSink},
    error::{CollectionError, CollectionResult},
    Collector,
};
use crate::record::{CpuMetricRecord, MetricRecord, RecordEnvelope, HOSTNAME_SENTINEL};

/// 1, 5, and 15 minute load averages.
pub type LoadAvgHarvest = [f64; 3];

/// The `metric_type` of CPU records.
pub const CPU_METRIC_TYPE: &str = "cpu";

/// How long the total utilization query blocks for by default.
pub const DEFAULT_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// The default sampling cadence.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

const LOAD_AVG_SENTINEL: LoadAvgHarvest = [0.0; 3];

/// The OS-level capability that supplies raw CPU counters.
///
/// Every query may fail independently.
pub trait CpuSource: Send + Sync {
    /// Busy percentage of the whole machine measured over `window`. Blocks for
    /// about `window`.
    fn total_utilization(&self, window: Duration) -> CollectionResult<Vec<f64>>;

    /// Busy percentage of each logical core in core-index order. A zero
    /// `window` reuses the previous measurement where the source can.
    fn per_core_utilization(&self, window: Duration) -> CollectionResult<Vec<f64>>;

    fn load_average(&self) -> CollectionResult<LoadAvgHarvest>;

    fn logical_core_count(&self) -> CollectionResult<usize>;

    /// The local host name, if it can be resolved.
    fn host_name(&self) -> Option<String>;
}

/// Samples CPU utilization, load averages, and the core count.
///
/// [`Collector::collect`] blocks for the sample window (one second by
/// default). A single instance is only as safe to call concurrently as its
/// [`CpuSource`]; the sysinfo source serializes overlapping calls.
pub struct CpuCollector<S = SysinfoCpuSource> {
    source: S,
    interval: Duration,
    sample_window: Duration,
    collect_per_core: bool,
    hostname: String,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl CpuCollector<SysinfoCpuSource> {
    /// Creates a collector backed by sysinfo that logs diagnostics.
    pub fn new(interval: Duration, collect_per_core: bool) -> Self {
        Self::builder(SysinfoCpuSource::new())
            .interval(interval)
            .collect_per_core(collect_per_core)
            .build()
    }
}

impl<S: CpuSource> CpuCollector<S> {
    pub fn builder(source: S) -> CpuCollectorBuilder<S> {
        CpuCollectorBuilder::new(source)
    }

    /// The host name every record from this collector carries.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn sample_window(&self) -> Duration {
        self.sample_window
    }

    pub fn collects_per_core(&self) -> bool {
        self.collect_per_core
    }

    fn total_percent(&self) -> CollectionResult<f64> {
        let percentages = self
            .source
            .total_utilization(self.sample_window)
            .map_err(|err| CollectionError::critical("cpu.total_percent", err.to_string()))?;

        percentages.first().copied().ok_or_else(|| {
            CollectionError::critical("cpu.total_percent", CollectionError::NoData.to_string())
        })
    }

    fn per_core_percent(&self) -> Vec<f64> {
        if !self.collect_per_core {
            return Vec::new();
        }

        // The total query just sampled a full window, so reuse it.
        self.enrichment(
            Enrichment::PerCore,
            self.source.per_core_utilization(Duration::ZERO),
            Vec::new(),
        )
    }

    fn load_average(&self) -> LoadAvgHarvest {
        self.enrichment(
            Enrichment::LoadAverage,
            self.source.load_average(),
            LOAD_AVG_SENTINEL,
        )
    }

    fn core_count(&self) -> usize {
        self.enrichment(Enrichment::CoreCount, self.source.logical_core_count(), 0)
    }

    fn enrichment<T>(&self, enrichment: Enrichment, result: CollectionResult<T>, sentinel: T) -> T {
        match result {
            Ok(value) => value,
            Err(err) => {
                self.diagnostics.notice(Diagnostic::EnrichmentUnavailable {
                    enrichment,
                    reason: err.to_string(),
                });
                sentinel
            }
        }
    }
}

impl<S: CpuSource> Collector for CpuCollector<S> {
    fn collect(&self) -> CollectionResult<MetricRecord> {
        let now = OffsetDateTime::now_utc();
        let total_percent = self.total_percent()?;

        let per_core = self.per_core_percent();
        let load_average = self.load_average();
        let core_count = self.core_count();

        Ok(CpuMetricRecord {
            envelope: RecordEnvelope::new(now, self.hostname.as_str(), self.name()),
            total_percent,
            per_core,
            load_average,
            core_count,
            extra: BTreeMap::new(),
        }
        .into())
    }

    fn name(&self) -> &'static str {
        CPU_METRIC_TYPE
    }

    fn interval(&self) -> Duration {
        self.interval
    }
}

impl<S> std::fmt::Debug for CpuCollector<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuCollector")
            .field("interval", &self.interval)
            .field("sample_window", &self.sample_window)
            .field("collect_per_core", &self.collect_per_core)
            .field("hostname", &self.hostname)
            .finish_non_exhaustive()
    }
}

/// Builds a [`CpuCollector`].
pub struct CpuCollectorBuilder<S> {
    source: S,
    interval: Duration,
    sample_window: Duration,
    collect_per_core: bool,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl<S: CpuSource> CpuCollectorBuilder<S> {
    fn new(source: S) -> Self {
        Self {
            source,
            interval: DEFAULT_INTERVAL,
            sample_window: DEFAULT_SAMPLE_WINDOW,
            collect_per_core: true,
            diagnostics: Arc::new(LogSink),
        }
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// How long the total utilization query samples for. The query always
    /// blocks for this long.
    pub fn sample_window(mut self, sample_window: Duration) -> Self {
        self.sample_window = sample_window;
        self
    }

    pub fn collect_per_core(mut self, collect_per_core: bool) -> Self {
        self.collect_per_core = collect_per_core;
        self
    }

    pub fn diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Resolves the host name and returns the collector. This never fails; an
    /// unresolvable host name is replaced by [`HOSTNAME_SENTINEL`].
    pub fn build(self) -> CpuCollector<S> {
        let hostname = match self.source.host_name() {
            Some(hostname) => hostname,
            None => {
                self.diagnostics.notice(Diagnostic::HostnameUnresolved);
                HOSTNAME_SENTINEL.to_string()
            }
        };

        CpuCollector {
            source: self.source,
            interval: self.interval,
            sample_window: self.sample_window,
            collect_per_core: self.collect_per_core,
            hostname,
            diagnostics: self.diagnostics,
        }
    }
}
