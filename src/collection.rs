//! Metric collection.
//!
//! A [`Collector`] samples one category of host metrics and returns a
//! [`MetricRecord`]. Collectors don't schedule themselves; whatever embeds
//! them calls [`Collector::collect`] roughly every [`Collector::interval`].

pub mod cpu;
pub mod diagnostics;
pub mod error;

use std::time::Duration;

pub use self::{
    cpu::{CpuCollector, CpuCollectorBuilder, CpuSource, SysinfoCpuSource},
    diagnostics::{Diagnostic, DiagnosticSink, Enrichment, LogSink, RecordingSink},
    error::{CollectionError, CollectionResult},
};
use crate::record::MetricRecord;

/// A source of host metrics.
///
/// Each call to [`collect`](Collector::collect) is independent: a collector
/// only carries the configuration it was built with.
pub trait Collector: Send + Sync {
    /// Takes one sample. This may block (see the implementation's docs).
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::CriticalMetricUnavailable`] if a
    /// measurement the record cannot exist without failed. Any other failure
    /// is absorbed into a sentinel value inside the returned record.
    fn collect(&self) -> CollectionResult<MetricRecord>;

    /// A stable lowercase identifier, also used as the record's `metric_type`.
    fn name(&self) -> &'static str;

    /// How often this collector should be sampled. Advisory only.
    fn interval(&self) -> Duration;
}

impl<C: Collector + ?Sized> Collector for Box<C> {
    fn collect(&self) -> CollectionResult<MetricRecord> {
        (**self).collect()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn interval(&self) -> Duration {
        (**self).interval()
    }
}
