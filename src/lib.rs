//! A host metrics collection agent.
//!
//! The core is the [`Collector`](collection::Collector) trait and its CPU
//! implementation, [`CpuCollector`](collection::CpuCollector), which produce
//! [`MetricRecord`](record::MetricRecord)s. The `qubeley` binary wires a
//! collector to a polling loop that writes one JSON record per line.

#![warn(rust_2018_idioms)]

pub mod collection;
pub mod options;
pub mod record;
pub mod runner;

pub mod utils {
    pub mod cancellation_token;
    pub mod logging;
}
