//! Tests that drive the library API with a source implemented outside the crate.

use std::{sync::Arc, time::Duration};

use qubeley::{
    collection::{
        cpu::LoadAvgHarvest, CollectionError, CollectionResult, Collector, CpuCollector,
        CpuSource, Diagnostic, Enrichment, RecordingSink,
    },
    record::{MetricRecord, HOSTNAME_SENTINEL},
};

/// A machine without load averages or a resolvable host name.
struct BareSource {
    total: Vec<f64>,
}

impl CpuSource for BareSource {
    fn total_utilization(&self, _window: Duration) -> CollectionResult<Vec<f64>> {
        Ok(self.total.clone())
    }

    fn per_core_utilization(&self, _window: Duration) -> CollectionResult<Vec<f64>> {
        Ok(vec![5.0, 15.0])
    }

    fn load_average(&self) -> CollectionResult<LoadAvgHarvest> {
        Err(CollectionError::Unsupported)
    }

    fn logical_core_count(&self) -> CollectionResult<usize> {
        Ok(2)
    }

    fn host_name(&self) -> Option<String> {
        None
    }
}

#[test]
fn degraded_record_is_still_a_record() {
    let sink = Arc::new(RecordingSink::new());
    let collector = CpuCollector::builder(BareSource { total: vec![63.0] })
        .interval(Duration::from_secs(10))
        .diagnostics(sink.clone())
        .build();

    let MetricRecord::Cpu(record) = collector.collect().unwrap();

    assert_eq!(record.envelope.hostname, HOSTNAME_SENTINEL);
    assert_eq!(record.envelope.metric_type, "cpu");
    assert_eq!(record.total_percent, 63.0);
    assert_eq!(record.per_core, vec![5.0, 15.0]);
    assert_eq!(record.load_average, [0.0; 3]);
    assert_eq!(record.core_count, 2);

    let notices = sink.notices();
    assert_eq!(notices[0], Diagnostic::HostnameUnresolved);
    assert_eq!(
        notices[1],
        Diagnostic::EnrichmentUnavailable {
            enrichment: Enrichment::LoadAverage,
            reason: CollectionError::Unsupported.to_string(),
        }
    );
}

#[test]
fn empty_total_produces_no_record() {
    let collector = CpuCollector::builder(BareSource { total: vec![] })
        .diagnostics(Arc::new(RecordingSink::new()))
        .build();

    assert!(matches!(
        collector.collect(),
        Err(CollectionError::CriticalMetricUnavailable { .. })
    ));
}

#[test]
fn collectors_are_interchangeable() {
    let collectors: Vec<Box<dyn Collector>> = vec![
        Box::new(
            CpuCollector::builder(BareSource { total: vec![1.0] })
                .interval(Duration::from_secs(1))
                .diagnostics(Arc::new(RecordingSink::new()))
                .build(),
        ),
        Box::new(
            CpuCollector::builder(BareSource { total: vec![2.0] })
                .interval(Duration::from_secs(2))
                .collect_per_core(false)
                .diagnostics(Arc::new(RecordingSink::new()))
                .build(),
        ),
    ];

    let intervals = collectors
        .iter()
        .map(|collector| collector.interval())
        .collect::<Vec<_>>();
    assert_eq!(intervals, [Duration::from_secs(1), Duration::from_secs(2)]);

    for collector in &collectors {
        assert_eq!(collector.name(), "cpu");
        assert_eq!(collector.collect().unwrap().metric_type(), collector.name());
    }
}
