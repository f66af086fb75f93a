//! Out-of-band notices about degraded collection.
//!
//! Failures that do not abort a collection are reported here rather than
//! through the data path. Collectors receive a [`DiagnosticSink`] at
//! construction; the default is [`LogSink`].

use std::{fmt, sync::Mutex};

/// An optional measurement that may be replaced by a sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Enrichment {
    PerCore,
    LoadAverage,
    CoreCount,
}

impl Enrichment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Enrichment::PerCore => "per-core",
            Enrichment::LoadAverage => "load-average",
            Enrichment::CoreCount => "core-count",
        }
    }
}

impl fmt::Display for Enrichment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal event raised while constructing or running a collector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// The local host name could not be resolved; the sentinel is used instead.
    HostnameUnresolved,
    /// An enrichment could not be measured; its sentinel is used instead.
    EnrichmentUnavailable {
        enrichment: Enrichment,
        reason: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::HostnameUnresolved => {
                write!(f, "unable to resolve the local hostname")
            }
            Diagnostic::EnrichmentUnavailable { enrichment, reason } => {
                write!(f, "failed to get {enrichment} stats: {reason}")
            }
        }
    }
}

/// Receives [`Diagnostic`]s.
pub trait DiagnosticSink: Send + Sync {
    fn notice(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the [`log`] facade as warnings.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn notice(&self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
    }
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    notices: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything received so far, oldest first.
    pub fn notices(&self) -> Vec<Diagnostic> {
        match self.notices.lock() {
            Ok(notices) => notices.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DiagnosticSink for RecordingSink {
    fn notice(&self, diagnostic: Diagnostic) {
        match self.notices.lock() {
            Ok(mut notices) => notices.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }
}
