//! Error code related to data collection.

use std::borrow::Cow;

use thiserror::Error;

/// A type alias for handling collection-related errors.
pub type CollectionResult<T> = std::result::Result<T, CollectionError>;

/// The errors that can happen with data collection.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// A measurement the record cannot exist without could not be taken. This
    /// is the only error a [`Collector`](crate::collection::Collector) returns.
    #[error("critical metric '{metric}' unavailable: {reason}")]
    CriticalMetricUnavailable {
        metric: &'static str,
        reason: Cow<'static, str>,
    },
    /// The measurement is not supported on this platform.
    #[error("this type of data collection is not supported on this platform")]
    Unsupported,
    /// The query succeeded but returned no data points.
    #[error("no data points were returned")]
    NoData,
    /// An error when there is an IO exception.
    #[error(transparent)]
    InvalidIo(#[from] std::io::Error),
    /// A generic error.
    #[error("source: {0}, reason: {1}")]
    Other(Cow<'static, str>, Cow<'static, str>),
}

impl CollectionError {
    /// A generic error.
    pub fn other<C: Into<Cow<'static, str>>, D: Into<Cow<'static, str>>>(
        source: C, reason: D,
    ) -> Self {
        Self::Other(source.into(), reason.into())
    }

    /// Wraps the failure of a mandatory measurement.
    pub fn critical<R: Into<Cow<'static, str>>>(metric: &'static str, reason: R) -> Self {
        Self::CriticalMetricUnavailable {
            metric,
            reason: reason.into(),
        }
    }

    /// Returns whether this error should abort a collection.
    pub fn is_critical(&self) -> bool {
        matches!(self, CollectionError::CriticalMetricUnavailable { .. })
    }
}
