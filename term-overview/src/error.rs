//! Error types for overview report generation.
//!
//! Every fallible operation in this crate returns [`OverviewError`]. Failures
//! are never retried or recovered locally: a selection error or a failing
//! metric aborts the whole report-generation call.

use thiserror::Error;

/// The main error type for overview report generation.
#[derive(Error, Debug)]
pub enum OverviewError {
    /// A column referenced by a request (typically the grouping key) is not in the table.
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound {
        /// Name of the missing column
        column: String,
    },

    /// A metric failed while a metric group prepared a column.
    #[error("Metric '{metric}' failed on column '{column}': {source}")]
    MetricCompute {
        /// Name of the metric within its group
        metric: String,
        /// Column the metric was applied to
        column: String,
        /// Underlying failure reported by the metric
        #[source]
        source: Box<OverviewError>,
    },

    /// Grouping produced more distinct groups than allowed.
    #[error("Grouping produced {found} groups, exceeding the limit of {limit}")]
    TooManyGroups {
        /// Number of distinct groups found
        found: usize,
        /// Configured maximum
        limit: usize,
    },

    /// Both summary tables are empty, so there is nothing to render.
    #[error("Cannot visualize an overview report with no rows")]
    EmptyReport,

    /// Data did not have the shape or type a computation expected.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Invalid configuration or parameters.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An operation is not supported for the given input.
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error from Arrow operations.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error from DataFusion operations.
    #[error("DataFusion error: {0}")]
    DataFusion(#[from] datafusion::error::DataFusionError),
}

/// A type alias for `Result<T, OverviewError>`.
pub type Result<T> = std::result::Result<T, OverviewError>;

impl OverviewError {
    /// Creates a column-not-found error.
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }

    /// Wraps a metric failure with the metric and column it happened on.
    pub fn metric_compute(
        metric: impl Into<String>,
        column: impl Into<String>,
        source: OverviewError,
    ) -> Self {
        Self::MetricCompute {
            metric: metric.into(),
            column: column.into(),
            source: Box::new(source),
        }
    }

    /// Creates an invalid data error with the given message.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Creates an invalid configuration error with the given message.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Returns true for errors caused by referencing columns the dataset lacks.
    pub fn is_selection_error(&self) -> bool {
        matches!(self, Self::ColumnNotFound { .. })
    }
}

impl From<serde_json::Error> for OverviewError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
