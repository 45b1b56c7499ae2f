//! Execution of aggregation requests.
//!
//! An [`AggregationExecutor`] turns an [`AggregationRequest`] and a table into
//! a flat result table. The contract every implementation honors:
//!
//! - `prepare` is applied to each selected column, once per group when the
//!   request is grouped, yielding one result row per (group, column) pair;
//! - structured metric outputs are flattened into scalar columns following
//!   [`AggregationRequest::result_schema`];
//! - a request selecting no column still yields a zero-row table;
//! - a missing grouping key is reported as [`OverviewError::ColumnNotFound`]
//!   and any metric failure fails the whole request.
//!
//! [`LocalExecutor`] runs requests in process on Arrow kernels.
//!
//! [`OverviewError::ColumnNotFound`]: crate::error::OverviewError::ColumnNotFound

use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::error::Result;
use crate::metrics::MetricValue;
use crate::request::AggregationRequest;

mod local;

pub use local::LocalExecutor;

/// Executes aggregation requests against a table.
#[async_trait]
pub trait AggregationExecutor: Send + Sync + Debug {
    /// Runs `request` on `table` and returns the flattened result table.
    async fn execute(&self, request: AggregationRequest, table: &RecordBatch)
        -> Result<RecordBatch>;
}

/// The un-flattened result for one (group, column) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Display value of the grouping key; `None` for the null group or when ungrouped.
    pub group: Option<String>,
    /// Source column name.
    pub column: String,
    /// Struct of metric name to metric result, as returned by `prepare`.
    pub metrics: MetricValue,
}
