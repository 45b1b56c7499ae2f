//! # term-overview - Data overviews for Arrow tables
//!
//! term-overview computes a statistical overview of a tabular dataset. Every
//! column is classified from its declared type as continuous (numeric) or
//! categorical (string-like), summarized by the metric group of its class and
//! the results are assembled into two summary tables, optionally split by the
//! values of a grouping column.
//!
//! ## Quick Start
//!
//! ```rust
//! use term_overview::prelude::*;
//! use arrow::array::{ArrayRef, Float64Array, StringArray};
//! use arrow::record_batch::RecordBatch;
//! use std::sync::Arc;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let table = RecordBatch::try_from_iter(vec![
//!     ("amount", Arc::new(Float64Array::from(vec![10.0, 25.5, 7.25])) as ArrayRef),
//!     ("currency", Arc::new(StringArray::from(vec!["EUR", "USD", "EUR"])) as ArrayRef),
//! ])
//! .unwrap();
//!
//! let report = data_overview_report(&table, None).await?;
//! assert_eq!(report.continuous().num_rows(), 1);
//! assert_eq!(report.categorical().num_rows(), 1);
//!
//! let artifact = report.visualize("payments")?;
//! assert_eq!(artifact.format, ArtifactFormat::Json);
//! # Ok::<(), OverviewError>(())
//! # }).unwrap();
//! ```
//!
//! ## Architecture
//!
//! - **`classify`**: the closed [`ColumnKind`](classify::ColumnKind) classification
//! - **`select`**: ordered column selection by predicate
//! - **`metrics`**: the [`Metric`](metrics::Metric) trait and the built-in metrics
//! - **`group`**: named, ordered bundles of metrics
//! - **`request`** and **`executor`**: aggregation requests and their execution
//! - **`schema`**: flattening of structured metric output into result columns
//! - **`report`**: report generation and the [`DataOverviewReport`](report::DataOverviewReport)
//! - **`visualize`**: JSON, plain-text and Markdown renderers
//! - **`sources`**: loading tables through DataFusion
//!
//! ## Result tables
//!
//! Each report holds one table per class. Rows are (group, column) pairs; the
//! first column is `group_<key>` when grouped, then `column`, then one column
//! per metric leaf named `metric.field`, e.g. `range.min` or `moments.std`.

pub mod classify;
pub mod config;
pub mod error;
pub mod executor;
pub mod group;
pub mod logging;
pub mod metrics;
pub mod prelude;
pub mod report;
pub mod request;
pub mod schema;
pub mod select;
pub mod sources;
pub mod table;
pub mod visualize;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;

pub use error::{OverviewError, Result};
