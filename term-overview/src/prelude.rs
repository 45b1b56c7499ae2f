//! Prelude for commonly used types and traits in term-overview.

pub use crate::classify::{is_categorical, is_continuous, ColumnKind};
pub use crate::config::ReportConfig;
pub use crate::error::{OverviewError, Result};
pub use crate::executor::{AggregationExecutor, LocalExecutor};
pub use crate::group::MetricGroup;
pub use crate::logging::LogConfig;
pub use crate::metrics::{Axis, Metric, MetricValue};
pub use crate::report::{data_overview_report, DataOverview, DataOverviewReport};
pub use crate::request::AggregationRequest;
pub use crate::select::{select_columns, ColumnSelector};
pub use crate::table::Column;
pub use crate::visualize::{ArtifactFormat, Renderer, VisualizationArtifact};
