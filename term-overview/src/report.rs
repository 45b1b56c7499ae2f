//! Data overview reports.
//!
//! [`DataOverview`] builds one continuous and one categorical
//! [`AggregationRequest`] for a table, executes both and wraps the two result
//! tables into a [`DataOverviewReport`].
//!
//! # Example
//!
//! ```rust
//! use arrow::array::{ArrayRef, Int64Array, StringArray};
//! use arrow::record_batch::RecordBatch;
//! use std::sync::Arc;
//! use term_overview::config::ReportConfig;
//! use term_overview::report::DataOverview;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let table = RecordBatch::try_from_iter(vec![
//!     ("x", Arc::new(Int64Array::from(vec![1, 2, 3, 4])) as ArrayRef),
//!     ("y", Arc::new(StringArray::from(vec!["a", "b", "a", "c"])) as ArrayRef),
//!     ("g", Arc::new(StringArray::from(vec!["a", "a", "b", "b"])) as ArrayRef),
//! ])
//! .unwrap();
//!
//! let report = DataOverview::new()
//!     .with_config(ReportConfig::new().with_group_by("g"))
//!     .run(&table)
//!     .await
//!     .unwrap();
//!
//! // two groups times one selected column per class
//! assert_eq!(report.continuous().num_rows(), 2);
//! assert_eq!(report.categorical().num_rows(), 2);
//!
//! let artifact = report.visualize("example").unwrap();
//! println!("{artifact}");
//! # })
//! ```

use arrow::record_batch::RecordBatch;
use datafusion::prelude::SessionContext;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};

use crate::config::ReportConfig;
use crate::error::Result;
use crate::executor::{AggregationExecutor, LocalExecutor};
use crate::group::MetricGroup;
use crate::logging::LogConfig;
use crate::perf_debug;
use crate::request::AggregationRequest;
use crate::select::ColumnSelector;
use crate::sources::load_table;
use crate::visualize::{JsonRenderer, Renderer, VisualizationArtifact};

/// The continuous and categorical summary tables of a dataset.
///
/// Either table may have zero rows, but both are always present with their
/// full schema.
#[derive(Debug, Clone, PartialEq)]
pub struct DataOverviewReport {
    continuous: RecordBatch,
    categorical: RecordBatch,
}

impl DataOverviewReport {
    /// Wraps two result tables.
    pub fn new(continuous: RecordBatch, categorical: RecordBatch) -> Self {
        Self {
            continuous,
            categorical,
        }
    }

    /// Summary of the continuous columns.
    pub fn continuous(&self) -> &RecordBatch {
        &self.continuous
    }

    /// Summary of the categorical columns.
    pub fn categorical(&self) -> &RecordBatch {
        &self.categorical
    }

    /// Returns true when neither table has a row.
    pub fn is_empty(&self) -> bool {
        self.continuous.num_rows() == 0 && self.categorical.num_rows() == 0
    }

    /// Consumes the report, returning `(continuous, categorical)`.
    pub fn into_parts(self) -> (RecordBatch, RecordBatch) {
        (self.continuous, self.categorical)
    }

    /// Renders the report as JSON under the display name `name`.
    ///
    /// Fails with [`OverviewError::EmptyReport`] when both tables are empty.
    ///
    /// [`OverviewError::EmptyReport`]: crate::error::OverviewError::EmptyReport
    pub fn visualize(&self, name: &str) -> Result<VisualizationArtifact> {
        self.visualize_with(&JsonRenderer::default(), name)
    }

    /// Renders the report with a specific renderer.
    pub fn visualize_with(
        &self,
        renderer: &dyn Renderer,
        name: &str,
    ) -> Result<VisualizationArtifact> {
        renderer.render(&self.continuous, &self.categorical, name)
    }
}

/// Builds overview reports.
#[derive(Debug, Clone, Default)]
pub struct DataOverview {
    config: ReportConfig,
    executor: Option<Arc<dyn AggregationExecutor>>,
    log_config: LogConfig,
}

impl DataOverview {
    /// Creates a builder with the default configuration and the in-process executor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the report configuration.
    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the executor used for both requests.
    pub fn with_executor(mut self, executor: impl AggregationExecutor + 'static) -> Self {
        self.executor = Some(Arc::new(executor));
        self
    }

    /// Sets the logging configuration. The default executor logs with it as well.
    pub fn with_log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    /// The report configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Builds the `(continuous, categorical)` requests for the current configuration.
    pub fn requests(&self) -> (AggregationRequest, AggregationRequest) {
        let continuous = AggregationRequest::new(
            MetricGroup::continuous(self.config.axis),
            ColumnSelector::continuous(),
        );
        let categorical =
            AggregationRequest::new(MetricGroup::categorical(), ColumnSelector::categorical());

        let configure = |request: AggregationRequest| {
            request
                .with_group_by(self.config.group_by.as_deref())
                .with_max_groups(self.config.max_groups)
        };
        (configure(continuous), configure(categorical))
    }

    /// Generates the report for `table`.
    ///
    /// Both requests run concurrently; the first failure fails the call.
    #[instrument(skip_all, fields(
        rows = table.num_rows(),
        columns = table.num_columns(),
        group_by = ?self.config.group_by
    ))]
    pub async fn run(&self, table: &RecordBatch) -> Result<DataOverviewReport> {
        self.config.validate()?;
        let start = Instant::now();
        info!("Starting data overview");

        let executor: Arc<dyn AggregationExecutor> = match &self.executor {
            Some(executor) => Arc::clone(executor),
            None => Arc::new(LocalExecutor::with_log_config(self.log_config.clone())),
        };
        let (continuous, categorical) = self.requests();
        perf_debug!(
            self.log_config,
            continuous = ?continuous.resolve_columns(table),
            categorical = ?categorical.resolve_columns(table),
            "Resolved column selections"
        );

        let (continuous, categorical) = futures::try_join!(
            executor.execute(continuous, table),
            executor.execute(categorical, table)
        )?;

        info!(
            continuous_rows = continuous.num_rows(),
            categorical_rows = categorical.num_rows(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Data overview completed"
        );
        Ok(DataOverviewReport::new(continuous, categorical))
    }

    /// Loads the table registered under `name` and generates its report.
    pub async fn run_on_context(
        &self,
        ctx: &SessionContext,
        name: &str,
    ) -> Result<DataOverviewReport> {
        let table = load_table(ctx, name).await?;
        self.run(&table).await
    }
}

/// Generates a report with default settings, optionally grouped by `group_by`.
pub async fn data_overview_report(
    table: &RecordBatch,
    group_by: Option<&str>,
) -> Result<DataOverviewReport> {
    let mut config = ReportConfig::default();
    config.group_by = group_by.map(str::to_string);
    DataOverview::new().with_config(config).run(table).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OverviewError;
    use crate::metrics::Axis;
    use crate::test_fixtures::{empty_table, grouped_table, mixed_table, vector_column};
    use arrow::array::{ArrayRef, AsArray};
    use arrow::datatypes::Float64Type;

    #[test]
    fn test_requests_share_grouping() {
        let overview =
            DataOverview::new().with_config(ReportConfig::new().with_group_by("g").with_max_groups(5));
        let (continuous, categorical) = overview.requests();

        assert_eq!(continuous.metric_group().name(), "continuous");
        assert_eq!(categorical.metric_group().name(), "categorical");
        for request in [&continuous, &categorical] {
            assert_eq!(request.group_by(), Some("g"));
            assert_eq!(request.max_groups(), Some(5));
        }
    }

    #[tokio::test]
    async fn test_report_on_mixed_table() {
        let report = data_overview_report(&mixed_table(), None).await.unwrap();

        assert_eq!(report.continuous().num_rows(), 1);
        assert_eq!(report.categorical().num_rows(), 1);
        assert!(!report.is_empty());

        let continuous = report.continuous();
        let names = continuous.column(0).as_string::<i32>();
        assert_eq!(names.value(0), "x");
        let categorical = report.categorical();
        let names = categorical.column(0).as_string::<i32>();
        assert_eq!(names.value(0), "y");
    }

    #[tokio::test]
    async fn test_grouped_report() {
        let report = data_overview_report(&grouped_table(), Some("g")).await.unwrap();
        assert_eq!(report.continuous().num_rows(), 2);
        assert_eq!(report.categorical().num_rows(), 2);
        assert_eq!(report.continuous().schema().field(0).name(), "group_g");
    }

    #[tokio::test]
    async fn test_empty_table() {
        let report = data_overview_report(&empty_table(), None).await.unwrap();
        assert!(report.is_empty());
        assert!(matches!(
            report.visualize("nothing"),
            Err(OverviewError::EmptyReport)
        ));
    }

    #[tokio::test]
    async fn test_axis_is_forwarded() {
        let table = RecordBatch::try_from_iter(vec![("v", vector_column() as ArrayRef)]).unwrap();
        let report = DataOverview::new()
            .with_config(ReportConfig::new().with_axis(Axis::Component(1)))
            .run(&table)
            .await
            .unwrap();

        let continuous = report.continuous();
        let max = continuous
            .column(continuous.schema().index_of("range.max").unwrap())
            .as_primitive::<Float64Type>();
        assert_eq!(max.value(0), 30.0);
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let overview = DataOverview::new().with_config(ReportConfig::new().with_max_groups(0));
        let err = overview.run(&mixed_table()).await.unwrap_err();
        assert!(matches!(err, OverviewError::InvalidConfiguration(_)));
    }

    #[tokio::test]
    async fn test_empty_group_key_is_not_found() {
        let err = data_overview_report(&mixed_table(), Some("")).await.unwrap_err();
        assert!(err.is_selection_error());
        assert!(matches!(err, OverviewError::ColumnNotFound { .. }));
    }

    #[tokio::test]
    async fn test_run_on_context() {
        let ctx = SessionContext::new();
        ctx.register_batch("data", mixed_table()).unwrap();

        let report = DataOverview::new().run_on_context(&ctx, "data").await.unwrap();
        assert_eq!(report, data_overview_report(&mixed_table(), None).await.unwrap());
    }

    #[tokio::test]
    async fn test_custom_executor() {
        let overview = DataOverview::new().with_executor(LocalExecutor::with_log_config(
            LogConfig::production(),
        ));
        let report = overview.run(&mixed_table()).await.unwrap();
        let (continuous, categorical) = report.into_parts();
        assert_eq!(continuous.num_rows() + categorical.num_rows(), 2);
    }
}
