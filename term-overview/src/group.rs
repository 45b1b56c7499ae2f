//! Metric groups: ordered bundles of named metrics for one column class.

use arrow::datatypes::{DataType, Field, Fields};
use std::fmt;
use tracing::debug;

use crate::error::{OverviewError, Result};
use crate::metrics::{
    Axis, CommonStats, MeanStrLength, Metric, MetricValue, Moments, Range, ValueCounts,
};
use crate::table::Column;

/// A named, ordered collection of metrics applied together to a column.
///
/// Every metric must be applicable to every column the group is paired with;
/// this is not checked when the group is built. A metric that fails surfaces as
/// [`OverviewError::MetricCompute`] and aborts the whole `prepare` call.
///
/// # Example
///
/// ```rust
/// use arrow::array::{ArrayRef, Float64Array};
/// use std::sync::Arc;
/// use term_overview::group::MetricGroup;
/// use term_overview::metrics::{Axis, MetricValue};
/// use term_overview::table::Column;
///
/// let values: ArrayRef = Arc::new(Float64Array::from(vec![1.0, 2.0, 3.0, 4.0]));
/// let prepared = MetricGroup::continuous(Axis::Flatten)
///     .prepare(&Column::new("x", values))
///     .unwrap();
///
/// assert_eq!(prepared.get_path("range.max"), Some(&MetricValue::Double(4.0)));
/// assert_eq!(prepared.get_path("common_stats.count"), Some(&MetricValue::Long(4)));
/// ```
pub struct MetricGroup {
    name: String,
    metrics: Vec<(String, Box<dyn Metric>)>,
}

impl MetricGroup {
    /// Creates an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metrics: Vec::new(),
        }
    }

    /// Metrics for numeric columns: `range`, `moments` and `common_stats`.
    ///
    /// `axis` is forwarded to `range` and `moments`.
    pub fn continuous(axis: Axis) -> Self {
        Self::new("continuous")
            .with_metric("range", Range::new(axis))
            .with_metric("moments", Moments::new(axis))
            .with_metric("common_stats", CommonStats::new())
    }

    /// Metrics for string columns: `value_counts`, `mean_str_len` and `common_stats`.
    pub fn categorical() -> Self {
        Self::new("categorical")
            .with_metric("value_counts", ValueCounts::new())
            .with_metric("mean_str_len", MeanStrLength::new())
            .with_metric("common_stats", CommonStats::new())
    }

    /// Appends a metric under `name`, replacing any metric already registered with that name.
    pub fn with_metric(mut self, name: impl Into<String>, metric: impl Metric + 'static) -> Self {
        let name = name.into();
        let metric: Box<dyn Metric> = Box::new(metric);
        match self.metrics.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = metric,
            None => self.metrics.push((name, metric)),
        }
        self
    }

    /// Returns the group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the metric names in evaluation order.
    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.metrics.iter().map(|(name, _)| name.as_str())
    }

    /// Number of metrics in the group.
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Returns true if the group has no metrics.
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// The structured type of a [`prepare`](Self::prepare) result: one field per metric.
    pub fn output_type(&self) -> DataType {
        DataType::Struct(Fields::from(
            self.metrics
                .iter()
                .map(|(name, metric)| Field::new(name, metric.output_type(), true))
                .collect::<Vec<_>>(),
        ))
    }

    /// Applies every metric to `column` and returns a struct of metric name to result.
    pub fn prepare(&self, column: &Column<'_>) -> Result<MetricValue> {
        debug!(
            group = %self.name,
            column = column.name(),
            rows = column.len(),
            "Preparing metrics"
        );
        let mut members = Vec::with_capacity(self.metrics.len());
        for (name, metric) in &self.metrics {
            let value = metric
                .compute(column)
                .map_err(|e| OverviewError::metric_compute(name, column.name(), e))?;
            members.push((name.clone(), value));
        }
        Ok(MetricValue::Struct(members))
    }
}

impl fmt::Debug for MetricGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricGroup")
            .field("name", &self.name)
            .field("metrics", &self.metric_names().collect::<Vec<_>>())
            .finish()
    }
}
