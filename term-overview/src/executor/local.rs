//! In-process executor built on Arrow compute kernels.

use arrow::array::{Array, ArrayRef, StringArray, UInt32Array};
use arrow::compute::{take, SortOptions};
use arrow::record_batch::RecordBatch;
use arrow::row::{RowConverter, SortField};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument};

use super::{AggregationExecutor, ColumnSummary};
use crate::error::{OverviewError, Result};
use crate::logging::{truncate_field, LogConfig};
use crate::metrics::MetricValue;
use crate::request::AggregationRequest;
use crate::schema::{build_column, flatten_value};
use crate::table::column;
use crate::{log_data_op, log_metric};

/// Rows of one group: the key's display value (`None` for nulls) and row indices.
type Partition = (Option<String>, UInt32Array);

/// Executes requests in the current process.
///
/// Grouped requests partition rows by the display value of the grouping key.
/// Null keys form their own group. Groups come out ordered by the key's value
/// (numeric keys numerically) with the null group first, so repeated runs
/// produce identical tables.
///
/// # Example
///
/// ```rust
/// use arrow::array::{ArrayRef, Int64Array, StringArray};
/// use arrow::record_batch::RecordBatch;
/// use std::sync::Arc;
/// use term_overview::executor::{AggregationExecutor, LocalExecutor};
/// use term_overview::group::MetricGroup;
/// use term_overview::metrics::Axis;
/// use term_overview::request::AggregationRequest;
/// use term_overview::select::ColumnSelector;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let table = RecordBatch::try_from_iter(vec![
///     ("x", Arc::new(Int64Array::from(vec![1, 2, 3, 4])) as ArrayRef),
///     ("g", Arc::new(StringArray::from(vec!["a", "a", "b", "b"])) as ArrayRef),
/// ])
/// .unwrap();
///
/// let request = AggregationRequest::new(
///     MetricGroup::continuous(Axis::Flatten),
///     ColumnSelector::continuous(),
/// )
/// .with_group_by(Some("g"));
///
/// let result = LocalExecutor::new().execute(request, &table).await.unwrap();
/// assert_eq!(result.num_rows(), 2);
/// # })
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocalExecutor {
    log_config: LogConfig,
}

impl LocalExecutor {
    /// Creates an executor with the default logging configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an executor with a custom logging configuration.
    pub fn with_log_config(log_config: LogConfig) -> Self {
        Self { log_config }
    }

    /// Computes the un-flattened result of every (group, column) pair.
    ///
    /// Rows come out group by group, columns in table order within each group.
    pub fn summarize(
        &self,
        request: &AggregationRequest,
        table: &RecordBatch,
    ) -> Result<Vec<ColumnSummary>> {
        let partitions = match request.group_by() {
            Some(key) => Some(partition(table, key, request.max_groups())?),
            None => None,
        };
        let names = request.resolve_columns(table);
        let group = request.metric_group();
        debug!(
            group = %group.name(),
            columns = ?names,
            groups = partitions.as_ref().map(Vec::len),
            "Summarizing columns"
        );

        let mut summaries = Vec::new();
        match partitions {
            None => {
                for name in &names {
                    let source = column(table, name)?;
                    let metrics = group.prepare(&source)?;
                    summaries.push(self.summary(None, name, metrics));
                }
            }
            Some(partitions) => {
                for (key, indices) in &partitions {
                    for name in &names {
                        let source = column(table, name)?;
                        let rows = take(source.values().as_ref(), indices, None)?;
                        let metrics = group.prepare(&source.with_values(rows))?;
                        summaries.push(self.summary(key.clone(), name, metrics));
                    }
                }
            }
        }
        Ok(summaries)
    }

    fn summary(&self, group: Option<String>, column: &str, metrics: MetricValue) -> ColumnSummary {
        log_metric!(
            self.log_config,
            group = ?group
                .as_deref()
                .map(|g| truncate_field(g, self.log_config.max_field_length)),
            column = column,
            metrics = %metrics,
            "Computed column metrics"
        );
        ColumnSummary {
            group,
            column: column.to_string(),
            metrics,
        }
    }

    /// Lays summaries out as a result table following [`AggregationRequest::result_schema`].
    pub fn build_table(
        request: &AggregationRequest,
        summaries: &[ColumnSummary],
    ) -> Result<RecordBatch> {
        let schema = request.result_schema();
        let data_type = request.metric_group().output_type();
        let grouped = request.group_by().is_some();
        let leaf_offset = if grouped { 2 } else { 1 };
        let leaf_fields = &schema.fields()[leaf_offset..];

        let mut leaf_values: Vec<Vec<MetricValue>> =
            vec![Vec::with_capacity(summaries.len()); leaf_fields.len()];
        for summary in summaries {
            let leaves = flatten_value(&summary.metrics, &data_type)?;
            for (slot, value) in leaf_values.iter_mut().zip(leaves) {
                slot.push(value);
            }
        }

        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());
        if grouped {
            arrays.push(Arc::new(
                summaries
                    .iter()
                    .map(|s| s.group.as_deref())
                    .collect::<StringArray>(),
            ));
        }
        arrays.push(Arc::new(StringArray::from_iter_values(
            summaries.iter().map(|s| s.column.as_str()),
        )));
        for (field, values) in leaf_fields.iter().zip(&leaf_values) {
            arrays.push(build_column(field, values)?);
        }

        Ok(RecordBatch::try_new(schema, arrays)?)
    }
}

#[async_trait]
impl AggregationExecutor for LocalExecutor {
    #[instrument(skip_all, fields(
        group = %request.metric_group().name(),
        group_by = ?request.group_by(),
        rows = table.num_rows()
    ))]
    async fn execute(
        &self,
        request: AggregationRequest,
        table: &RecordBatch,
    ) -> Result<RecordBatch> {
        let start = Instant::now();
        let summaries = self.summarize(&request, table)?;
        let result = Self::build_table(&request, &summaries)?;
        log_data_op!(
            self.log_config,
            group = %request.metric_group().name(),
            result_rows = result.num_rows(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Aggregation request completed"
        );
        Ok(result)
    }
}

/// Splits the rows of `table` by the values of column `key`.
///
/// Rows are grouped by display value. Groups are ordered by the key's own
/// ordering (numbers numerically, strings lexicographically), nulls first.
fn partition(table: &RecordBatch, key: &str, max_groups: Option<usize>) -> Result<Vec<Partition>> {
    let key_column = column(table, key)?;
    let values = key_column.values();
    let options = FormatOptions::default();
    let formatter = ArrayFormatter::try_new(values.as_ref(), &options)?;

    let mut slots: HashMap<Option<String>, usize> = HashMap::new();
    let mut groups: Vec<(Option<String>, Vec<u32>)> = Vec::new();
    let mut first_rows: Vec<u32> = Vec::new();
    for row in 0..values.len() {
        let group = if values.is_null(row) {
            None
        } else {
            Some(formatter.value(row).to_string())
        };
        let index = u32::try_from(row).map_err(|_| {
            OverviewError::NotSupported(format!("grouping tables with more than {} rows", u32::MAX))
        })?;
        let slot = match slots.get(&group) {
            Some(&slot) => slot,
            None => {
                groups.push((group.clone(), Vec::new()));
                first_rows.push(index);
                slots.insert(group, groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[slot].1.push(index);
    }

    if let Some(limit) = max_groups {
        if groups.len() > limit {
            return Err(OverviewError::TooManyGroups {
                found: groups.len(),
                limit,
            });
        }
    }

    // one representative key value per group, compared in row format
    let keys = take(values.as_ref(), &UInt32Array::from(first_rows), None)?;
    let converter = RowConverter::new(vec![SortField::new_with_options(
        keys.data_type().clone(),
        SortOptions {
            descending: false,
            nulls_first: true,
        },
    )])?;
    let rows = converter.convert_columns(&[keys])?;
    let mut order: Vec<usize> = (0..groups.len()).collect();
    order.sort_by(|&a, &b| rows.row(a).cmp(&rows.row(b)));

    let mut groups: Vec<Option<(Option<String>, Vec<u32>)>> =
        groups.into_iter().map(Some).collect();
    Ok(order
        .into_iter()
        .filter_map(|slot| groups[slot].take())
        .map(|(group, rows)| (group, UInt32Array::from(rows)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::MetricGroup;
    use crate::metrics::{Axis, CommonStats};
    use crate::select::ColumnSelector;
    use crate::test_fixtures::{empty_table, grouped_table, mixed_table, FailingMetric};
    use arrow::array::{AsArray, Int64Array};
    use arrow::datatypes::{Float64Type, Int64Type};

    fn continuous_request() -> AggregationRequest {
        AggregationRequest::new(
            MetricGroup::continuous(Axis::Flatten),
            ColumnSelector::continuous(),
        )
    }

    fn categorical_request() -> AggregationRequest {
        AggregationRequest::new(MetricGroup::categorical(), ColumnSelector::categorical())
    }

    #[tokio::test]
    async fn test_ungrouped_continuous() {
        let table = mixed_table();
        let result = LocalExecutor::new()
            .execute(continuous_request(), &table)
            .await
            .unwrap();

        assert_eq!(result.num_rows(), 1);
        let schema = result.schema();
        let column = result.column(schema.index_of("column").unwrap()).as_string::<i32>();
        assert_eq!(column.value(0), "x");

        let max = result.column(schema.index_of("range.max").unwrap());
        assert_eq!(max.as_primitive::<Float64Type>().value(0), 4.0);
        let count = result.column(schema.index_of("moments.count").unwrap());
        assert_eq!(count.as_primitive::<Int64Type>().value(0), 4);
    }

    #[tokio::test]
    async fn test_grouped_rows_per_group_and_column() {
        let table = grouped_table();
        let request = categorical_request().with_group_by(Some("g"));
        let result = LocalExecutor::new().execute(request, &table).await.unwrap();

        // groups a and b, column y only: g is the key
        assert_eq!(result.num_rows(), 2);
        let groups = result.column(0).as_string::<i32>();
        assert_eq!(groups.value(0), "a");
        assert_eq!(groups.value(1), "b");

        let schema = result.schema();
        let top = result
            .column(schema.index_of("value_counts.top_value").unwrap())
            .as_string::<i32>();
        // group a holds y = ["a", "b"], group b holds y = ["a", "c"]
        assert_eq!(top.value(0), "a");
        assert_eq!(top.value(1), "a");
    }

    #[tokio::test]
    async fn test_null_keys_form_first_group() {
        let table = RecordBatch::try_from_iter(vec![
            ("x", Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef),
            (
                "k",
                Arc::new(Int64Array::from(vec![Some(7), None, Some(7)])) as ArrayRef,
            ),
        ])
        .unwrap();

        let request = continuous_request().with_group_by(Some("k"));
        let summaries = LocalExecutor::new().summarize(&request, &table).unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].group, None);
        assert_eq!(summaries[1].group.as_deref(), Some("7"));
        assert_eq!(
            summaries[1].metrics.get_path("moments.mean"),
            Some(&MetricValue::Double(2.0))
        );
    }

    #[test]
    fn test_numeric_keys_are_ordered_numerically() {
        let table = RecordBatch::try_from_iter(vec![
            ("x", Arc::new(Int64Array::from(vec![1, 2, 3, 4])) as ArrayRef),
            (
                "k",
                Arc::new(Int64Array::from(vec![Some(10), Some(9), None, Some(2)])) as ArrayRef,
            ),
        ])
        .unwrap();

        let request = continuous_request().with_group_by(Some("k"));
        let summaries = LocalExecutor::new().summarize(&request, &table).unwrap();
        let groups: Vec<_> = summaries.iter().map(|s| s.group.as_deref()).collect();
        assert_eq!(groups, vec![None, Some("2"), Some("9"), Some("10")]);
        assert_eq!(
            summaries[3].metrics.get_path("range.min"),
            Some(&MetricValue::Double(1.0))
        );
    }

    #[tokio::test]
    async fn test_empty_selection_yields_empty_table() {
        let result = LocalExecutor::new()
            .execute(continuous_request(), &empty_table())
            .await
            .unwrap();
        assert_eq!(result.num_rows(), 0);
        assert_eq!(result.schema(), continuous_request().result_schema());
    }

    #[tokio::test]
    async fn test_missing_group_key_is_selection_error() {
        let table = mixed_table();
        let request = continuous_request().with_group_by(Some("nope"));
        let err = LocalExecutor::new().execute(request, &table).await.unwrap_err();
        assert!(err.is_selection_error());
    }

    #[tokio::test]
    async fn test_group_limit() {
        let table = grouped_table();
        let request = continuous_request()
            .with_group_by(Some("g"))
            .with_max_groups(Some(1));
        let err = LocalExecutor::new().execute(request, &table).await.unwrap_err();
        assert!(matches!(err, OverviewError::TooManyGroups { found: 2, limit: 1 }));
    }

    #[tokio::test]
    async fn test_metric_failure_fails_request() {
        let table = mixed_table();
        let group = MetricGroup::new("custom")
            .with_metric("common_stats", CommonStats::new())
            .with_metric("boom", FailingMetric);
        let request = AggregationRequest::new(group, ColumnSelector::continuous());
        let err = LocalExecutor::new().execute(request, &table).await.unwrap_err();
        assert!(matches!(err, OverviewError::MetricCompute { .. }));
    }
}
