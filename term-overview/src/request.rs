//! Aggregation requests.

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

use crate::group::MetricGroup;
use crate::schema::flatten_fields;
use crate::select::ColumnSelector;

/// Name of the result column holding the source column name.
pub const COLUMN_FIELD: &str = "column";

/// Prefix of the result column holding group values.
pub const GROUP_FIELD_PREFIX: &str = "group_";

/// "Compute this metric group on these columns, optionally grouped."
///
/// A request is built once per report and handed by value to an
/// [`AggregationExecutor`](crate::executor::AggregationExecutor).
#[derive(Debug)]
pub struct AggregationRequest {
    group: MetricGroup,
    selector: ColumnSelector,
    group_by: Option<String>,
    max_groups: Option<usize>,
}

impl AggregationRequest {
    /// Creates an ungrouped request.
    pub fn new(group: MetricGroup, selector: ColumnSelector) -> Self {
        Self {
            group,
            selector,
            group_by: None,
            max_groups: None,
        }
    }

    /// Partitions rows by the distinct values of `column` before computing metrics.
    pub fn with_group_by(mut self, column: Option<impl Into<String>>) -> Self {
        self.group_by = column.map(Into::into);
        self
    }

    /// Caps the number of distinct groups grouping may produce.
    pub fn with_max_groups(mut self, max_groups: Option<usize>) -> Self {
        self.max_groups = max_groups;
        self
    }

    /// Returns the metric group.
    pub fn metric_group(&self) -> &MetricGroup {
        &self.group
    }

    /// Returns the column selector.
    pub fn selector(&self) -> &ColumnSelector {
        &self.selector
    }

    /// Returns the grouping key, if any.
    pub fn group_by(&self) -> Option<&str> {
        self.group_by.as_deref()
    }

    /// Returns the group limit, if any.
    pub fn max_groups(&self) -> Option<usize> {
        self.max_groups
    }

    /// Selects the columns to summarize. The grouping key is never summarized.
    pub fn resolve_columns(&self, table: &RecordBatch) -> Vec<String> {
        self.selector
            .select(table)
            .into_iter()
            .filter(|name| Some(name.as_str()) != self.group_by())
            .collect()
    }

    /// Name of the result column holding group values, when grouped.
    pub fn group_field_name(&self) -> Option<String> {
        self.group_by
            .as_ref()
            .map(|key| format!("{GROUP_FIELD_PREFIX}{key}"))
    }

    /// The schema of the result table this request produces.
    ///
    /// Known before execution, so empty selections still yield a well-formed table.
    pub fn result_schema(&self) -> SchemaRef {
        let mut fields = Vec::new();
        if let Some(name) = self.group_field_name() {
            fields.push(Field::new(name, DataType::Utf8, true));
        }
        fields.push(Field::new(COLUMN_FIELD, DataType::Utf8, false));
        fields.extend(flatten_fields(&self.group.output_type()));
        Arc::new(Schema::new(fields))
    }
}
