//! Shared tables and metrics for tests.

use arrow::array::{
    ArrayRef, BooleanArray, Date32Array, FixedSizeListArray, Int64Array, StringArray,
};
use arrow::datatypes::{DataType, Float64Type, Schema};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

use crate::error::{OverviewError, Result};
use crate::metrics::{Metric, MetricValue};
use crate::table::Column;

/// `x: Int64 [1, 2, 3, 4]`, `y: Utf8 ["a", "b", "a", "c"]`.
pub fn mixed_table() -> RecordBatch {
    RecordBatch::try_from_iter(vec![
        ("x", Arc::new(Int64Array::from(vec![1, 2, 3, 4])) as ArrayRef),
        (
            "y",
            Arc::new(StringArray::from(vec!["a", "b", "a", "c"])) as ArrayRef,
        ),
    ])
    .expect("valid fixture")
}

/// [`mixed_table`] plus a grouping column `g: Utf8 ["a", "a", "b", "b"]`.
pub fn grouped_table() -> RecordBatch {
    RecordBatch::try_from_iter(vec![
        ("x", Arc::new(Int64Array::from(vec![1, 2, 3, 4])) as ArrayRef),
        (
            "y",
            Arc::new(StringArray::from(vec!["a", "b", "a", "c"])) as ArrayRef,
        ),
        (
            "g",
            Arc::new(StringArray::from(vec!["a", "a", "b", "b"])) as ArrayRef,
        ),
    ])
    .expect("valid fixture")
}

/// Columns that are neither continuous nor categorical.
pub fn unclassified_table() -> RecordBatch {
    RecordBatch::try_from_iter(vec![
        (
            "flag",
            Arc::new(BooleanArray::from(vec![true, false, true])) as ArrayRef,
        ),
        (
            "day",
            Arc::new(Date32Array::from(vec![19_000, 19_001, 19_002])) as ArrayRef,
        ),
    ])
    .expect("valid fixture")
}

/// A table with no columns and no rows.
pub fn empty_table() -> RecordBatch {
    RecordBatch::new_empty(Arc::new(Schema::empty()))
}

/// Two-component vectors `[1, 10], [2, 20], [3, 30]`.
pub fn vector_column() -> ArrayRef {
    Arc::new(FixedSizeListArray::from_iter_primitive::<Float64Type, _, _>(
        vec![
            Some(vec![Some(1.0), Some(10.0)]),
            Some(vec![Some(2.0), Some(20.0)]),
            Some(vec![Some(3.0), Some(30.0)]),
        ],
        2,
    ))
}

/// A metric that always fails.
#[derive(Debug)]
pub struct FailingMetric;

impl Metric for FailingMetric {
    fn output_type(&self) -> DataType {
        DataType::Float64
    }

    fn compute(&self, column: &Column<'_>) -> Result<MetricValue> {
        Err(OverviewError::invalid_data(format!(
            "cannot measure column '{}'",
            column.name()
        )))
    }
}
