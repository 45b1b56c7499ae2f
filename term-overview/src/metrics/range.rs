//! Minimum and maximum of numeric columns.

use arrow::datatypes::{DataType, Field, Fields};

use super::numeric::{numeric_values, Axis};
use super::{Metric, MetricValue};
use crate::error::Result;
use crate::table::Column;

/// Computes `{min, max}` over the non-null values of a numeric column.
///
/// Both members are null when the column has no non-null values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Range {
    axis: Axis,
}

impl Range {
    /// Creates a range metric reducing along `axis`.
    pub fn new(axis: Axis) -> Self {
        Self { axis }
    }

    /// Returns the configured axis.
    pub fn axis(&self) -> Axis {
        self.axis
    }
}

impl Metric for Range {
    fn output_type(&self) -> DataType {
        DataType::Struct(Fields::from(vec![
            Field::new("min", DataType::Float64, true),
            Field::new("max", DataType::Float64, true),
        ]))
    }

    fn compute(&self, column: &Column<'_>) -> Result<MetricValue> {
        let values = numeric_values(column, self.axis)?;
        let min = arrow::compute::min(&values);
        let max = arrow::compute::max(&values);
        Ok(MetricValue::structure([
            ("min", min.into()),
            ("max", max.into()),
        ]))
    }
}
