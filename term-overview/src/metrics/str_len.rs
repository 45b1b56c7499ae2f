//! Mean string length.

use arrow::datatypes::DataType;

use super::strings::string_values;
use super::{Metric, MetricValue};
use crate::error::Result;
use crate::table::Column;

/// Mean length, in characters, of the non-null values of a string column.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanStrLength;

impl MeanStrLength {
    /// Creates the metric.
    pub fn new() -> Self {
        Self
    }
}

impl Metric for MeanStrLength {
    fn output_type(&self) -> DataType {
        DataType::Float64
    }

    fn compute(&self, column: &Column<'_>) -> Result<MetricValue> {
        let values = string_values(column)?;
        let (total, count) = values
            .iter()
            .flatten()
            .fold((0usize, 0usize), |(total, count), s| {
                (total + s.chars().count(), count + 1)
            });

        if count == 0 {
            return Ok(MetricValue::Null);
        }
        Ok(MetricValue::Double(total as f64 / count as f64))
    }
}
