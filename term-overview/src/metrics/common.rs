//! Statistics shared by every column type.

use arrow::datatypes::{DataType, Field, Fields};

use super::{Metric, MetricValue};
use crate::error::Result;
use crate::table::Column;

/// Computes `{count, num_missing}`: the row count and the null count.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonStats;

impl CommonStats {
    /// Creates the metric.
    pub fn new() -> Self {
        Self
    }
}

impl Metric for CommonStats {
    fn output_type(&self) -> DataType {
        DataType::Struct(Fields::from(vec![
            Field::new("count", DataType::Int64, false),
            Field::new("num_missing", DataType::Int64, false),
        ]))
    }

    fn compute(&self, column: &Column<'_>) -> Result<MetricValue> {
        Ok(MetricValue::structure([
            ("count", MetricValue::Long(column.len() as i64)),
            ("num_missing", MetricValue::Long(column.null_count() as i64)),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{ArrayRef, BooleanArray};
    use std::sync::Arc;

    #[test]
    fn test_common_stats_any_type() {
        let values: ArrayRef = Arc::new(BooleanArray::from(vec![Some(true), None, None]));
        let result = CommonStats::new().compute(&Column::new("b", values)).unwrap();
        assert_eq!(result.get("count"), Some(&MetricValue::Long(3)));
        assert_eq!(result.get("num_missing"), Some(&MetricValue::Long(2)));
    }
}
