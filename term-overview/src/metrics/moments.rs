//! Count, mean, variance and standard deviation of numeric columns.

use arrow::array::{Array, AsArray, Float64Array};
use arrow::compute::kernels::numeric::{mul, sub};
use arrow::compute::sum;
use arrow::datatypes::{DataType, Field, Fields, Float64Type};

use super::numeric::{numeric_values, Axis};
use super::{Metric, MetricValue};
use crate::error::Result;
use crate::table::Column;

/// Computes `{count, mean, var, std}` over the non-null values of a numeric column.
///
/// Variance is the population variance (divisor `n`), computed in two passes.
/// `mean`, `var` and `std` are null when `count` is zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Moments {
    axis: Axis,
}

impl Moments {
    /// Creates a moments metric reducing along `axis`.
    pub fn new(axis: Axis) -> Self {
        Self { axis }
    }

    /// Returns the configured axis.
    pub fn axis(&self) -> Axis {
        self.axis
    }
}

impl Metric for Moments {
    fn output_type(&self) -> DataType {
        DataType::Struct(Fields::from(vec![
            Field::new("count", DataType::Int64, false),
            Field::new("mean", DataType::Float64, true),
            Field::new("var", DataType::Float64, true),
            Field::new("std", DataType::Float64, true),
        ]))
    }

    fn compute(&self, column: &Column<'_>) -> Result<MetricValue> {
        let values = numeric_values(column, self.axis)?;
        let count = values.len() - values.null_count();

        let (mean, var) = match sum(&values) {
            Some(total) if count > 0 => {
                let n = count as f64;
                let mean = total / n;
                let deviations = sub(&values, &Float64Array::new_scalar(mean))?;
                let squares = mul(&deviations, &deviations)?;
                let var = sum(squares.as_primitive::<Float64Type>()).map(|s| s / n);
                (Some(mean), var)
            }
            _ => (None, None),
        };

        Ok(MetricValue::structure([
            ("count", MetricValue::Long(count as i64)),
            ("mean", mean.into()),
            ("var", var.into()),
            ("std", var.map(f64::sqrt).into()),
        ]))
    }
}
