//! Extraction of numeric values along an axis.

use arrow::array::{Array, ArrayRef, AsArray, Float64Array, Int64Array};
use arrow::compute::{cast, take};
use arrow::datatypes::{DataType, Float64Type};
use serde::{Deserialize, Serialize};

use crate::error::{OverviewError, Result};
use crate::table::Column;

/// Orientation used by numeric metrics on multi-dimensional columns.
///
/// Scalar columns have a single component, so `Flatten` and `Component(0)`
/// agree on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Reduce over every element of every row.
    #[default]
    Flatten,
    /// Reduce over one component of fixed-size-list rows.
    Component(usize),
}

/// Casts a numeric column to `Float64`, following `axis`.
///
/// Nulls are kept; reductions over the result skip them. Null rows of a
/// fixed-size-list column contribute nothing.
pub(crate) fn numeric_values(column: &Column<'_>, axis: Axis) -> Result<Float64Array> {
    match column.data_type() {
        DataType::FixedSizeList(item, size) => {
            if !item.data_type().is_numeric() {
                return Err(non_numeric(column));
            }
            let size = usize::try_from(*size).map_err(|_| {
                OverviewError::invalid_data(format!("negative list size on '{}'", column.name()))
            })?;
            let components = match axis {
                Axis::Flatten => 0..size,
                Axis::Component(i) if i < size => i..i + 1,
                Axis::Component(i) => return Err(component_out_of_range(column, i, size)),
            };

            let list = column.values().as_fixed_size_list();
            let mut indices = Vec::with_capacity(list.len() * components.len());
            for row in (0..list.len()).filter(|&row| list.is_valid(row)) {
                let start = i64::from(list.value_offset(row));
                indices.extend(components.clone().map(|c| start + c as i64));
            }
            let picked = take(list.values().as_ref(), &Int64Array::from(indices), None)?;
            to_f64(&picked)
        }
        dt if dt.is_numeric() => {
            if let Axis::Component(i) = axis {
                if i != 0 {
                    return Err(component_out_of_range(column, i, 1));
                }
            }
            to_f64(column.values())
        }
        _ => Err(non_numeric(column)),
    }
}

fn to_f64(values: &ArrayRef) -> Result<Float64Array> {
    let casted = cast(values, &DataType::Float64)?;
    Ok(casted.as_primitive::<Float64Type>().clone())
}

fn non_numeric(column: &Column<'_>) -> OverviewError {
    OverviewError::invalid_data(format!(
        "expected numeric data in column '{}', found {}",
        column.name(),
        column.data_type()
    ))
}

fn component_out_of_range(column: &Column<'_>, component: usize, size: usize) -> OverviewError {
    OverviewError::invalid_config(format!(
        "axis component {component} out of range for column '{}' with {size} component(s)",
        column.name()
    ))
}
