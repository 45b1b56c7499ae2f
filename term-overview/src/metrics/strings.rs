//! Access to string-like columns.

use arrow::array::{ArrayRef, AsArray, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;

use crate::classify::ColumnKind;
use crate::error::{OverviewError, Result};
use crate::table::Column;

/// Normalizes a string-like column (plain, large, view or dictionary encoded) to `Utf8`.
pub(crate) fn string_values(column: &Column<'_>) -> Result<StringArray> {
    if ColumnKind::of_column(column) != ColumnKind::Categorical {
        return Err(OverviewError::invalid_data(format!(
            "expected string data in column '{}', found {}",
            column.name(),
            column.data_type()
        )));
    }
    let utf8: ArrayRef = cast(column.values(), &DataType::Utf8)?;
    Ok(utf8.as_string::<i32>().clone())
}
