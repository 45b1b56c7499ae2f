//! Column type classification.
//!
//! Every column falls into exactly one [`ColumnKind`]. Continuous columns get
//! numeric metrics, categorical columns get frequency and string metrics, and
//! unclassified columns (booleans, temporal, binary and nested data) are left
//! out of both summaries without raising an error.

use arrow::datatypes::DataType;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::table::Column;

/// The closed set of column classes an overview routes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Numeric columns, including fixed-size lists of numbers.
    Continuous,
    /// String-like columns, including string dictionaries.
    Categorical,
    /// Columns no metric group applies to.
    Unclassified,
}

impl ColumnKind {
    /// Classifies a declared Arrow type.
    pub fn of(data_type: &DataType) -> Self {
        if is_numeric_type(data_type) {
            return ColumnKind::Continuous;
        }
        match data_type {
            DataType::FixedSizeList(field, _) if is_numeric_type(field.data_type()) => {
                ColumnKind::Continuous
            }
            DataType::Dictionary(_, value) if is_string_type(value) => ColumnKind::Categorical,
            t if is_string_type(t) => ColumnKind::Categorical,
            _ => ColumnKind::Unclassified,
        }
    }

    /// Classifies a column by its declared element type.
    pub fn of_column(column: &Column<'_>) -> Self {
        Self::of(column.data_type())
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Continuous => write!(f, "continuous"),
            ColumnKind::Categorical => write!(f, "categorical"),
            ColumnKind::Unclassified => write!(f, "unclassified"),
        }
    }
}

/// Returns true if the column holds numeric data.
pub fn is_continuous(column: &Column<'_>) -> bool {
    ColumnKind::of_column(column) == ColumnKind::Continuous
}

/// Returns true if the column holds string-like data.
pub fn is_categorical(column: &Column<'_>) -> bool {
    ColumnKind::of_column(column) == ColumnKind::Categorical
}

fn is_numeric_type(data_type: &DataType) -> bool {
    data_type.is_numeric()
}

fn is_string_type(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
    )
}
