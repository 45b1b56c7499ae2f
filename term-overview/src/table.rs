//! Column views over Arrow record batches.
//!
//! A [`RecordBatch`] is the table abstraction used throughout the crate: named,
//! typed columns in a stable order with a shared row count. [`Column`] is a
//! borrowed view pairing a column name with its values.

use arrow::array::{Array, ArrayRef};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::{OverviewError, Result};

/// A named, homogeneously typed column of a table.
#[derive(Debug, Clone)]
pub struct Column<'a> {
    name: &'a str,
    values: ArrayRef,
}

impl<'a> Column<'a> {
    /// Creates a column view from a name and its values.
    pub fn new(name: &'a str, values: ArrayRef) -> Self {
        Self { name, values }
    }

    /// Returns the column name.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Returns the declared element type.
    pub fn data_type(&self) -> &DataType {
        self.values.data_type()
    }

    /// Returns the underlying values.
    pub fn values(&self) -> &ArrayRef {
        &self.values
    }

    /// Number of rows, nulls included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of null rows.
    pub fn null_count(&self) -> usize {
        self.values.null_count()
    }

    /// Returns a view of the same column restricted to other values, e.g. one group's rows.
    pub fn with_values(&self, values: ArrayRef) -> Column<'a> {
        Column {
            name: self.name,
            values,
        }
    }
}

/// Iterates the columns of a table in schema order.
pub fn columns(table: &RecordBatch) -> impl Iterator<Item = Column<'_>> {
    table
        .schema_ref()
        .fields()
        .iter()
        .zip(table.columns())
        .map(|(field, values)| Column::new(field.name(), values.clone()))
}

/// Looks up a column by name.
pub fn column<'a>(table: &'a RecordBatch, name: &str) -> Result<Column<'a>> {
    let index = table
        .schema_ref()
        .index_of(name)
        .map_err(|_| OverviewError::column_not_found(name))?;
    let field = table.schema_ref().field(index);
    Ok(Column::new(field.name(), table.column(index).clone()))
}
