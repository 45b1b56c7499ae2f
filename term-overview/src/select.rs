//! Column selection by type predicate.

use arrow::record_batch::RecordBatch;
use std::fmt;

use crate::classify::{is_categorical, is_continuous};
use crate::table::{columns, Column};

/// Predicate deciding whether a column takes part in an aggregation.
pub type ColumnPredicate = fn(&Column<'_>) -> bool;

/// Returns the names of the columns satisfying `predicate`, in table order.
pub fn select_columns<P>(table: &RecordBatch, predicate: P) -> Vec<String>
where
    P: Fn(&Column<'_>) -> bool,
{
    columns(table)
        .filter(|column| predicate(column))
        .map(|column| column.name().to_string())
        .collect()
}

/// A named column predicate.
#[derive(Clone, Copy)]
pub struct ColumnSelector {
    name: &'static str,
    predicate: ColumnPredicate,
}

impl ColumnSelector {
    /// Creates a selector from a custom predicate.
    pub fn new(name: &'static str, predicate: ColumnPredicate) -> Self {
        Self { name, predicate }
    }

    /// Selects numeric columns.
    pub fn continuous() -> Self {
        Self::new("continuous", is_continuous)
    }

    /// Selects string-like columns.
    pub fn categorical() -> Self {
        Self::new("categorical", is_categorical)
    }

    /// Returns the selector name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Evaluates the predicate on one column.
    pub fn matches(&self, column: &Column<'_>) -> bool {
        (self.predicate)(column)
    }

    /// Returns the matching column names in table order.
    pub fn select(&self, table: &RecordBatch) -> Vec<String> {
        select_columns(table, self.predicate)
    }
}

impl fmt::Debug for ColumnSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSelector")
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{grouped_table, unclassified_table};

    #[test]
    fn test_select_preserves_order() {
        let table = grouped_table();
        assert_eq!(ColumnSelector::continuous().select(&table), vec!["x"]);
        assert_eq!(ColumnSelector::categorical().select(&table), vec!["y", "g"]);
    }

    #[test]
    fn test_select_skips_unclassified() {
        let table = unclassified_table();
        assert!(ColumnSelector::continuous().select(&table).is_empty());
        assert!(ColumnSelector::categorical().select(&table).is_empty());
    }

    #[test]
    fn test_custom_selector() {
        fn named_x(column: &Column<'_>) -> bool {
            column.name() == "x"
        }
        let table = grouped_table();
        let selector = ColumnSelector::new("only_x", named_x);
        assert_eq!(selector.name(), "only_x");
        assert_eq!(selector.select(&table), vec!["x"]);
        assert_eq!(select_columns(&table, |_| true), vec!["x", "y", "g"]);
    }
}
