//! Frequency summary of string columns.

use arrow::array::{Array, AsArray};
use arrow::compute::{partition, sort, SortOptions};
use arrow::datatypes::{DataType, Field, Fields};
use std::sync::Arc;

use super::strings::string_values;
use super::{Metric, MetricValue};
use crate::error::Result;
use crate::table::Column;

/// Computes `{num_unique, top_value, top_count}` over the non-null values of a
/// string column.
///
/// When several values share the highest count, the lexicographically
/// smallest one is reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueCounts;

impl ValueCounts {
    /// Creates the metric.
    pub fn new() -> Self {
        Self
    }
}

impl Metric for ValueCounts {
    fn output_type(&self) -> DataType {
        DataType::Struct(Fields::from(vec![
            Field::new("num_unique", DataType::Int64, false),
            Field::new("top_value", DataType::Utf8, true),
            Field::new("top_count", DataType::Int64, true),
        ]))
    }

    fn compute(&self, column: &Column<'_>) -> Result<MetricValue> {
        let values = string_values(column)?;
        let present = values.len() - values.null_count();
        if present == 0 {
            return Ok(MetricValue::structure([
                ("num_unique", MetricValue::Long(0)),
                ("top_value", MetricValue::Null),
                ("top_count", MetricValue::Null),
            ]));
        }

        let sorted = sort(
            &values,
            Some(SortOptions {
                descending: false,
                nulls_first: false,
            }),
        )?
        .slice(0, present);
        let runs = partition(&[Arc::clone(&sorted)])?.ranges();
        let num_unique = runs.len();

        // runs are in ascending value order, so the first longest run wins ties
        let top = runs
            .iter()
            .fold(None::<&std::ops::Range<usize>>, |best, run| match best {
                Some(best) if best.len() >= run.len() => Some(best),
                _ => Some(run),
            })
            .map(|run| {
                let value = sorted.as_string::<i32>().value(run.start).to_string();
                (value, run.len() as i64)
            });

        let (top_value, top_count) = match top {
            Some((value, count)) => (MetricValue::String(value), MetricValue::Long(count)),
            None => (MetricValue::Null, MetricValue::Null),
        };

        Ok(MetricValue::structure([
            ("num_unique", MetricValue::Long(num_unique as i64)),
            ("top_value", top_value),
            ("top_count", top_count),
        ]))
    }
}
