//! Column metrics.
//!
//! A [`Metric`] is a pure function from a column to a [`MetricValue`]. Each
//! metric also declares the Arrow type of its output so that result tables can
//! be laid out before any value is computed, which keeps their schema stable
//! even when no column is selected.
//!
//! ## Available Metrics
//!
//! - [`Range`]: minimum and maximum of numeric data
//! - [`Moments`]: count, mean, variance and standard deviation of numeric data
//! - [`CommonStats`]: row count and missing count of any column
//! - [`ValueCounts`]: cardinality and most frequent value of string data
//! - [`MeanStrLength`]: mean character length of string data

use arrow::datatypes::DataType;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

use crate::error::Result;
use crate::table::Column;

pub mod common;
pub mod moments;
mod numeric;
pub mod range;
pub mod str_len;
mod strings;
pub mod value_counts;

pub use common::CommonStats;
pub use moments::Moments;
pub use numeric::Axis;
pub use range::Range;
pub use str_len::MeanStrLength;
pub use value_counts::ValueCounts;

/// A stateless computation over one column.
///
/// # Example
///
/// ```rust
/// use arrow::array::Int64Array;
/// use arrow::datatypes::DataType;
/// use std::sync::Arc;
/// use term_overview::metrics::{Metric, MetricValue};
/// use term_overview::table::Column;
///
/// #[derive(Debug)]
/// struct NullFraction;
///
/// impl Metric for NullFraction {
///     fn output_type(&self) -> DataType {
///         DataType::Float64
///     }
///
///     fn compute(&self, column: &Column<'_>) -> term_overview::Result<MetricValue> {
///         if column.is_empty() {
///             return Ok(MetricValue::Null);
///         }
///         Ok(MetricValue::Double(
///             column.null_count() as f64 / column.len() as f64,
///         ))
///     }
/// }
///
/// let values = Arc::new(Int64Array::from(vec![Some(1), None]));
/// let metric = NullFraction.compute(&Column::new("a", values)).unwrap();
/// assert_eq!(metric, MetricValue::Double(0.5));
/// ```
pub trait Metric: Send + Sync + Debug {
    /// The Arrow type of the values this metric produces.
    ///
    /// Structured metrics return a `DataType::Struct` whose fields name the
    /// members of the [`MetricValue::Struct`] they compute.
    fn output_type(&self) -> DataType;

    /// Computes the metric over a column.
    fn compute(&self, column: &Column<'_>) -> Result<MetricValue>;
}

/// A value produced by a metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum MetricValue {
    /// No value, e.g. the minimum of a column without non-null entries.
    Null,

    /// A floating-point value (e.g., mean, range bound).
    Double(f64),

    /// An integer value (e.g., count).
    Long(i64),

    /// A string value (e.g., most frequent value).
    String(String),

    /// Named members of a structured result, in declaration order.
    Struct(Vec<(String, MetricValue)>),
}

impl MetricValue {
    /// Builds a struct value from `(name, value)` pairs.
    pub fn structure<I, K>(members: I) -> Self
    where
        I: IntoIterator<Item = (K, MetricValue)>,
        K: Into<String>,
    {
        MetricValue::Struct(
            members
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }

    /// Looks up a struct member by name.
    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        match self {
            MetricValue::Struct(members) => members
                .iter()
                .find(|(member, _)| member == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Looks up a nested member by a dotted path such as `range.min`.
    pub fn get_path(&self, path: &str) -> Option<&MetricValue> {
        path.split('.')
            .try_fold(self, |value, segment| value.get(segment))
    }

    /// Returns true for [`MetricValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, MetricValue::Null)
    }

    /// Attempts to get the numeric value as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Double(v) => Some(*v),
            MetricValue::Long(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Attempts to get the value as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MetricValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to get the value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetricValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Null => write!(f, "null"),
            MetricValue::Double(v) => {
                if v.fract() == 0.0 {
                    write!(f, "{v:.0}")
                } else {
                    write!(f, "{v:.4}")
                }
            }
            MetricValue::Long(v) => write!(f, "{v}"),
            MetricValue::String(s) => write!(f, "{s}"),
            MetricValue::Struct(members) => {
                write!(f, "{{")?;
                for (i, (name, value)) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Double(value)
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        MetricValue::Long(value)
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        MetricValue::String(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::String(value.to_string())
    }
}

impl<T: Into<MetricValue>> From<Option<T>> for MetricValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(MetricValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_lookup() {
        let value = MetricValue::structure([
            (
                "range",
                MetricValue::structure([("min", 1.0.into()), ("max", 4.0.into())]),
            ),
            ("mean_str_len", MetricValue::Null),
        ]);

        assert_eq!(value.get_path("range.max"), Some(&MetricValue::Double(4.0)));
        assert_eq!(value.get_path("mean_str_len"), Some(&MetricValue::Null));
        assert_eq!(value.get_path("range.median"), None);
        let min = value.get("range").and_then(|r| r.get("min"));
        assert_eq!(min.and_then(MetricValue::as_f64), Some(1.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(MetricValue::Double(2.5).to_string(), "2.5000");
        assert_eq!(MetricValue::Double(3.0).to_string(), "3");
        assert_eq!(MetricValue::Long(7).to_string(), "7");
        let value = MetricValue::structure([("count", 4i64.into()), ("top", "a".into())]);
        assert_eq!(value.to_string(), "{count: 4, top: a}");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(MetricValue::from(None::<f64>), MetricValue::Null);
        assert_eq!(MetricValue::from(Some(3i64)), MetricValue::Long(3));
    }

    #[test]
    fn test_serde_round_trip() {
        let value = MetricValue::structure([
            ("min", MetricValue::Double(1.0)),
            ("max", MetricValue::Null),
        ]);
        let json = serde_json::to_string(&value).unwrap();
        let back: MetricValue = serde_json::from_str(&json).unwrap();
        assert_eq!(value, back);
    }
}
