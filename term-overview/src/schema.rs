//! Flattening of structured metric output into scalar result columns.
//!
//! A metric group's output type is a struct of metric results, some of which
//! are structs themselves. Result tables hold one scalar column per leaf of
//! that type, named by joining the path with `.`: `range.min`,
//! `value_counts.top_value`, `mean_str_len`. Values are laid out against the
//! same type, so a member a metric leaves out becomes null instead of shifting
//! later columns.

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field};
use std::sync::Arc;

use crate::error::{OverviewError, Result};
use crate::metrics::MetricValue;

/// Separator between path segments in flattened column names.
pub const PATH_SEPARATOR: &str = ".";

/// Returns one nullable field per leaf of `data_type`.
pub fn flatten_fields(data_type: &DataType) -> Vec<Field> {
    let mut out = Vec::new();
    collect_fields("", data_type, &mut out);
    out
}

fn collect_fields(prefix: &str, data_type: &DataType, out: &mut Vec<Field>) {
    match data_type {
        DataType::Struct(fields) => {
            for field in fields {
                collect_fields(&join_path(prefix, field.name()), field.data_type(), out);
            }
        }
        leaf => out.push(Field::new(prefix, leaf.clone(), true)),
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}{PATH_SEPARATOR}{name}")
    }
}

/// Returns the leaf values of `value`, one per field of [`flatten_fields`]`(data_type)`.
pub fn flatten_value(value: &MetricValue, data_type: &DataType) -> Result<Vec<MetricValue>> {
    let mut out = Vec::new();
    collect_values(value, data_type, &mut out)?;
    Ok(out)
}

fn collect_values(
    value: &MetricValue,
    data_type: &DataType,
    out: &mut Vec<MetricValue>,
) -> Result<()> {
    match (data_type, value) {
        (DataType::Struct(fields), MetricValue::Struct(_)) => {
            for field in fields {
                match value.get(field.name()) {
                    Some(member) => collect_values(member, field.data_type(), out)?,
                    None => push_nulls(field.data_type(), out),
                }
            }
            Ok(())
        }
        (DataType::Struct(_), MetricValue::Null) => {
            push_nulls(data_type, out);
            Ok(())
        }
        (DataType::Struct(_), other) => Err(OverviewError::invalid_data(format!(
            "expected structured metric value, found {other}"
        ))),
        (_, MetricValue::Struct(_)) => Err(OverviewError::invalid_data(format!(
            "expected scalar metric value of type {data_type}, found a struct"
        ))),
        (_, scalar) => {
            out.push(scalar.clone());
            Ok(())
        }
    }
}

fn push_nulls(data_type: &DataType, out: &mut Vec<MetricValue>) {
    let leaves = match data_type {
        DataType::Struct(_) => flatten_fields(data_type).len(),
        _ => 1,
    };
    out.extend(std::iter::repeat(MetricValue::Null).take(leaves));
}

/// Builds an Arrow array of `data_type` from scalar metric values.
pub fn build_column(field: &Field, values: &[MetricValue]) -> Result<ArrayRef> {
    let mismatch = |value: &MetricValue| {
        OverviewError::invalid_data(format!(
            "metric value {value} does not fit result column '{}' of type {}",
            field.name(),
            field.data_type()
        ))
    };

    let array: ArrayRef = match field.data_type() {
        DataType::Float64 => Arc::new(
            values
                .iter()
                .map(|v| match v {
                    MetricValue::Null => Ok(None),
                    MetricValue::Double(_) | MetricValue::Long(_) => Ok(v.as_f64()),
                    other => Err(mismatch(other)),
                })
                .collect::<Result<Float64Array>>()?,
        ),
        DataType::Int64 => Arc::new(
            values
                .iter()
                .map(|v| match v {
                    MetricValue::Null => Ok(None),
                    MetricValue::Long(n) => Ok(Some(*n)),
                    other => Err(mismatch(other)),
                })
                .collect::<Result<Int64Array>>()?,
        ),
        DataType::Utf8 => Arc::new(
            values
                .iter()
                .map(|v| match v {
                    MetricValue::Null => Ok(None),
                    MetricValue::String(s) => Ok(Some(s.as_str())),
                    other => Err(mismatch(other)),
                })
                .collect::<Result<StringArray>>()?,
        ),
        other => {
            return Err(OverviewError::NotSupported(format!(
                "result column '{}' of type {other}",
                field.name()
            )))
        }
    };
    Ok(array)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::MetricGroup;
    use crate::metrics::Axis;
    use arrow::array::Array;

    #[test]
    fn test_flatten_continuous_schema() {
        let fields = flatten_fields(&MetricGroup::continuous(Axis::Flatten).output_type());
        let names: Vec<_> = fields.iter().map(|f| f.name().as_str()).collect();
        assert_eq!(
            names,
            vec![
                "range.min",
                "range.max",
                "moments.count",
                "moments.mean",
                "moments.var",
                "moments.std",
                "common_stats.count",
                "common_stats.num_missing",
            ]
        );
        assert!(fields.iter().all(|f| f.is_nullable()));
    }

    #[test]
    fn test_flatten_categorical_schema() {
        let fields = flatten_fields(&MetricGroup::categorical().output_type());
        let names: Vec<_> = fields.iter().map(|f| f.name().as_str()).collect();
        assert_eq!(
            names,
            vec![
                "value_counts.num_unique",
                "value_counts.top_value",
                "value_counts.top_count",
                "mean_str_len",
                "common_stats.count",
                "common_stats.num_missing",
            ]
        );
    }

    #[test]
    fn test_missing_members_become_null() {
        let data_type = MetricGroup::continuous(Axis::Flatten).output_type();
        let value = MetricValue::structure([(
            "range",
            MetricValue::structure([("max", MetricValue::Double(9.0))]),
        )]);

        let leaves = flatten_value(&value, &data_type).unwrap();
        assert_eq!(leaves.len(), flatten_fields(&data_type).len());
        assert_eq!(leaves[0], MetricValue::Null);
        assert_eq!(leaves[1], MetricValue::Double(9.0));
        assert!(leaves[2..].iter().all(MetricValue::is_null));
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let data_type = MetricGroup::categorical().output_type();
        let value = MetricValue::structure([("value_counts", MetricValue::Long(1))]);
        assert!(matches!(
            flatten_value(&value, &data_type),
            Err(OverviewError::InvalidData(_))
        ));
    }

    #[test]
    fn test_build_column() {
        let field = Field::new("moments.mean", DataType::Float64, true);
        let array = build_column(
            &field,
            &[MetricValue::Double(1.5), MetricValue::Null, MetricValue::Long(2)],
        )
        .unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(array.null_count(), 1);

        let field = Field::new("common_stats.count", DataType::Int64, true);
        assert!(build_column(&field, &[MetricValue::from("a")]).is_err());

        let field = Field::new("flag", DataType::Boolean, true);
        assert!(matches!(
            build_column(&field, &[]),
            Err(OverviewError::NotSupported(_))
        ));
    }
}
