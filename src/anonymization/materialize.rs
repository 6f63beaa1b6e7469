//! Synthetic column materialization

use super::mapping::BuiltMapping;
use crate::domain::{AnonymizeError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use std::hash::Hash;

/// Marker token prefixed to every synthetic column name
pub const SYNTHETIC_PREFIX: &str = "Fake_";

/// Name of the synthetic column derived from `column`
pub fn synthetic_column_name(column: &str) -> String {
    format!("{SYNTHETIC_PREFIX}{column}")
}

/// Synthetic value types that can be turned into a polars column
pub trait SyntheticValues: Sized {
    fn into_series(values: Vec<Option<Self>>, name: &str) -> Result<Series>;
}

impl SyntheticValues for String {
    fn into_series(values: Vec<Option<Self>>, name: &str) -> Result<Series> {
        Ok(Series::new(name.into(), values))
    }
}

impl SyntheticValues for i64 {
    fn into_series(values: Vec<Option<Self>>, name: &str) -> Result<Series> {
        Ok(Series::new(name.into(), values))
    }
}

impl SyntheticValues for f64 {
    fn into_series(values: Vec<Option<Self>>, name: &str) -> Result<Series> {
        Ok(Series::new(name.into(), values))
    }
}

impl SyntheticValues for NaiveDate {
    fn into_series(values: Vec<Option<Self>>, name: &str) -> Result<Series> {
        let epoch = NaiveDate::default();
        let days: Vec<Option<i32>> = values
            .into_iter()
            .map(|date| date.and_then(|d| i32::try_from((d - epoch).num_days()).ok()))
            .collect();
        Ok(Series::new(name.into(), days).cast(&DataType::Date)?)
    }
}

/// Resolve every row key through the mapping.
///
/// Null rows stay null. A non-null row without a mapping entry is an
/// internal defect and fails with [`AnonymizeError::UnmappedValue`].
pub fn resolve_rows<K, V>(built: &BuiltMapping<K, V>, column: &str) -> Result<Vec<Option<V>>>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    built
        .row_keys
        .iter()
        .enumerate()
        .map(|(row, key)| match key {
            None => Ok(None),
            Some(key) => built
                .mapping
                .resolve(key)
                .cloned()
                .map(Some)
                .ok_or_else(|| AnonymizeError::UnmappedValue {
                    column: column.to_string(),
                    row,
                }),
        })
        .collect()
}

/// Append the synthetic column for `column` to the dataset.
///
/// An existing synthetic column of the same name is replaced. Returns the
/// name of the written column.
pub fn materialize<K, V>(
    df: &mut DataFrame,
    column: &str,
    built: &BuiltMapping<K, V>,
) -> Result<String>
where
    K: Eq + Hash + Clone,
    V: SyntheticValues + Clone,
{
    let expected = df.height();
    if built.row_keys.len() != expected {
        return Err(AnonymizeError::LengthMismatch {
            column: column.to_string(),
            expected,
            actual: built.row_keys.len(),
        });
    }

    let values = resolve_rows(built, column)?;
    let output = synthetic_column_name(column);
    let series = V::into_series(values, &output)?;
    df.with_column(series)?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::mapping::ValueMapping;
    use crate::anonymization::value::CellKey;

    fn key(s: &str) -> Option<CellKey> {
        Some(CellKey::Str(s.to_string()))
    }

    fn built(keys: Vec<Option<CellKey>>, entries: &[(&str, &str)]) -> BuiltMapping<CellKey, String> {
        let mut mapping = ValueMapping::new();
        for (k, v) in entries {
            mapping.rebind(CellKey::Str(k.to_string()), v.to_string());
        }
        BuiltMapping {
            row_keys: keys,
            mapping,
        }
    }

    #[test]
    fn test_synthetic_column_name() {
        assert_eq!(synthetic_column_name("Name"), "Fake_Name");
    }

    #[test]
    fn test_materialize_appends_row_for_row() {
        let mut df = df! { "Name" => &[Some("Alice"), Some("Bob"), None, Some("Alice")] }.unwrap();
        let built = built(
            vec![key("Alice"), key("Bob"), None, key("Alice")],
            &[("Alice", "Zoe"), ("Bob", "Max")],
        );

        let output = materialize(&mut df, "Name", &built).unwrap();
        assert_eq!(output, "Fake_Name");
        assert_eq!(df.width(), 2);

        let fake = df.column("Fake_Name").unwrap().str().unwrap();
        let values: Vec<_> = fake.iter().collect();
        assert_eq!(values, vec![Some("Zoe"), Some("Max"), None, Some("Zoe")]);
    }

    #[test]
    fn test_materialize_replaces_previous_synthetic_column() {
        let mut df = df! { "Name" => &["Alice"] }.unwrap();
        materialize(&mut df, "Name", &built(vec![key("Alice")], &[("Alice", "Zoe")])).unwrap();
        materialize(&mut df, "Name", &built(vec![key("Alice")], &[("Alice", "Max")])).unwrap();

        assert_eq!(df.width(), 2);
        let fake = df.column("Fake_Name").unwrap().str().unwrap();
        assert_eq!(fake.get(0), Some("Max"));
    }

    #[test]
    fn test_unmapped_value_is_error() {
        let mut df = df! { "Name" => &["Alice", "Bob"] }.unwrap();
        let built = built(vec![key("Alice"), key("Bob")], &[("Alice", "Zoe")]);

        let err = materialize(&mut df, "Name", &built).unwrap_err();
        assert!(matches!(err, AnonymizeError::UnmappedValue { row: 1, .. }));
        assert!(err.is_internal());
        assert_eq!(df.width(), 1);
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let mut df = df! { "Name" => &["Alice", "Bob"] }.unwrap();
        let built = built(vec![key("Alice")], &[("Alice", "Zoe")]);
        assert!(matches!(
            materialize(&mut df, "Name", &built),
            Err(AnonymizeError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_dates_materialize_as_date_dtype() {
        let mut df = df! { "Visit" => &["a", "b"] }.unwrap();
        let mut mapping = ValueMapping::new();
        mapping.rebind(
            CellKey::Str("a".to_string()),
            NaiveDate::from_ymd_opt(1970, 1, 2).unwrap(),
        );
        mapping.rebind(
            CellKey::Str("b".to_string()),
            NaiveDate::from_ymd_opt(2000, 3, 1).unwrap(),
        );
        let built = BuiltMapping {
            row_keys: vec![key("a"), key("b")],
            mapping,
        };

        materialize(&mut df, "Visit", &built).unwrap();
        let fake = df.column("Fake_Visit").unwrap();
        assert_eq!(fake.dtype(), &DataType::Date);
        assert_eq!(fake.get(0).unwrap(), AnyValue::Date(1));
    }
}
