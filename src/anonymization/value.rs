//! Cell values as hashable mapping keys.
//!
//! Polars `AnyValue` is neither `Eq` nor `Hash` (floats), so every cell read
//! from the dataset is converted into a [`CellKey`] before it is used as a
//! mapping or grouping key. Null cells have no key.

use crate::domain::{AnonymizeError, Result};
use polars::prelude::*;
use std::fmt;

/// Hashable representation of one non-null cell
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellKey {
    Bool(bool),
    Int(i64),
    UInt(u64),
    /// IEEE-754 bits, with `-0.0` folded onto `0.0` and one canonical NaN
    Float(u64),
    Str(String),
    /// Days since 1970-01-01
    Date(i32),
    /// Any other dtype, keyed by its display form
    Other(String),
}

impl CellKey {
    /// Convert a cell to a key, `None` for null
    pub fn from_any(value: AnyValue<'_>) -> Option<Self> {
        let key = match value {
            AnyValue::Null => return None,
            AnyValue::Boolean(b) => CellKey::Bool(b),
            AnyValue::Int8(v) => CellKey::Int(i64::from(v)),
            AnyValue::Int16(v) => CellKey::Int(i64::from(v)),
            AnyValue::Int32(v) => CellKey::Int(i64::from(v)),
            AnyValue::Int64(v) => CellKey::Int(v),
            AnyValue::UInt8(v) => CellKey::UInt(u64::from(v)),
            AnyValue::UInt16(v) => CellKey::UInt(u64::from(v)),
            AnyValue::UInt32(v) => CellKey::UInt(u64::from(v)),
            AnyValue::UInt64(v) => CellKey::UInt(v),
            AnyValue::Float32(v) => CellKey::from_f64(f64::from(v)),
            AnyValue::Float64(v) => CellKey::from_f64(v),
            AnyValue::String(s) => CellKey::Str(s.to_string()),
            AnyValue::StringOwned(s) => CellKey::Str(s.to_string()),
            AnyValue::Date(days) => CellKey::Date(days),
            other => CellKey::Other(other.to_string()),
        };
        Some(key)
    }

    fn from_f64(v: f64) -> Self {
        let canonical = if v == 0.0 {
            0.0
        } else if v.is_nan() {
            f64::NAN
        } else {
            v
        };
        CellKey::Float(canonical.to_bits())
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellKey::Bool(b) => write!(f, "{b}"),
            CellKey::Int(v) => write!(f, "{v}"),
            CellKey::UInt(v) => write!(f, "{v}"),
            CellKey::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            CellKey::Str(s) => f.write_str(s),
            CellKey::Date(days) => {
                let date = chrono::NaiveDate::default()
                    .checked_add_signed(chrono::Duration::days(i64::from(*days)));
                match date {
                    Some(date) => write!(f, "{date}"),
                    None => write!(f, "{days}"),
                }
            }
            CellKey::Other(s) => f.write_str(s),
        }
    }
}

/// Numeric cell types the range-preserving mappers operate on
pub trait NumericCell: Copy + PartialOrd + fmt::Display {
    /// Extract a number from a cell, `None` for null or a value this type
    /// cannot represent
    fn from_any(value: AnyValue<'_>) -> Option<Self>;
}

impl NumericCell for i64 {
    /// Floats are truncated toward zero
    fn from_any(value: AnyValue<'_>) -> Option<Self> {
        match value {
            AnyValue::Int8(v) => Some(i64::from(v)),
            AnyValue::Int16(v) => Some(i64::from(v)),
            AnyValue::Int32(v) => Some(i64::from(v)),
            AnyValue::Int64(v) => Some(v),
            AnyValue::UInt8(v) => Some(i64::from(v)),
            AnyValue::UInt16(v) => Some(i64::from(v)),
            AnyValue::UInt32(v) => Some(i64::from(v)),
            AnyValue::UInt64(v) => i64::try_from(v).ok(),
            AnyValue::Float32(v) if v.is_finite() => Some(v as i64),
            AnyValue::Float64(v) if v.is_finite() => Some(v as i64),
            _ => None,
        }
    }
}

impl NumericCell for f64 {
    fn from_any(value: AnyValue<'_>) -> Option<Self> {
        match value {
            AnyValue::Int8(v) => Some(f64::from(v)),
            AnyValue::Int16(v) => Some(f64::from(v)),
            AnyValue::Int32(v) => Some(f64::from(v)),
            AnyValue::Int64(v) => Some(v as f64),
            AnyValue::UInt8(v) => Some(f64::from(v)),
            AnyValue::UInt16(v) => Some(f64::from(v)),
            AnyValue::UInt32(v) => Some(f64::from(v)),
            AnyValue::UInt64(v) => Some(v as f64),
            AnyValue::Float32(v) if !v.is_nan() => Some(f64::from(v)),
            AnyValue::Float64(v) if !v.is_nan() => Some(v),
            _ => None,
        }
    }
}

/// Look up a column by name
pub fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| AnonymizeError::ColumnNotFound(name.to_string()))
}

/// Look up a column and require an integer or float dtype
pub fn numeric_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    let col = column(df, name)?;
    let numeric = matches!(
        col.dtype(),
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    );
    if !numeric {
        return Err(AnonymizeError::NonNumericColumn {
            column: name.to_string(),
            dtype: col.dtype().to_string(),
        });
    }
    Ok(col)
}

/// Read every cell of a column as a key, row for row
pub fn read_keys(col: &Column) -> Result<Vec<Option<CellKey>>> {
    let mut keys = Vec::with_capacity(col.len());
    for idx in 0..col.len() {
        keys.push(CellKey::from_any(col.get(idx)?));
    }
    Ok(keys)
}

/// Null and NaN cells count as missing
fn is_missing(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::Float32(v) => v.is_nan(),
        AnyValue::Float64(v) => v.is_nan(),
        _ => false,
    }
}

/// Read every cell of a numeric column, row for row
///
/// # Errors
///
/// Returns [`AnonymizeError::UnusableNumber`] for a present cell that `T`
/// cannot hold, such as an infinite float read as a whole number.
pub fn read_numbers<T: NumericCell>(col: &Column) -> Result<Vec<Option<T>>> {
    let mut values = Vec::with_capacity(col.len());
    for idx in 0..col.len() {
        let cell = col.get(idx)?;
        if is_missing(&cell) {
            values.push(None);
            continue;
        }
        let number = T::from_any(cell.clone()).ok_or_else(|| AnonymizeError::UnusableNumber {
            column: col.name().to_string(),
            row: idx,
            value: cell.to_string(),
        })?;
        values.push(Some(number));
    }
    Ok(values)
}
