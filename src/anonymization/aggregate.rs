//! Per-group numeric bounds.
//!
//! The range-preserving mappers draw synthetic numbers from the bounds of the
//! group a row belongs to. Without a grouping key the whole column forms a
//! single group.

use super::value::{self, CellKey, NumericCell};
use crate::domain::{AnonymizeError, Result};
use polars::prelude::DataFrame;
use std::collections::HashMap;

/// Inclusive `[min, max]` range observed in a group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: NumericCell> Bounds<T> {
    /// Zero-width bounds around a single observation
    pub fn point(value: T) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Widen the bounds to include `value`
    pub fn include(&mut self, value: T) {
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn is_point(&self) -> bool {
        self.min == self.max
    }
}

/// One group of rows sharing a grouping-key value
#[derive(Debug, Clone)]
pub struct Group<T> {
    /// Grouping-key value, `None` for the null group or an ungrouped column
    pub key: Option<CellKey>,
    /// Bounds of the group's non-null numbers, `None` if it has none
    pub bounds: Option<Bounds<T>>,
    /// Row indices belonging to this group, ascending
    pub rows: Vec<usize>,
}

/// Bounds for every group of a numeric column, in first-appearance order
#[derive(Debug, Clone)]
pub struct GroupBounds<T> {
    groups: Vec<Group<T>>,
    index: HashMap<Option<CellKey>, usize>,
    grouped: bool,
}

impl<T: NumericCell> GroupBounds<T> {
    /// Treat the whole column as one group bounded by its global min and max
    pub fn ungrouped(values: &[Option<T>]) -> Self {
        let group = Group {
            key: None,
            bounds: global_bounds(values),
            rows: (0..values.len()).collect(),
        };
        let mut index = HashMap::new();
        index.insert(None, 0);
        Self {
            groups: vec![group],
            index,
            grouped: false,
        }
    }

    /// Partition `values` by `keys` and compute each partition's bounds
    ///
    /// # Errors
    ///
    /// Returns [`AnonymizeError::LengthMismatch`] if the two slices do not
    /// describe the same rows.
    pub fn grouped(values: &[Option<T>], keys: &[Option<CellKey>], key_column: &str) -> Result<Self> {
        if values.len() != keys.len() {
            return Err(AnonymizeError::LengthMismatch {
                column: key_column.to_string(),
                expected: values.len(),
                actual: keys.len(),
            });
        }

        let mut groups: Vec<Group<T>> = Vec::new();
        let mut index: HashMap<Option<CellKey>, usize> = HashMap::new();

        for (row, (value, key)) in values.iter().zip(keys).enumerate() {
            let slot = *index.entry(key.clone()).or_insert_with(|| {
                groups.push(Group {
                    key: key.clone(),
                    bounds: None,
                    rows: Vec::new(),
                });
                groups.len() - 1
            });

            let group = &mut groups[slot];
            group.rows.push(row);
            if let Some(value) = value {
                match group.bounds.as_mut() {
                    Some(bounds) => bounds.include(*value),
                    None => group.bounds = Some(Bounds::point(*value)),
                }
            }
        }

        Ok(Self {
            groups,
            index,
            grouped: true,
        })
    }

    /// Bounds of the group with the given key
    pub fn get(&self, key: &Option<CellKey>) -> Option<&Bounds<T>> {
        self.index
            .get(key)
            .and_then(|slot| self.groups[*slot].bounds.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group<T>> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Whether the bounds were computed per grouping key
    pub fn is_grouped(&self) -> bool {
        self.grouped
    }
}

/// Min and max of the non-null values, `None` if every value is null
pub fn global_bounds<T: NumericCell>(values: &[Option<T>]) -> Option<Bounds<T>> {
    let mut bounds: Option<Bounds<T>> = None;
    for value in values.iter().flatten() {
        match bounds.as_mut() {
            Some(b) => b.include(*value),
            None => bounds = Some(Bounds::point(*value)),
        }
    }
    bounds
}

/// Compute per-group bounds of `value_column` keyed by `key_column`
pub fn group_bounds<T: NumericCell>(
    df: &DataFrame,
    value_column: &str,
    key_column: &str,
) -> Result<GroupBounds<T>> {
    let values = value::read_numbers::<T>(value::numeric_column(df, value_column)?)?;
    let keys = value::read_keys(value::column(df, key_column)?)?;
    GroupBounds::grouped(&values, &keys, key_column)
}
