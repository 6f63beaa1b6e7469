//! Value mapping construction.
//!
//! Every builder follows the same shape: read the column into per-row keys,
//! walk the distinct keys, and bind each one to exactly one synthetic value.
//! The resulting [`BuiltMapping`] carries both the mapping and the per-row
//! keys so the materializer can resolve every row without re-reading the
//! dataset.

use super::aggregate::{Bounds, GroupBounds};
use super::source::{Sex, SyntheticSource};
use super::value::{CellKey, NumericCell};
use crate::domain::{AnonymizeError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Insertion-ordered map from original keys to synthetic values
#[derive(Debug, Clone)]
pub struct ValueMapping<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone, V> ValueMapping<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Bind `key` to the value produced by `generate` unless it is already bound.
    ///
    /// The generator only runs for unbound keys, so a bound value is never
    /// regenerated.
    pub fn bind_with<F>(&mut self, key: &K, generate: F) -> Result<&V>
    where
        F: FnOnce() -> Result<V>,
    {
        let slot = match self.index.get(key) {
            Some(slot) => *slot,
            None => {
                let value = generate()?;
                self.entries.push((key.clone(), value));
                self.index.insert(key.clone(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        Ok(&self.entries[slot].1)
    }

    /// Bind `key` to `value`, replacing any previous binding in place
    pub fn rebind(&mut self, key: K, value: V) {
        match self.index.get(&key) {
            Some(slot) => self.entries[*slot].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn resolve(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|slot| &self.entries[*slot].1)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the order their keys were first bound
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl<K: Eq + Hash + Clone, V> Default for ValueMapping<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// A mapping together with the key of every row it must resolve
#[derive(Debug, Clone)]
pub struct BuiltMapping<K, V> {
    /// Key per row, `None` for null cells
    pub row_keys: Vec<Option<K>>,
    pub mapping: ValueMapping<K, V>,
}

impl<K: Eq + Hash + Clone, V> BuiltMapping<K, V> {
    /// Number of distinct original values that received a substitute
    pub fn distinct_values(&self) -> usize {
        self.mapping.len()
    }
}

/// Distinct keys in order of first appearance
pub fn distinct<K: Eq + Hash + Clone>(keys: &[Option<K>]) -> Vec<K> {
    let mut seen = HashSet::new();
    keys.iter()
        .flatten()
        .filter(|key| seen.insert((*key).clone()))
        .cloned()
        .collect()
}

/// The dataset's labels for male and female, in that order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderLabels {
    pub male: String,
    pub female: String,
}

impl GenderLabels {
    pub fn new(male: impl Into<String>, female: impl Into<String>) -> Result<Self> {
        let labels = Self {
            male: male.into(),
            female: female.into(),
        };
        if labels.male == labels.female {
            return Err(AnonymizeError::InvalidGenders(format!(
                "male and female labels are both '{}'",
                labels.male
            )));
        }
        Ok(labels)
    }

    /// Fold a gender cell onto [`Sex`].
    ///
    /// Only an exact match of the male label is [`Sex::Male`]. Everything
    /// else, including the female label, unknown labels and nulls, is
    /// [`Sex::Female`].
    pub fn classify(&self, value: Option<&CellKey>) -> Sex {
        match value {
            Some(value) if value.to_string() == self.male => Sex::Male,
            _ => Sex::Female,
        }
    }
}

/// How grouped numeric mappings key their entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKeying {
    /// Key by (group, value): a value occurring in two groups gets one
    /// substitute per group, each inside that group's bounds
    #[default]
    ValueInGroup,
    /// Key by raw value only: a value occurring in several groups keeps the
    /// substitute generated for the group processed last
    ValueOnly,
}

/// Mapping key for numeric columns
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopedKey {
    /// Group the value was seen in, only set for [`GroupKeying::ValueInGroup`]
    pub group: Option<Option<CellKey>>,
    pub value: CellKey,
}

/// Build a person-name mapping, optionally styled by a gender column.
///
/// A name that appears under more than one gender violates the input
/// contract; the gender processed last wins and a warning is logged.
pub fn build_name_mapping(
    names: Vec<Option<CellKey>>,
    gender: Option<(&[Option<CellKey>], &GenderLabels)>,
    source: &mut dyn SyntheticSource,
    column: &str,
) -> Result<BuiltMapping<CellKey, String>> {
    let mut mapping = ValueMapping::new();

    match gender {
        None => {
            for name in distinct(&names) {
                mapping.bind_with(&name, || Ok(source.person_name(None)))?;
            }
        }
        Some((genders, labels)) => {
            if genders.len() != names.len() {
                return Err(AnonymizeError::LengthMismatch {
                    column: column.to_string(),
                    expected: names.len(),
                    actual: genders.len(),
                });
            }

            let mut partitions: Vec<(Option<&CellKey>, Vec<Option<CellKey>>)> = Vec::new();
            let mut slots: HashMap<Option<&CellKey>, usize> = HashMap::new();
            for (name, gender) in names.iter().zip(genders) {
                let slot = *slots.entry(gender.as_ref()).or_insert_with(|| {
                    partitions.push((gender.as_ref(), Vec::new()));
                    partitions.len() - 1
                });
                partitions[slot].1.push(name.clone());
            }

            let mut assigned: HashMap<CellKey, Sex> = HashMap::new();
            for (gender, members) in &partitions {
                let sex = labels.classify(*gender);
                for name in distinct(members) {
                    if let Some(previous) = assigned.insert(name.clone(), sex) {
                        tracing::warn!(
                            column = %column,
                            name_sex = ?previous,
                            overriding_sex = ?sex,
                            "Name appears under more than one gender; last gender wins"
                        );
                    }
                    mapping.rebind(name, source.person_name(Some(sex)));
                }
            }
        }
    }

    Ok(BuiltMapping {
        row_keys: names,
        mapping,
    })
}

/// Map every distinct value to a fresh bank-style identifier
pub fn build_identifier_mapping(
    keys: Vec<Option<CellKey>>,
    source: &mut dyn SyntheticSource,
) -> Result<BuiltMapping<CellKey, String>> {
    let mut mapping = ValueMapping::new();
    for key in distinct(&keys) {
        mapping.bind_with(&key, || Ok(source.identifier()))?;
    }
    Ok(BuiltMapping {
        row_keys: keys,
        mapping,
    })
}

/// Map every distinct value to a fresh date
pub fn build_date_mapping(
    keys: Vec<Option<CellKey>>,
    source: &mut dyn SyntheticSource,
) -> Result<BuiltMapping<CellKey, NaiveDate>> {
    let mut mapping = ValueMapping::new();
    for key in distinct(&keys) {
        mapping.bind_with(&key, || Ok(source.date()))?;
    }
    Ok(BuiltMapping {
        row_keys: keys,
        mapping,
    })
}

/// Label distinct values `<column> 1`, `<column> 2`, ... in first-appearance order
pub fn build_category_mapping(
    keys: Vec<Option<CellKey>>,
    column: &str,
) -> Result<BuiltMapping<CellKey, String>> {
    let mut mapping = ValueMapping::new();
    for (position, key) in distinct(&keys).into_iter().enumerate() {
        mapping.rebind(key, format!("{column} {}", position + 1));
    }
    Ok(BuiltMapping {
        row_keys: keys,
        mapping,
    })
}

/// Map whole numbers to integers drawn from their group's bounds
pub fn build_whole_number_mapping(
    keys: &[Option<CellKey>],
    groups: &GroupBounds<i64>,
    keying: GroupKeying,
    source: &mut dyn SyntheticSource,
) -> Result<BuiltMapping<ScopedKey, i64>> {
    build_numeric_mapping(keys, groups, keying, |bounds| {
        source.integer(bounds.min, bounds.max)
    })
}

/// Map decimals to values drawn from their group's bounds, rounded to 2 places
pub fn build_decimal_mapping(
    keys: &[Option<CellKey>],
    groups: &GroupBounds<f64>,
    keying: GroupKeying,
    source: &mut dyn SyntheticSource,
) -> Result<BuiltMapping<ScopedKey, f64>> {
    build_numeric_mapping(keys, groups, keying, |bounds| {
        let drawn = source.decimal(bounds.min, bounds.max)?;
        Ok(round_within(drawn, bounds))
    })
}

/// Shared walk for the numeric builders.
///
/// `keys` must be null wherever the numeric value is missing. Groups are
/// processed in first-appearance order. Within a group a key is generated
/// once; with [`GroupKeying::ValueOnly`] a later group overwrites the
/// substitute of a value it shares with an earlier group.
fn build_numeric_mapping<T, V, F>(
    keys: &[Option<CellKey>],
    groups: &GroupBounds<T>,
    keying: GroupKeying,
    mut generate: F,
) -> Result<BuiltMapping<ScopedKey, V>>
where
    T: NumericCell,
    F: FnMut(&Bounds<T>) -> Result<V>,
{
    let mut row_keys: Vec<Option<ScopedKey>> = vec![None; keys.len()];
    let mut mapping = ValueMapping::new();

    for group in groups.iter() {
        let scope = match keying {
            GroupKeying::ValueInGroup if groups.is_grouped() => Some(group.key.clone()),
            _ => None,
        };
        // only groups whose numbers are all null lack bounds
        let Some(bounds) = group.bounds.as_ref() else {
            continue;
        };
        let mut seen_in_group: HashSet<ScopedKey> = HashSet::new();

        for &row in &group.rows {
            let Some(value) = keys.get(row).cloned().flatten() else {
                continue;
            };
            let key = ScopedKey {
                group: scope.clone(),
                value,
            };

            if seen_in_group.insert(key.clone()) {
                mapping.rebind(key.clone(), generate(bounds)?);
            }
            row_keys[row] = Some(key);
        }
    }

    Ok(BuiltMapping { row_keys, mapping })
}

/// Round to 2 decimal places while staying inside `bounds`.
///
/// When rounding would leave the range, the nearest 2-place value inside it
/// is used instead; ranges narrower than 0.01 keep the unrounded draw.
pub fn round_within(value: f64, bounds: &Bounds<f64>) -> f64 {
    if bounds.is_point() {
        return bounds.min;
    }
    let rounded = (value * 100.0).round() / 100.0;
    if bounds.contains(rounded) {
        return rounded;
    }
    let candidate = if rounded < bounds.min {
        (bounds.min * 100.0).ceil() / 100.0
    } else {
        (bounds.max * 100.0).floor() / 100.0
    };
    if bounds.contains(candidate) {
        candidate
    } else {
        value
    }
}
