//! Synthetic value sources
//!
//! A [`SyntheticSource`] produces replacement values of a requested semantic
//! kind. The mapping builders treat it as an opaque generator: they only rely
//! on the range contracts documented on each method.

pub mod faker;
mod names;

use crate::domain::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use faker::FakerSource;

/// Sex used to style generated person names.
///
/// Gender columns are folded onto these variants by
/// [`GenderLabels::classify`](crate::anonymization::mapping::GenderLabels::classify).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

/// Trait for synthetic value generators
pub trait SyntheticSource: Send {
    /// Generate a person name, styled by `sex` when given, locale default otherwise
    fn person_name(&mut self, sex: Option<Sex>) -> String;

    /// Generate a bank-account style identifier
    fn identifier(&mut self) -> String;

    /// Generate an integer with `min <= n <= max`
    ///
    /// A zero-width range returns `min`. `min > max` is an error.
    fn integer(&mut self, min: i64, max: i64) -> Result<i64>;

    /// Generate a float drawn uniformly from `[min, max]`, unrounded
    ///
    /// A zero-width range returns `min`. `min > max` is an error.
    fn decimal(&mut self, min: f64, max: f64) -> Result<f64>;

    /// Generate a calendar date within the source's span
    fn date(&mut self) -> NaiveDate;
}
