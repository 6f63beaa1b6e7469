//! Shared anonymization models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic kind of a column being anonymized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Name,
    Id,
    WholeNumber,
    DecimalNumber,
    Date,
    Category,
}

impl ColumnKind {
    /// Human-readable label used in logs and reports
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Name => "name",
            ColumnKind::Id => "id",
            ColumnKind::WholeNumber => "whole number",
            ColumnKind::DecimalNumber => "decimal number",
            ColumnKind::Date => "date",
            ColumnKind::Category => "category",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
