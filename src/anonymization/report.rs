//! Per-session anonymization reporting
//!
//! The report records which synthetic columns a session produced and which
//! operations were skipped because no column was selected. It never holds
//! original or synthetic cell values.

use crate::anonymization::models::ColumnKind;
use crate::domain::Result;
use serde::{Deserialize, Serialize};

/// Summary of a session's anonymization operations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnonymizationReport {
    /// One entry per synthetic column written, in call order
    pub columns: Vec<ColumnSummary>,

    /// Operations skipped because their column selector was absent
    pub skipped: Vec<ColumnKind>,

    /// Total processing time across all operations (ms)
    pub total_processing_time_ms: u64,
}

/// Outcome of one anonymization operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub kind: ColumnKind,

    /// Column the synthetic values were derived from
    pub source_column: String,

    /// Column the synthetic values were written to
    pub output_column: String,

    /// Secondary column used for grouping or gender, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_column: Option<String>,

    /// Whether numbers were drawn from per-group bounds
    #[serde(default)]
    pub grouped: bool,

    pub rows: usize,

    /// Distinct original values that received a substitute
    pub distinct_values: usize,

    pub processing_time_ms: u64,
}

impl AnonymizationReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a written synthetic column
    pub fn add_column(&mut self, summary: ColumnSummary) {
        self.total_processing_time_ms += summary.processing_time_ms;
        self.columns.push(summary);
    }

    /// Record an operation skipped for lack of a column
    pub fn add_skipped(&mut self, kind: ColumnKind) {
        self.skipped.push(kind);
    }

    /// Output column names, in call order
    pub fn output_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|c| c.output_column.as_str())
            .collect()
    }

    /// Render as a human-readable summary
    pub fn format_text(&self) -> String {
        let mut out = String::new();
        out.push_str("Anonymization Report\n");
        out.push_str("====================\n");
        for column in &self.columns {
            out.push_str(&format!(
                "  {} -> {} ({}, {} rows, {} distinct values",
                column.source_column,
                column.output_column,
                column.kind,
                column.rows,
                column.distinct_values
            ));
            if let Some(secondary) = &column.secondary_column {
                out.push_str(&format!(", by {secondary}"));
            }
            out.push_str(")\n");
        }
        if !self.skipped.is_empty() {
            let skipped: Vec<_> = self.skipped.iter().map(ColumnKind::label).collect();
            out.push_str(&format!("  Skipped (no column selected): {}\n", skipped.join(", ")));
        }
        out.push_str(&format!(
            "  Total processing time: {} ms\n",
            self.total_processing_time_ms
        ));
        out
    }

    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
