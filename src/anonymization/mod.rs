//! Value-mapping anonymization for tabular data
//!
//! Each operation replaces the distinct values of one column with synthetic
//! substitutes and appends the result as a `Fake_<column>` column, keeping
//! properties useful for analytics: numeric ranges (globally or per group),
//! gender-styled names and category cardinality.
//!
//! # Architecture
//!
//! - **Source**: synthetic names, identifiers, numbers and dates
//! - **Aggregate**: global and per-group numeric bounds
//! - **Mapping**: one synthetic value per distinct original value
//! - **Materialize**: row-for-row application of a mapping
//! - **Session**: the [`Anonymizer`] facade owning the dataset
//!
//! # Usage
//!
//! ```rust,ignore
//! use anonymize_df::anonymization::Anonymizer;
//!
//! let mut session = Anonymizer::with_locale(df, "fr_FR")?;
//! session.fake_ids(Some("Account"))?.fake_categories(Some("Segment"))?;
//! let df = session.into_data_frame();
//! ```

pub mod aggregate;
pub mod locale;
pub mod mapping;
pub mod materialize;
pub mod models;
pub mod plan;
pub mod report;
pub mod session;
pub mod source;
pub mod value;

// Re-export main types
pub use locale::{Locale, DEFAULT_LOCALE};
pub use mapping::{GenderLabels, GroupKeying};
pub use materialize::{synthetic_column_name, SYNTHETIC_PREFIX};
pub use models::ColumnKind;
pub use plan::ColumnRule;
pub use report::{AnonymizationReport, ColumnSummary};
pub use session::{Anonymizer, Applied, GenderSplit, Invocation};
pub use source::{FakerSource, Sex, SyntheticSource};
