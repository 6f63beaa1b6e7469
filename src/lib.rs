// anonymize-df - Value-mapping anonymization for tabular data
// Copyright (c) 2025 anonymize-df Contributors
// Licensed under the BSD 3-Clause License

//! # anonymize-df
//!
//! Replaces the values of selected DataFrame columns with synthetic
//! substitutes while keeping the structure analysts rely on.
//!
//! ## Overview
//!
//! Every distinct original value is mapped to exactly one synthetic value and
//! the mapping is applied row for row into a new `Fake_<column>` column:
//! - **Names**: locale-aware, optionally styled by a gender column
//! - **Identifiers**: bank-account style codes
//! - **Whole and decimal numbers**: drawn from the column's range, or from
//!   the range of each row's group
//! - **Dates**: unrelated calendar dates
//! - **Categories**: `<column> 1`, `<column> 2`, ... in first-appearance order
//!
//! ## Architecture
//!
//! - [`anonymization`] - Value sources, mapping builders and the session facade
//! - [`config`] - Configuration management
//! - [`cli`] - Command-line interface and argument parsing
//! - [`domain`] - Error and result types
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust
//! use anonymize_df::anonymization::Anonymizer;
//! use polars::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let df = df! {
//!     "Account" => &["A-1", "A-2", "A-1"],
//!     "Segment" => &["retail", "sme", "retail"],
//! }?;
//!
//! let mut session = Anonymizer::new(df);
//! session
//!     .fake_ids(Some("Account"))?
//!     .fake_categories(Some("Segment"))?;
//!
//! let df = session.into_data_frame();
//! assert_eq!(df.width(), 4);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::Result`], whose error type is
//! [`domain::AnonymizeError`]. A missing column selector is not an error:
//! the operation is skipped and recorded in the session report.

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
