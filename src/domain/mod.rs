//! Domain types for anonymize-df.
//!
//! The domain layer holds the error hierarchy ([`AnonymizeError`]) and the
//! [`Result`] alias used across the crate.
//!
//! ```rust
//! use anonymize_df::domain::{AnonymizeError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(AnonymizeError::ColumnNotFound("Name".to_string()))
//! }
//! assert!(example().is_err());
//! ```

pub mod errors;
pub mod result;

pub use errors::AnonymizeError;
pub use result::Result;
