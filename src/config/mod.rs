//! Configuration management.
//!
//! TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `ANONYMIZE_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load, including the anonymization plan
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use anonymize_df::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("anonymize.toml")?;
//! println!("Input: {}", config.input.path.display());
//! println!("{} column rules", config.columns.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//! locale = "en_GB"
//! seed = 42
//!
//! [input]
//! path = "${DATA_DIR}/customers.csv"
//!
//! [output]
//! path = "customers_anonymized.csv"
//! report_path = "anonymization_report.json"
//!
//! [[columns]]
//! kind = "name"
//! column = "Name"
//! gender_column = "Gender"
//! genders = { male = "M", female = "F" }
//!
//! [[columns]]
//! kind = "whole_number"
//! column = "Amount"
//! group_by = "Group"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{AnonymizeConfig, ApplicationConfig, InputConfig, LoggingConfig, OutputConfig};
