//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use anonymize_df::logging::init_logging;
//! use anonymize_df::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log a completed synthetic column
///
/// # Example
///
/// ```no_run
/// use anonymize_df::log_column_anonymized;
/// use anonymize_df::anonymization::ColumnKind;
/// use std::time::Duration;
///
/// log_column_anonymized!(ColumnKind::Id, "Account", "Fake_Account", 42, Duration::from_millis(3));
/// ```
#[macro_export]
macro_rules! log_column_anonymized {
    ($kind:expr, $column:expr, $output:expr, $distinct:expr, $duration:expr) => {
        tracing::info!(
            kind = %$kind,
            column = %$column,
            output_column = %$output,
            distinct_values = $distinct,
            duration_ms = $duration.as_millis(),
            "Synthetic column written"
        );
    };
}

/// Log an operation skipped because no column was selected
///
/// # Example
///
/// ```no_run
/// use anonymize_df::log_column_skipped;
/// use anonymize_df::anonymization::ColumnKind;
///
/// log_column_skipped!(ColumnKind::Date);
/// ```
#[macro_export]
macro_rules! log_column_skipped {
    ($kind:expr) => {
        tracing::info!(
            kind = %$kind,
            "No column selected, skipping"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use anonymize_df::log_error_with_context;
/// use anonymize_df::domain::AnonymizeError;
///
/// let error = AnonymizeError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
