//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AnonymizeConfig;
use crate::domain::errors::AnonymizeError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AnonymizeConfig
/// 4. Applies environment variable overrides (ANONYMIZE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, a referenced
/// environment variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use anonymize_df::config::loader::load_config;
///
/// let config = load_config("anonymize.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AnonymizeConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AnonymizeError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AnonymizeError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: AnonymizeConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        AnonymizeError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| AnonymizeError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(AnonymizeError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using ANONYMIZE_* prefix
///
/// Environment variables follow the pattern: ANONYMIZE_<SECTION>_<KEY>
/// For example: ANONYMIZE_APPLICATION_LOCALE, ANONYMIZE_INPUT_PATH
fn apply_env_overrides(config: &mut AnonymizeConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("ANONYMIZE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("ANONYMIZE_APPLICATION_LOCALE") {
        config.application.locale = val;
    }
    if let Ok(val) = std::env::var("ANONYMIZE_APPLICATION_SEED") {
        let seed = val.parse().map_err(|e| {
            AnonymizeError::Configuration(format!(
                "ANONYMIZE_APPLICATION_SEED must be an unsigned integer: {e}"
            ))
        })?;
        config.application.seed = Some(seed);
    }

    // Input overrides
    if let Ok(val) = std::env::var("ANONYMIZE_INPUT_PATH") {
        config.input.path = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("ANONYMIZE_INPUT_DELIMITER") {
        config.input.delimiter = val;
    }

    // Output overrides
    if let Ok(val) = std::env::var("ANONYMIZE_OUTPUT_PATH") {
        config.output.path = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("ANONYMIZE_OUTPUT_REPORT_PATH") {
        config.output.report_path = Some(PathBuf::from(val));
    }

    // Logging overrides
    if let Ok(val) = std::env::var("ANONYMIZE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("ANONYMIZE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
