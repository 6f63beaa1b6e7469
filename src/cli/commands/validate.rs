//! Validate config command implementation
//!
//! This module implements the `validate-config` command.

use crate::config::load_config;
use crate::log_error_with_context;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates; a config that loads is valid.
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Configuration is invalid");
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Locale: {}", config.application.locale);
        match config.application.seed {
            Some(seed) => println!("  Seed: {seed}"),
            None => println!("  Seed: random"),
        }
        println!("  Input: {}", config.input.path.display());
        println!("  Output: {}", config.output.path.display());
        if let Some(report_path) = &config.output.report_path {
            println!("  Report: {}", report_path.display());
        }
        println!("  Column Rules:");
        for rule in &config.columns {
            match rule.column() {
                Some(column) => println!("    - {} ({})", column, rule.kind()),
                None => println!("    - <none> ({}, skipped)", rule.kind()),
            }
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "[input]\npath = \"in.csv\"\n\n[output]\npath = \"out.csv\"\n\n[[columns]]\nkind = \"id\"\ncolumn = \"Account\"\n"
        )
        .unwrap();
        file.flush().unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_validate_invalid_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[input]\npath = \"in.csv\"\n").unwrap();
        file.flush().unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .unwrap();
        assert_eq!(code, 2);
    }
}
