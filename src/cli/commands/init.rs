//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "anonymize.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point [input] and [output] at your CSV files");
                println!("  2. Describe each column to anonymize under [[columns]]");
                println!("  3. Validate configuration: anonymize-df validate-config");
                println!("  4. Preview: anonymize-df run --dry-run");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Sample configuration with every column kind
    fn generate_config() -> String {
        r#"# anonymize-df configuration
#
# Each [[columns]] rule appends a Fake_<column> column to the dataset.
# Leave `column` empty to skip a rule.

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Locale for generated names: en_GB, en_US, fr_FR, pt_BR, ja_JP, zh_CN, zh_TW
locale = "en_GB"

# Fixed seed for reproducible output; remove for fresh values on every run
# seed = 42

# value_in_group: a number shared by two groups gets one substitute per group
# value_only: the group processed last decides the substitute
group_keying = "value_in_group"

[input]
path = "customers.csv"
delimiter = ","
has_header = true

[output]
path = "customers_anonymized.csv"
report_path = "anonymization_report.json"

[[columns]]
kind = "name"
column = "Name"
gender_column = "Gender"
genders = { male = "M", female = "F" }

[[columns]]
kind = "id"
column = "Account"

[[columns]]
kind = "whole_number"
column = "Amount"
group_by = "Group"

[[columns]]
kind = "decimal_number"
column = "Balance"
group_by = ""

[[columns]]
kind = "date"
column = "Opened"

[[columns]]
kind = "category"
column = "Segment"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnonymizeConfig;
    use tempfile::TempDir;

    #[test]
    fn test_generated_config_parses_and_validates() {
        let config: AnonymizeConfig = toml::from_str(&InitArgs::generate_config()).unwrap();
        assert_eq!(config.columns.len(), 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("anonymize.toml");
        fs::write(&path, "existing").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            force: false,
        };
        assert_eq!(args.execute().unwrap(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing");

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            force: true,
        };
        assert_eq!(args.execute().unwrap(), 0);
        assert!(fs::read_to_string(&path).unwrap().contains("[[columns]]"));
    }
}
