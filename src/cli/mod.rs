//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use crate::config::{load_config, LoggingConfig};
use clap::{Parser, Subcommand};

/// anonymize-df - value-mapping anonymization for CSV datasets
#[derive(Parser, Debug)]
#[command(name = "anonymize-df")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "anonymize.toml", env = "ANONYMIZE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ANONYMIZE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Anonymize the configured dataset
    Run(commands::run::RunArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Cli {
    /// Log level and logging section to initialize logging with
    ///
    /// `--log-level` wins over `application.log_level`. `init` and configs
    /// that fail to load log to the console only; the command itself reports
    /// the load error.
    pub fn logging_settings(&self) -> (String, LoggingConfig) {
        let console_only = LoggingConfig {
            local_enabled: false,
            ..LoggingConfig::default()
        };
        let config = match &self.command {
            Commands::Init(_) => None,
            Commands::Run(_) | Commands::ValidateConfig(_) => load_config(&self.config).ok(),
        };

        match config {
            Some(config) => (
                self.log_level
                    .clone()
                    .unwrap_or(config.application.log_level),
                config.logging,
            ),
            None => (
                self.log_level.clone().unwrap_or_else(|| "info".to_string()),
                console_only,
            ),
        }
    }
}
