//! Run command implementation
//!
//! Reads the configured CSV, applies the `[[columns]]` plan and writes the
//! anonymized dataset and the optional JSON report.

use crate::anonymization::{Anonymizer, FakerSource, Locale};
use crate::config::{load_config, ApplicationConfig, InputConfig};
use crate::domain::Result;
use crate::log_error_with_context;
use anyhow::Context;
use clap::Args;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Override the input CSV path
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Override the output CSV path
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Apply the plan and print the report without writing any file
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    /// Execute the run command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting run command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if let Some(input) = &self.input {
            tracing::info!(input = %input.display(), "Overriding input path from CLI");
            config.input.path = input.clone();
        }
        if let Some(output) = &self.output {
            tracing::info!(output = %output.display(), "Overriding output path from CLI");
            config.output.path = output.clone();
        }

        if config.columns.is_empty() {
            tracing::warn!("No [[columns]] rules configured, output will match input");
        }

        let df = read_csv(&config.input)?;
        tracing::info!(
            rows = df.height(),
            columns = df.width(),
            path = %config.input.path.display(),
            "Dataset loaded"
        );

        let mut session = build_session(df, &config.application)?;
        if let Err(e) = session.apply_plan(&config.columns) {
            if e.is_internal() {
                return Err(e).context("Anonymization failed");
            }
            log_error_with_context!(&e, "Plan does not match the dataset");
            eprintln!("❌ {e}");
            return Ok(2);
        }

        let report = session.report().clone();
        println!("{}", report.format_text());

        if self.dry_run {
            println!("Dry run: nothing written");
            return Ok(0);
        }

        let delimiter = config
            .input
            .delimiter_byte()
            .map_err(anyhow::Error::msg)?;
        let mut df = session.into_data_frame();
        write_csv(&mut df, &config.output.path, delimiter)?;
        println!("✅ Anonymized dataset written: {}", config.output.path.display());

        if let Some(report_path) = &config.output.report_path {
            let json = report.to_json()?;
            fs::write(report_path, json)
                .with_context(|| format!("Failed to write report {}", report_path.display()))?;
            println!("✅ Report written: {}", report_path.display());
        }

        Ok(0)
    }
}

/// Start a session configured from the `[application]` section
pub fn build_session(df: DataFrame, application: &ApplicationConfig) -> Result<Anonymizer> {
    let locale = Locale::parse(&application.locale)?;
    let source = match application.seed {
        Some(seed) => FakerSource::seeded(locale, seed),
        None => FakerSource::new(locale),
    };
    Ok(Anonymizer::with_source(df, Box::new(source)).with_group_keying(application.group_keying))
}

/// Read the configured CSV into a DataFrame
pub fn read_csv(input: &InputConfig) -> anyhow::Result<DataFrame> {
    let delimiter = input.delimiter_byte().map_err(anyhow::Error::msg)?;
    CsvReadOptions::default()
        .with_has_header(input.has_header)
        .with_infer_schema_length(Some(100))
        .map_parse_options(|opts| opts.with_separator(delimiter))
        .try_into_reader_with_file_path(Some(input.path.clone()))
        .and_then(|reader| reader.finish())
        .with_context(|| format!("Failed to read CSV {}", input.path.display()))
}

/// Write a DataFrame as CSV with a header row
pub fn write_csv(df: &mut DataFrame, path: &Path, delimiter: u8) -> anyhow::Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(delimiter)
        .finish(df)
        .with_context(|| format!("Failed to write CSV {}", path.display()))
}
