//! Session facade over one dataset
//!
//! An [`Anonymizer`] owns the dataset for the lifetime of the session. Each
//! operation reads one column, builds a value mapping for it and appends a
//! `Fake_<column>` column; existing columns are never modified.
//!
//! # Examples
//!
//! ```
//! use anonymize_df::anonymization::{Anonymizer, GenderSplit};
//! use polars::prelude::*;
//!
//! # fn example() -> anyhow::Result<()> {
//! let df = df! {
//!     "Name" => &["Alice", "Bob", "Alice"],
//!     "Gender" => &["F", "M", "F"],
//!     "Amount" => &[10i64, 20, 5],
//!     "Group" => &["A", "A", "B"],
//! }?;
//!
//! let mut session = Anonymizer::with_locale(df, "en_GB")?;
//! session
//!     .fake_names(Some("Name"), Some(GenderSplit::new("Gender", "M", "F")?))?
//!     .fake_whole_numbers(Some("Amount"), Some("Group"))?;
//!
//! let df = session.into_data_frame();
//! assert!(df.column("Fake_Name").is_ok());
//! assert!(df.column("Fake_Amount").is_ok());
//! # Ok(())
//! # }
//! ```

use crate::anonymization::aggregate::GroupBounds;
use crate::anonymization::locale::Locale;
use crate::anonymization::mapping::{self, GenderLabels, GroupKeying};
use crate::anonymization::materialize::materialize;
use crate::anonymization::models::ColumnKind;
use crate::anonymization::plan::{validate_plan, ColumnRule};
use crate::anonymization::report::{AnonymizationReport, ColumnSummary};
use crate::anonymization::source::{FakerSource, SyntheticSource};
use crate::anonymization::value::{self, CellKey, NumericCell};
use crate::domain::Result;
use crate::{log_column_anonymized, log_column_skipped};
use polars::prelude::DataFrame;
use std::time::Instant;

/// Gender column and labels used to style generated names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenderSplit<'a> {
    pub column: &'a str,
    pub labels: GenderLabels,
}

impl<'a> GenderSplit<'a> {
    pub fn new(column: &'a str, male: impl Into<String>, female: impl Into<String>) -> Result<Self> {
        Ok(Self {
            column,
            labels: GenderLabels::new(male, female)?,
        })
    }
}

/// Invocation style for [`Anonymizer::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Invocation {
    /// Return the session for further operations
    #[default]
    Chained,
    /// Return the dataset, ending the chain
    Terminal,
}

/// Result of [`Anonymizer::apply`], shaped by the [`Invocation`]
pub enum Applied<'a> {
    Session(&'a mut Anonymizer),
    Frame(&'a DataFrame),
}

impl<'a> Applied<'a> {
    /// The dataset, whichever style was used
    pub fn frame(self) -> &'a DataFrame {
        match self {
            Applied::Session(session) => {
                let session: &'a Anonymizer = session;
                &session.df
            }
            Applied::Frame(df) => df,
        }
    }
}

/// Anonymization session holding one dataset
pub struct Anonymizer {
    df: DataFrame,
    source: Box<dyn SyntheticSource>,
    keying: GroupKeying,
    report: AnonymizationReport,
}

impl std::fmt::Debug for Anonymizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Anonymizer")
            .field("df", &self.df)
            .field("keying", &self.keying)
            .field("report", &self.report)
            .finish_non_exhaustive()
    }
}

impl Anonymizer {
    /// Start a session with the default locale and an unseeded source
    pub fn new(df: DataFrame) -> Self {
        Self::with_source(df, Box::new(FakerSource::new(Locale::default())))
    }

    /// Start a session whose names follow the given locale tag
    ///
    /// # Errors
    ///
    /// Returns [`AnonymizeError::UnsupportedLocale`](crate::domain::AnonymizeError::UnsupportedLocale)
    /// for tags the name generator has no data for.
    pub fn with_locale(df: DataFrame, tag: &str) -> Result<Self> {
        let locale = Locale::parse(tag)?;
        Ok(Self::with_source(df, Box::new(FakerSource::new(locale))))
    }

    /// Start a session drawing from a caller-supplied source
    pub fn with_source(df: DataFrame, source: Box<dyn SyntheticSource>) -> Self {
        Self {
            df,
            source,
            keying: GroupKeying::default(),
            report: AnonymizationReport::new(),
        }
    }

    /// Choose how grouped numeric mappings key repeated values
    pub fn with_group_keying(mut self, keying: GroupKeying) -> Self {
        self.keying = keying;
        self
    }

    pub fn data_frame(&self) -> &DataFrame {
        &self.df
    }

    /// End the session and hand the dataset back
    pub fn into_data_frame(self) -> DataFrame {
        self.df
    }

    /// End the session and hand back the dataset together with its report
    pub fn show_data_frame(self) -> (DataFrame, AnonymizationReport) {
        (self.df, self.report)
    }

    pub fn report(&self) -> &AnonymizationReport {
        &self.report
    }

    /// Replace names, styled by sex when a gender split is given
    pub fn fake_names(
        &mut self,
        column: Option<&str>,
        gender: Option<GenderSplit<'_>>,
    ) -> Result<&mut Self> {
        let Some(column) = column else {
            return Ok(self.skip(ColumnKind::Name));
        };
        let started = Instant::now();

        let names = value::read_keys(value::column(&self.df, column)?)?;
        let built = match &gender {
            None => mapping::build_name_mapping(names, None, self.source.as_mut(), column)?,
            Some(split) => {
                let genders = value::read_keys(value::column(&self.df, split.column)?)?;
                tracing::info!(
                    column = %column,
                    gender_column = %split.column,
                    "Generating names by gender"
                );
                mapping::build_name_mapping(
                    names,
                    Some((genders.as_slice(), &split.labels)),
                    self.source.as_mut(),
                    column,
                )?
            }
        };

        let output = materialize(&mut self.df, column, &built)?;
        self.record(
            ColumnKind::Name,
            column,
            output,
            gender.map(|split| split.column.to_string()),
            false,
            built.distinct_values(),
            started,
        );
        Ok(self)
    }

    /// Replace every distinct value with a bank-style identifier
    pub fn fake_ids(&mut self, column: Option<&str>) -> Result<&mut Self> {
        let Some(column) = column else {
            return Ok(self.skip(ColumnKind::Id));
        };
        let started = Instant::now();

        let keys = value::read_keys(value::column(&self.df, column)?)?;
        let built = mapping::build_identifier_mapping(keys, self.source.as_mut())?;
        let output = materialize(&mut self.df, column, &built)?;

        self.record(ColumnKind::Id, column, output, None, false, built.distinct_values(), started);
        Ok(self)
    }

    /// Replace whole numbers with integers inside the global or per-group range
    pub fn fake_whole_numbers(
        &mut self,
        column: Option<&str>,
        group_by: Option<&str>,
    ) -> Result<&mut Self> {
        let Some(column) = column else {
            return Ok(self.skip(ColumnKind::WholeNumber));
        };
        let started = Instant::now();

        let (keys, groups) = self.numeric_input::<i64>(column, group_by)?;
        let built = mapping::build_whole_number_mapping(
            &keys,
            &groups,
            self.keying,
            self.source.as_mut(),
        )?;
        let output = materialize(&mut self.df, column, &built)?;

        self.record(
            ColumnKind::WholeNumber,
            column,
            output,
            group_by.map(str::to_string),
            groups.is_grouped(),
            built.distinct_values(),
            started,
        );
        Ok(self)
    }

    /// Replace decimals with 2-place values inside the global or per-group range
    pub fn fake_decimal_numbers(
        &mut self,
        column: Option<&str>,
        group_by: Option<&str>,
    ) -> Result<&mut Self> {
        let Some(column) = column else {
            return Ok(self.skip(ColumnKind::DecimalNumber));
        };
        let started = Instant::now();

        let (keys, groups) = self.numeric_input::<f64>(column, group_by)?;
        let built =
            mapping::build_decimal_mapping(&keys, &groups, self.keying, self.source.as_mut())?;
        let output = materialize(&mut self.df, column, &built)?;

        self.record(
            ColumnKind::DecimalNumber,
            column,
            output,
            group_by.map(str::to_string),
            groups.is_grouped(),
            built.distinct_values(),
            started,
        );
        Ok(self)
    }

    /// Replace every distinct value with an unrelated date
    pub fn fake_dates(&mut self, column: Option<&str>) -> Result<&mut Self> {
        let Some(column) = column else {
            return Ok(self.skip(ColumnKind::Date));
        };
        let started = Instant::now();

        let keys = value::read_keys(value::column(&self.df, column)?)?;
        let built = mapping::build_date_mapping(keys, self.source.as_mut())?;
        let output = materialize(&mut self.df, column, &built)?;

        self.record(ColumnKind::Date, column, output, None, false, built.distinct_values(), started);
        Ok(self)
    }

    /// Replace categories with `<column> 1`, `<column> 2`, ... labels
    pub fn fake_categories(&mut self, column: Option<&str>) -> Result<&mut Self> {
        let Some(column) = column else {
            return Ok(self.skip(ColumnKind::Category));
        };
        let started = Instant::now();

        let keys = value::read_keys(value::column(&self.df, column)?)?;
        let built = mapping::build_category_mapping(keys, column)?;
        let output = materialize(&mut self.df, column, &built)?;

        self.record(
            ColumnKind::Category,
            column,
            output,
            None,
            false,
            built.distinct_values(),
            started,
        );
        Ok(self)
    }

    /// Run one rule, returning the session or the dataset
    pub fn apply(&mut self, rule: &ColumnRule, invocation: Invocation) -> Result<Applied<'_>> {
        self.apply_rule(rule)?;
        Ok(match invocation {
            Invocation::Chained => Applied::Session(self),
            Invocation::Terminal => Applied::Frame(&self.df),
        })
    }

    /// Validate and run every rule of a plan, in order
    pub fn apply_plan(&mut self, rules: &[ColumnRule]) -> Result<&mut Self> {
        validate_plan(rules)?;
        for rule in rules {
            self.apply_rule(rule)?;
        }
        Ok(self)
    }

    fn apply_rule(&mut self, rule: &ColumnRule) -> Result<()> {
        rule.validate()?;
        match rule {
            ColumnRule::Name {
                column,
                gender_column,
                genders,
            } => {
                let split = match (gender_column, genders) {
                    (Some(gender_column), Some(labels)) => Some(GenderSplit {
                        column: gender_column,
                        labels: labels.clone(),
                    }),
                    _ => None,
                };
                self.fake_names(column.as_deref(), split)?;
            }
            ColumnRule::Id { column } => {
                self.fake_ids(column.as_deref())?;
            }
            ColumnRule::WholeNumber { column, group_by } => {
                self.fake_whole_numbers(column.as_deref(), group_by.as_deref())?;
            }
            ColumnRule::DecimalNumber { column, group_by } => {
                self.fake_decimal_numbers(column.as_deref(), group_by.as_deref())?;
            }
            ColumnRule::Date { column } => {
                self.fake_dates(column.as_deref())?;
            }
            ColumnRule::Category { column } => {
                self.fake_categories(column.as_deref())?;
            }
        }
        Ok(())
    }

    /// Read a numeric column's keys and bounds.
    ///
    /// Keys are masked to null wherever the number is missing, so NaN cells
    /// stay null like null cells do.
    fn numeric_input<T: NumericCell>(
        &self,
        column: &str,
        group_by: Option<&str>,
    ) -> Result<(Vec<Option<CellKey>>, GroupBounds<T>)> {
        let col = value::numeric_column(&self.df, column)?;
        let numbers = value::read_numbers::<T>(col)?;
        let keys: Vec<Option<CellKey>> = value::read_keys(col)?
            .into_iter()
            .zip(&numbers)
            .map(|(key, number)| if number.is_some() { key } else { None })
            .collect();

        let groups = match group_by {
            None => GroupBounds::ungrouped(&numbers),
            Some(group_by) => {
                let group_keys = value::read_keys(value::column(&self.df, group_by)?)?;
                let groups = GroupBounds::grouped(&numbers, &group_keys, group_by)?;
                tracing::info!(
                    column = %column,
                    group_by = %group_by,
                    groups = groups.len(),
                    "Generating numbers within group bounds"
                );
                groups
            }
        };

        Ok((keys, groups))
    }

    fn skip(&mut self, kind: ColumnKind) -> &mut Self {
        log_column_skipped!(kind);
        self.report.add_skipped(kind);
        self
    }

    #[allow(clippy::too_many_arguments)]
    fn record(
        &mut self,
        kind: ColumnKind,
        column: &str,
        output: String,
        secondary_column: Option<String>,
        grouped: bool,
        distinct_values: usize,
        started: Instant,
    ) {
        let elapsed = started.elapsed();
        log_column_anonymized!(kind, column, &output, distinct_values, elapsed);
        self.report.add_column(ColumnSummary {
            kind,
            source_column: column.to_string(),
            output_column: output,
            secondary_column,
            grouped,
            rows: self.df.height(),
            distinct_values,
            processing_time_ms: elapsed.as_millis() as u64,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::locale::Locale;
    use crate::domain::AnonymizeError;
    use polars::prelude::*;

    fn seeded(df: DataFrame) -> Anonymizer {
        Anonymizer::with_source(df, Box::new(FakerSource::seeded(Locale::En, 42)))
    }

    fn strings(df: &DataFrame, column: &str) -> Vec<Option<String>> {
        df.column(column)
            .unwrap()
            .str()
            .unwrap()
            .iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    #[test]
    fn test_absent_selector_is_noop() {
        let df = df! { "Name" => &["Alice"], "Amount" => &[1i64] }.unwrap();
        let mut session = seeded(df);

        session
            .fake_names(None, None)
            .unwrap()
            .fake_ids(None)
            .unwrap()
            .fake_whole_numbers(None, Some("Amount"))
            .unwrap()
            .fake_decimal_numbers(None, None)
            .unwrap()
            .fake_dates(None)
            .unwrap()
            .fake_categories(None)
            .unwrap();

        assert_eq!(session.data_frame().width(), 2);
        assert_eq!(session.report().skipped.len(), 6);
        assert!(session.report().columns.is_empty());
    }

    #[test]
    fn test_missing_column_is_error() {
        let df = df! { "Name" => &["Alice"] }.unwrap();
        let mut session = seeded(df);
        assert!(matches!(
            session.fake_ids(Some("Account")),
            Err(AnonymizeError::ColumnNotFound(c)) if c == "Account"
        ));
        assert_eq!(session.data_frame().width(), 1);
    }

    #[test]
    fn test_missing_group_column_is_error() {
        let df = df! { "Amount" => &[1i64, 2] }.unwrap();
        let mut session = seeded(df);
        assert!(matches!(
            session.fake_whole_numbers(Some("Amount"), Some("Group")),
            Err(AnonymizeError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_names_are_consistent_per_value() {
        let df = df! { "Name" => &[Some("Alice"), Some("Bob"), None, Some("Alice")] }.unwrap();
        let mut session = seeded(df);
        session.fake_names(Some("Name"), None).unwrap();

        let fake = strings(session.data_frame(), "Fake_Name");
        assert_eq!(fake.len(), 4);
        assert_eq!(fake[0], fake[3]);
        assert!(fake[0].is_some());
        assert_eq!(fake[2], None);
        assert_eq!(session.report().columns[0].distinct_values, 2);
    }

    #[test]
    fn test_ids_have_bank_layout() {
        let df = df! { "Account" => &[111i64, 222, 111] }.unwrap();
        let mut session = seeded(df);
        session.fake_ids(Some("Account")).unwrap();

        let fake = strings(session.data_frame(), "Fake_Account");
        assert_eq!(fake[0], fake[2]);
        assert_ne!(fake[0], fake[1]);
        let id = fake[0].clone().unwrap();
        assert_eq!(id.len(), 18);
        assert!(id[..4].chars().all(|c| c.is_ascii_uppercase()));
        assert!(id[4..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_whole_numbers_ungrouped_stay_in_global_range() {
        let df = df! { "Amount" => &[Some(3i64), Some(-7), None, Some(12), Some(3)] }.unwrap();
        let mut session = seeded(df);
        session.fake_whole_numbers(Some("Amount"), None).unwrap();

        let fake: Vec<Option<i64>> = session
            .data_frame()
            .column("Fake_Amount")
            .unwrap()
            .i64()
            .unwrap()
            .iter()
            .collect();
        assert_eq!(fake[2], None);
        assert_eq!(fake[0], fake[4]);
        for value in fake.iter().flatten() {
            assert!((-7..=12).contains(value));
        }
        assert!(!session.report().columns[0].grouped);
    }

    #[test]
    fn test_decimals_grouped_stay_in_group_range() {
        let df = df! {
            "Balance" => &[1.5f64, 9.25, 100.0, 250.75, 42.0],
            "Branch" => &["north", "north", "south", "south", "east"],
        }
        .unwrap();
        let mut session = seeded(df);
        session
            .fake_decimal_numbers(Some("Balance"), Some("Branch"))
            .unwrap();

        let fake: Vec<f64> = session
            .data_frame()
            .column("Fake_Balance")
            .unwrap()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert!((1.5..=9.25).contains(&fake[0]));
        assert!((1.5..=9.25).contains(&fake[1]));
        assert!((100.0..=250.75).contains(&fake[2]));
        assert!((100.0..=250.75).contains(&fake[3]));
        assert_eq!(fake[4], 42.0);
        for value in &fake {
            assert!(((value * 100.0).round() - value * 100.0).abs() < 1e-6);
        }
        assert!(session.report().columns[0].grouped);
    }

    #[test]
    fn test_non_numeric_column_rejected() {
        let df = df! { "Amount" => &["ten", "twenty"] }.unwrap();
        let mut session = seeded(df);
        assert!(matches!(
            session.fake_whole_numbers(Some("Amount"), None),
            Err(AnonymizeError::NonNumericColumn { .. })
        ));
    }

    #[test]
    fn test_dates_are_dates() {
        let df = df! { "Opened" => &["2020-01-01", "2021-06-30", "2020-01-01"] }.unwrap();
        let mut session = seeded(df);
        session.fake_dates(Some("Opened")).unwrap();

        let fake = session.data_frame().column("Fake_Opened").unwrap();
        assert_eq!(fake.dtype(), &DataType::Date);
        assert_eq!(fake.get(0).unwrap(), fake.get(2).unwrap());
    }

    #[test]
    fn test_categories_enumerate() {
        let df = df! { "Segment" => &["retail", "sme", "retail", "corporate"] }.unwrap();
        let mut session = seeded(df);
        session.fake_categories(Some("Segment")).unwrap();

        let fake = strings(session.data_frame(), "Fake_Segment");
        assert_eq!(
            fake,
            vec![
                Some("Segment 1".to_string()),
                Some("Segment 2".to_string()),
                Some("Segment 1".to_string()),
                Some("Segment 3".to_string()),
            ]
        );
    }

    #[test]
    fn test_rerun_replaces_synthetic_column() {
        let df = df! { "Segment" => &["a", "b"] }.unwrap();
        let mut session = seeded(df);
        session
            .fake_categories(Some("Segment"))
            .unwrap()
            .fake_categories(Some("Segment"))
            .unwrap();
        assert_eq!(session.data_frame().width(), 2);
        assert_eq!(session.report().columns.len(), 2);
    }

    #[test]
    fn test_apply_invocation_styles() {
        let df = df! { "Segment" => &["a", "b"], "Account" => &["x", "y"] }.unwrap();
        let mut session = seeded(df);

        let category = ColumnRule::Category {
            column: Some("Segment".to_string()),
        };
        match session.apply(&category, Invocation::Chained).unwrap() {
            Applied::Session(s) => assert_eq!(s.data_frame().width(), 3),
            Applied::Frame(_) => panic!("expected the session"),
        }

        let id = ColumnRule::Id {
            column: Some("Account".to_string()),
        };
        match session.apply(&id, Invocation::Terminal).unwrap() {
            Applied::Frame(df) => assert_eq!(df.width(), 4),
            Applied::Session(_) => panic!("expected the dataset"),
        }
    }

    #[test]
    fn test_apply_plan_validates_first() {
        let df = df! { "Segment" => &["a"], "Name" => &["n"] }.unwrap();
        let mut session = seeded(df);
        let rules = vec![
            ColumnRule::Category {
                column: Some("Segment".to_string()),
            },
            ColumnRule::Name {
                column: Some("Name".to_string()),
                gender_column: Some("Gender".to_string()),
                genders: None,
            },
        ];

        assert!(session.apply_plan(&rules).is_err());
        assert_eq!(session.data_frame().width(), 2);
    }

    #[test]
    fn test_unsupported_locale() {
        let df = df! { "Name" => &["a"] }.unwrap();
        assert!(matches!(
            Anonymizer::with_locale(df, "xx_YY"),
            Err(AnonymizeError::UnsupportedLocale(_))
        ));
    }

    #[test]
    fn test_show_data_frame_returns_report() {
        let df = df! { "Tier" => &["a", "b"] }.unwrap();
        let mut session = seeded(df);
        session.fake_categories(Some("Tier")).unwrap();

        let (df, report) = session.show_data_frame();
        assert!(df.column("Fake_Tier").is_ok());
        assert_eq!(report.output_columns(), vec!["Fake_Tier"]);
    }
}
