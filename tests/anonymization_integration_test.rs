//! End-to-end tests for the anonymization session

use anonymize_df::anonymization::{
    Anonymizer, Applied, ColumnRule, FakerSource, GenderSplit, GroupKeying, Invocation, Locale,
    Sex, SyntheticSource,
};
use anonymize_df::domain::Result;
use chrono::NaiveDate;
use polars::prelude::*;

/// Source with predictable, sex-tagged output
#[derive(Default)]
struct ScriptedSource {
    counter: usize,
}

impl ScriptedSource {
    fn next(&mut self) -> usize {
        self.counter += 1;
        self.counter
    }
}

impl SyntheticSource for ScriptedSource {
    fn person_name(&mut self, sex: Option<Sex>) -> String {
        let n = self.next();
        match sex {
            Some(Sex::Male) => format!("male-{n}"),
            Some(Sex::Female) => format!("female-{n}"),
            None => format!("person-{n}"),
        }
    }

    fn identifier(&mut self) -> String {
        format!("ID{:016}", self.next())
    }

    fn integer(&mut self, min: i64, _max: i64) -> Result<i64> {
        Ok(min)
    }

    fn decimal(&mut self, _min: f64, max: f64) -> Result<f64> {
        Ok(max)
    }

    fn date(&mut self) -> NaiveDate {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
    }
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

fn ints(df: &DataFrame, column: &str) -> Vec<Option<i64>> {
    df.column(column).unwrap().i64().unwrap().iter().collect()
}

#[test]
fn test_names_styled_by_gender() {
    let df = df! {
        "Name" => &["Alice", "Bob", "Alice"],
        "Gender" => &["F", "M", "F"],
    }
    .unwrap();

    let mut session = Anonymizer::with_source(df, Box::new(ScriptedSource::default()));
    session
        .fake_names(Some("Name"), Some(GenderSplit::new("Gender", "M", "F").unwrap()))
        .unwrap();

    let fake = strings(session.data_frame(), "Fake_Name");
    assert_eq!(fake[0], fake[2]);
    assert_ne!(fake[0], fake[1]);
    assert!(fake[0].as_deref().unwrap().starts_with("female-"));
    assert!(fake[1].as_deref().unwrap().starts_with("male-"));
    assert_eq!(session.report().columns[0].distinct_values, 2);
}

#[test]
fn test_unknown_gender_labels_fall_back_to_female() {
    let df = df! {
        "Name" => &[Some("Sam"), Some("Kim"), Some("Lee")],
        "Gender" => &[Some("X"), None, Some("M")],
    }
    .unwrap();

    let mut session = Anonymizer::with_source(df, Box::new(ScriptedSource::default()));
    session
        .fake_names(Some("Name"), Some(GenderSplit::new("Gender", "M", "F").unwrap()))
        .unwrap();

    let fake = strings(session.data_frame(), "Fake_Name");
    assert!(fake[0].as_deref().unwrap().starts_with("female-"));
    assert!(fake[1].as_deref().unwrap().starts_with("female-"));
    assert!(fake[2].as_deref().unwrap().starts_with("male-"));
}

#[test]
fn test_grouped_singleton_keeps_exact_value() {
    let df = df! {
        "Amount" => &[10i64, 20, 5],
        "Group" => &["A", "A", "B"],
    }
    .unwrap();

    let mut session =
        Anonymizer::with_source(df, Box::new(FakerSource::seeded(Locale::En, 1)));
    session
        .fake_whole_numbers(Some("Amount"), Some("Group"))
        .unwrap();

    let fake = ints(session.data_frame(), "Fake_Amount");
    assert!((10..=20).contains(&fake[0].unwrap()));
    assert!((10..=20).contains(&fake[1].unwrap()));
    assert_eq!(fake[2], Some(5));
}

#[test]
fn test_grouped_range_containment_many_seeds() {
    for seed in 0..20 {
        let df = df! {
            "Amount" => &[100i64, 250, 175, 3, 9, 3, 1000],
            "Branch" => &["n", "n", "n", "s", "s", "s", "e"],
        }
        .unwrap();

        let mut session =
            Anonymizer::with_source(df, Box::new(FakerSource::seeded(Locale::En, seed)));
        session
            .fake_whole_numbers(Some("Amount"), Some("Branch"))
            .unwrap();

        let fake = ints(session.data_frame(), "Fake_Amount");
        for value in &fake[0..3] {
            assert!((100..=250).contains(&value.unwrap()));
        }
        for value in &fake[3..6] {
            assert!((3..=9).contains(&value.unwrap()));
        }
        assert_eq!(fake[3], fake[5]);
        assert_eq!(fake[6], Some(1000));
    }
}

#[test]
fn test_value_only_keying_shares_substitute_across_groups() {
    // 15 occurs in group A (10..=20) and group B (15..=200)
    let df = df! {
        "Amount" => &[10i64, 15, 20, 15, 200],
        "Group" => &["A", "A", "A", "B", "B"],
    }
    .unwrap();

    let mut session = Anonymizer::with_source(df, Box::new(ScriptedSource::default()))
        .with_group_keying(GroupKeying::ValueOnly);
    session
        .fake_whole_numbers(Some("Amount"), Some("Group"))
        .unwrap();

    // the scripted source returns the group minimum; group B is processed last
    let fake = ints(session.data_frame(), "Fake_Amount");
    assert_eq!(fake[1], Some(15));
    assert_eq!(fake[3], Some(15));
    assert_eq!(fake[0], Some(10));
}

#[test]
fn test_value_in_group_keying_keeps_each_group_bounds() {
    let df = df! {
        "Amount" => &[12i64, 15, 20, 15, 200],
        "Group" => &["A", "A", "A", "B", "B"],
    }
    .unwrap();

    let mut session = Anonymizer::with_source(df, Box::new(ScriptedSource::default()));
    session
        .fake_whole_numbers(Some("Amount"), Some("Group"))
        .unwrap();

    let fake = ints(session.data_frame(), "Fake_Amount");
    assert_eq!(fake[1], Some(12));
    assert_eq!(fake[3], Some(15));
}

#[test]
fn test_category_enumeration() {
    let df = df! { "Tier" => &["gold", "silver", "gold", "bronze", "silver"] }.unwrap();

    let mut session = Anonymizer::new(df);
    session.fake_categories(Some("Tier")).unwrap();

    let fake = strings(session.data_frame(), "Fake_Tier");
    let expected: Vec<Option<String>> = ["Tier 1", "Tier 2", "Tier 1", "Tier 3", "Tier 2"]
        .iter()
        .map(|s| Some(s.to_string()))
        .collect();
    assert_eq!(fake, expected);
}

#[test]
fn test_no_op_safety_for_every_operation() {
    let df = df! {
        "Name" => &["Alice"],
        "Amount" => &[1i64],
    }
    .unwrap();
    let before: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|c| c.to_string())
        .collect();

    let mut session = Anonymizer::new(df);
    session
        .fake_names(None, Some(GenderSplit::new("Gender", "M", "F").unwrap()))
        .unwrap()
        .fake_ids(None)
        .unwrap()
        .fake_whole_numbers(None, None)
        .unwrap()
        .fake_decimal_numbers(None, Some("Amount"))
        .unwrap()
        .fake_dates(None)
        .unwrap()
        .fake_categories(None)
        .unwrap();

    let after: Vec<String> = session
        .data_frame()
        .get_column_names()
        .iter()
        .map(|c| c.to_string())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_chaining_equivalence() {
    let df = df! {
        "Account" => &["a", "b", "a", "c"],
        "Segment" => &["x", "y", "y", "x"],
    }
    .unwrap();

    let mut chained =
        Anonymizer::with_source(df.clone(), Box::new(FakerSource::seeded(Locale::En, 9)));
    chained
        .fake_ids(Some("Account"))
        .unwrap()
        .fake_categories(Some("Segment"))
        .unwrap();
    let chained = chained.into_data_frame();

    let id_rule = ColumnRule::Id {
        column: Some("Account".to_string()),
    };
    let mut first = Anonymizer::with_source(df, Box::new(FakerSource::seeded(Locale::En, 9)));
    let intermediate = match first.apply(&id_rule, Invocation::Terminal).unwrap() {
        Applied::Frame(frame) => frame.clone(),
        Applied::Session(_) => panic!("expected the dataset"),
    };

    let category_rule = ColumnRule::Category {
        column: Some("Segment".to_string()),
    };
    let mut second = Anonymizer::new(intermediate);
    let manual = second
        .apply(&category_rule, Invocation::Terminal)
        .unwrap()
        .frame()
        .clone();

    assert!(chained.equals_missing(&manual));
}

#[test]
fn test_output_rows_match_input_rows() {
    let df = df! {
        "Opened" => &[Some("2021-01-01"), None, Some("2021-01-01"), Some("2022-02-02")],
        "Balance" => &[Some(1.25f64), Some(3.5), None, Some(2.0)],
    }
    .unwrap();

    let mut session = Anonymizer::with_source(df, Box::new(ScriptedSource::default()));
    session
        .fake_dates(Some("Opened"))
        .unwrap()
        .fake_decimal_numbers(Some("Balance"), None)
        .unwrap();

    let df = session.into_data_frame();
    assert_eq!(df.height(), 4);

    let dates = df.column("Fake_Opened").unwrap();
    assert_eq!(dates.null_count(), 1);
    assert!(dates.get(1).unwrap().is_null());

    let balances: Vec<Option<f64>> = df.column("Fake_Balance").unwrap().f64().unwrap().iter().collect();
    assert_eq!(balances, vec![Some(3.5), Some(3.5), None, Some(3.5)]);
}

#[test]
fn test_apply_plan_records_report() {
    let df = df! {
        "Name" => &["Alice", "Bob"],
        "Gender" => &["F", "M"],
        "Amount" => &[1i64, 2],
    }
    .unwrap();

    let plan: Vec<ColumnRule> = serde_json::from_str(
        r#"[
            {"kind": "name", "column": "Name", "gender_column": "Gender",
             "genders": {"male": "M", "female": "F"}},
            {"kind": "whole_number", "column": "Amount", "group_by": ""},
            {"kind": "category", "column": ""}
        ]"#,
    )
    .unwrap();

    let mut session = Anonymizer::new(df);
    session.apply_plan(&plan).unwrap();

    let report = session.report();
    assert_eq!(report.output_columns(), vec!["Fake_Name", "Fake_Amount"]);
    assert_eq!(report.columns[0].secondary_column.as_deref(), Some("Gender"));
    assert!(!report.columns[1].grouped);
    assert_eq!(report.skipped.len(), 1);
}
