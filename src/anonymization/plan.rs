//! Declarative anonymization plans
//!
//! A plan is an ordered list of [`ColumnRule`]s, usually read from the
//! `[[columns]]` tables of the configuration file. Form-driven callers often
//! leave optional fields blank, so blank strings deserialize to `None` and
//! the rule becomes a no-op rather than an error.

use crate::anonymization::mapping::GenderLabels;
use crate::anonymization::models::ColumnKind;
use crate::domain::{AnonymizeError, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// One anonymization step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnRule {
    Name {
        #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
        column: Option<String>,
        #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
        gender_column: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        genders: Option<GenderLabels>,
    },
    Id {
        #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
        column: Option<String>,
    },
    WholeNumber {
        #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
        column: Option<String>,
        #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
        group_by: Option<String>,
    },
    DecimalNumber {
        #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
        column: Option<String>,
        #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
        group_by: Option<String>,
    },
    Date {
        #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
        column: Option<String>,
    },
    Category {
        #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
        column: Option<String>,
    },
}

impl ColumnRule {
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnRule::Name { .. } => ColumnKind::Name,
            ColumnRule::Id { .. } => ColumnKind::Id,
            ColumnRule::WholeNumber { .. } => ColumnKind::WholeNumber,
            ColumnRule::DecimalNumber { .. } => ColumnKind::DecimalNumber,
            ColumnRule::Date { .. } => ColumnKind::Date,
            ColumnRule::Category { .. } => ColumnKind::Category,
        }
    }

    /// Primary column selector, `None` when the rule is a no-op
    pub fn column(&self) -> Option<&str> {
        match self {
            ColumnRule::Name { column, .. }
            | ColumnRule::Id { column }
            | ColumnRule::WholeNumber { column, .. }
            | ColumnRule::DecimalNumber { column, .. }
            | ColumnRule::Date { column }
            | ColumnRule::Category { column } => column.as_deref(),
        }
    }

    /// Check that the rule's optional parts are consistent
    ///
    /// # Errors
    ///
    /// A name rule with a gender column needs both gender labels, and the
    /// labels must differ.
    pub fn validate(&self) -> Result<()> {
        if let ColumnRule::Name {
            gender_column,
            genders,
            ..
        } = self
        {
            match (gender_column, genders) {
                (Some(gender_column), None) => {
                    return Err(AnonymizeError::Configuration(format!(
                        "name rule with gender_column '{gender_column}' requires genders"
                    )));
                }
                (_, Some(labels)) => {
                    GenderLabels::new(labels.male.clone(), labels.female.clone())?;
                }
                (None, None) => {}
            }
        }
        Ok(())
    }
}

/// Validate every rule of a plan, in order
pub fn validate_plan(rules: &[ColumnRule]) -> Result<()> {
    rules.iter().try_for_each(ColumnRule::validate)
}

fn blank_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Plan {
        columns: Vec<ColumnRule>,
    }

    #[test]
    fn test_parse_plan_from_toml() {
        let plan: Plan = toml::from_str(
            r#"
            [[columns]]
            kind = "name"
            column = "Name"
            gender_column = "Gender"
            genders = { male = "M", female = "F" }

            [[columns]]
            kind = "whole_number"
            column = "Amount"
            group_by = "Group"

            [[columns]]
            kind = "category"
            column = "Segment"
            "#,
        )
        .unwrap();

        assert_eq!(plan.columns.len(), 3);
        assert_eq!(plan.columns[0].kind(), ColumnKind::Name);
        assert_eq!(plan.columns[1].column(), Some("Amount"));
        assert_eq!(
            plan.columns[1],
            ColumnRule::WholeNumber {
                column: Some("Amount".to_string()),
                group_by: Some("Group".to_string()),
            }
        );
        assert!(validate_plan(&plan.columns).is_ok());
    }

    #[test]
    fn test_blank_selectors_are_absent() {
        let plan: Plan = toml::from_str(
            r#"
            [[columns]]
            kind = "id"
            column = "  "

            [[columns]]
            kind = "decimal_number"
            column = "Balance"
            group_by = ""

            [[columns]]
            kind = "date"
            "#,
        )
        .unwrap();

        assert_eq!(plan.columns[0].column(), None);
        assert_eq!(
            plan.columns[1],
            ColumnRule::DecimalNumber {
                column: Some("Balance".to_string()),
                group_by: None,
            }
        );
        assert_eq!(plan.columns[2].column(), None);
    }

    #[test]
    fn test_gender_column_requires_labels() {
        let rule = ColumnRule::Name {
            column: Some("Name".to_string()),
            gender_column: Some("Gender".to_string()),
            genders: None,
        };
        assert!(matches!(
            rule.validate(),
            Err(AnonymizeError::Configuration(_))
        ));
    }

    #[test]
    fn test_identical_labels_rejected() {
        let rule = ColumnRule::Name {
            column: Some("Name".to_string()),
            gender_column: Some("Gender".to_string()),
            genders: Some(GenderLabels {
                male: "X".to_string(),
                female: "X".to_string(),
            }),
        };
        assert!(matches!(
            rule.validate(),
            Err(AnonymizeError::InvalidGenders(_))
        ));
    }

    #[test]
    fn test_rule_serializes_with_kind_tag() {
        let rule = ColumnRule::Category {
            column: Some("Segment".to_string()),
        };
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["kind"], "category");
        assert_eq!(json["column"], "Segment");
    }
}
