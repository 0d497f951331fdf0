//! Column classification driving value coercion.
//!
//! Every input header maps to exactly one [`ColumnKind`]. Known numeric, date,
//! and nullable-text columns come from a [`ColumnClassification`]; anything not
//! listed is quoted text. The built-in classification matches the properties
//! export, and a YAML file can replace it wholesale.

use std::{collections::BTreeSet, fmt, fs, path::Path};

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

const NUMERIC_COLUMNS: &[&str] = &[
    "id",
    "units",
    "buildings",
    "lat",
    "lon",
    "vo2_raise",
    "total_equity",
    "total_debt",
    "purchase_price",
    "projected_lp_irr",
    "projected_irr",
    "projected_multiple",
    "senior_loan_rate",
];

const DATE_COLUMNS: &[&str] = &["investment_date", "exit_date"];

const NULLABLE_TEXT_COLUMNS: &[&str] = &["beds", "website"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Numeric,
    Date,
    NullableText,
    Text,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Date => "date",
            ColumnKind::NullableText => "nullable-text",
            ColumnKind::Text => "text",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnClassification {
    #[serde(default)]
    pub numeric: BTreeSet<String>,
    #[serde(default)]
    pub date: BTreeSet<String>,
    #[serde(default)]
    pub nullable_text: BTreeSet<String>,
}

impl ColumnClassification {
    /// Classification for the properties spreadsheet export.
    pub fn builtin() -> Self {
        let to_set = |names: &[&str]| -> BTreeSet<String> {
            names.iter().map(|name| name.to_string()).collect()
        };
        Self {
            numeric: to_set(NUMERIC_COLUMNS),
            date: to_set(DATE_COLUMNS),
            nullable_text: to_set(NULLABLE_TEXT_COLUMNS),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Opening classification file {path:?}"))?;
        Self::from_yaml(&raw).with_context(|| format!("Parsing classification file {path:?}"))
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        let classification: Self = serde_yaml::from_str(raw)?;
        classification.ensure_disjoint()?;
        Ok(classification)
    }

    /// Loads `path` when given, otherwise falls back to [`ColumnClassification::builtin`].
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn ensure_disjoint(&self) -> Result<()> {
        let sets = [
            (ColumnKind::Numeric, &self.numeric),
            (ColumnKind::Date, &self.date),
            (ColumnKind::NullableText, &self.nullable_text),
        ];
        for (idx, (left_kind, left)) in sets.iter().enumerate() {
            for (right_kind, right) in &sets[idx + 1..] {
                let overlap = left.intersection(right).cloned().collect::<Vec<_>>();
                ensure!(
                    overlap.is_empty(),
                    "Column(s) {} listed as both {left_kind} and {right_kind}",
                    overlap.join(", ")
                );
            }
        }
        Ok(())
    }

    pub fn kind_of(&self, column: &str) -> ColumnKind {
        if self.date.contains(column) {
            ColumnKind::Date
        } else if self.numeric.contains(column) {
            ColumnKind::Numeric
        } else if self.nullable_text.contains(column) {
            ColumnKind::NullableText
        } else {
            ColumnKind::Text
        }
    }

    pub fn kinds_for(&self, headers: &[String]) -> Vec<ColumnKind> {
        headers.iter().map(|name| self.kind_of(name)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_classifies_known_columns() {
        let classification = ColumnClassification::builtin();
        assert_eq!(classification.kind_of("id"), ColumnKind::Numeric);
        assert_eq!(classification.kind_of("units"), ColumnKind::Numeric);
        assert_eq!(classification.kind_of("senior_loan_rate"), ColumnKind::Numeric);
        assert_eq!(classification.kind_of("exit_date"), ColumnKind::Date);
        assert_eq!(classification.kind_of("website"), ColumnKind::NullableText);
        assert_eq!(classification.kind_of("name"), ColumnKind::Text);
        assert!(classification.ensure_disjoint().is_ok());
    }

    #[test]
    fn kind_lookup_is_case_sensitive() {
        assert_eq!(
            ColumnClassification::builtin().kind_of("Units"),
            ColumnKind::Text
        );
    }

    #[test]
    fn from_yaml_accepts_partial_documents() {
        let classification = ColumnClassification::from_yaml("numeric: [price]\n").unwrap();
        assert_eq!(classification.kind_of("price"), ColumnKind::Numeric);
        assert!(classification.date.is_empty());
        assert!(classification.nullable_text.is_empty());
    }

    #[test]
    fn from_yaml_rejects_overlapping_columns() {
        let err = ColumnClassification::from_yaml("numeric: [lat]\ndate: [lat]\n").unwrap_err();
        assert!(err.to_string().contains("lat"));
        assert!(err.to_string().contains("numeric"));
    }

    #[test]
    fn from_yaml_rejects_unknown_keys() {
        assert!(ColumnClassification::from_yaml("integers: [units]\n").is_err());
    }

    #[test]
    fn kinds_for_preserves_header_order() {
        let headers = vec![
            "name".to_string(),
            "investment_date".to_string(),
            "beds".to_string(),
        ];
        assert_eq!(
            ColumnClassification::builtin().kinds_for(&headers),
            vec![ColumnKind::Text, ColumnKind::Date, ColumnKind::NullableText]
        );
    }
}
