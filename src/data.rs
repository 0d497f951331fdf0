use std::fmt;

use chrono::{Datelike, NaiveDate};
use log::warn;

use crate::columns::ColumnKind;

const SPREADSHEET_DATE_FORMAT: &str = "%d-%b-%y";
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const MISSING_MARKER: &str = "-";
/// Two-digit years from here on belong to the previous century (`69` is 1969).
const TWO_DIGIT_YEAR_PIVOT: i32 = 2069;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlLiteral {
    Null,
    Number(String),
    Date(String),
    Text(String),
}

impl fmt::Display for SqlLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlLiteral::Null => f.write_str("NULL"),
            SqlLiteral::Number(n) => f.write_str(n),
            SqlLiteral::Date(d) => write!(f, "'{d}'"),
            SqlLiteral::Text(s) => write!(f, "'{}'", escape_text(s)),
        }
    }
}

pub fn escape_text(value: &str) -> String {
    value.replace('\'', "''")
}

fn is_missing(value: &str) -> bool {
    value.is_empty() || value == MISSING_MARKER
}

/// Converts spreadsheet dates such as `19-Dec-19` to `2019-12-19`.
///
/// Empty cells and `-` yield `None`. Text that does not match the spreadsheet
/// format is returned trimmed but otherwise untouched.
pub fn parse_date(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if is_missing(trimmed) {
        return None;
    }
    match NaiveDate::parse_from_str(trimmed, SPREADSHEET_DATE_FORMAT) {
        Ok(date) => Some(pivot_century(date).format(ISO_DATE_FORMAT).to_string()),
        Err(_) => {
            if NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT).is_err() {
                warn!("Date value '{trimmed}' is not in a recognised format; emitting it unchanged");
            }
            Some(trimmed.to_string())
        }
    }
}

fn pivot_century(date: NaiveDate) -> NaiveDate {
    if date.year() >= TWO_DIGIT_YEAR_PIVOT {
        date.with_year(date.year() - 100).unwrap_or(date)
    } else {
        date
    }
}

pub fn coerce_value(value: &str, kind: ColumnKind) -> SqlLiteral {
    let value = value.trim();
    match kind {
        ColumnKind::Date => parse_date(value).map_or(SqlLiteral::Null, SqlLiteral::Date),
        ColumnKind::Numeric if is_missing(value) => SqlLiteral::Null,
        ColumnKind::Numeric => SqlLiteral::Number(value.replace(',', "")),
        ColumnKind::NullableText if is_missing(value) => SqlLiteral::Null,
        _ if value.is_empty() => SqlLiteral::Null,
        _ => SqlLiteral::Text(value.to_string()),
    }
}
