//! INSERT statement assembly.
//!
//! Produces the migration text: a two-line comment header, a blank line, the
//! `INSERT INTO` clause with the column list, and one indented value tuple per
//! row. Tuples are joined with `,\n` and the last one is closed by `;`.

use anyhow::{Result, ensure};
use itertools::Itertools;

use crate::{
    columns::ColumnKind,
    data::{SqlLiteral, coerce_value},
};

pub const DEFAULT_TABLE_NAME: &str = "properties";

pub const HEADER_COMMENT: &[&str] = &[
    "-- Auto-generated from Properties CSV",
    "-- Run after clearing seed data",
];

const TUPLE_INDENT: &str = "  ";

/// Coerces one raw row using the kinds resolved for its columns.
pub fn coerce_row(raw: &[String], kinds: &[ColumnKind]) -> Vec<SqlLiteral> {
    kinds
        .iter()
        .enumerate()
        .map(|(idx, kind)| {
            let value = raw.get(idx).map(|s| s.as_str()).unwrap_or("");
            coerce_value(value, *kind)
        })
        .collect()
}

pub fn render_tuple(values: &[SqlLiteral]) -> String {
    format!("{TUPLE_INDENT}({})", values.iter().join(", "))
}

/// Renders the full statement without a trailing newline.
pub fn render_insert(table: &str, columns: &[String], rows: &[Vec<SqlLiteral>]) -> Result<String> {
    ensure!(!columns.is_empty(), "Cannot build an INSERT without columns");
    ensure!(!rows.is_empty(), "Cannot build an INSERT without rows");

    let mut lines = HEADER_COMMENT
        .iter()
        .map(|line| line.to_string())
        .collect::<Vec<_>>();
    lines.push(String::new());
    lines.push(format!(
        "INSERT INTO {table} ({}) VALUES",
        columns.iter().join(", ")
    ));
    let tuples = rows.iter().map(|row| render_tuple(row)).join(",\n");
    lines.push(format!("{tuples};"));
    Ok(lines.join("\n"))
}
