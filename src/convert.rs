//! The `convert` command: properties CSV in, INSERT script out.
//!
//! The whole export is loaded before anything is written, so a failure while
//! reading leaves any existing output file untouched.

use std::{collections::HashSet, path::Path};

use anyhow::{Context, Result, ensure};
use encoding_rs::Encoding;
use itertools::Itertools;
use log::{debug, info};

use crate::{
    cli::ConvertArgs,
    columns::ColumnClassification,
    io_utils, preview,
    statement::{coerce_row, render_insert},
};

/// Header names plus every data row of an export, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl PropertyTable {
    pub fn load(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<Self> {
        let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
        let headers = io_utils::reader_headers(&mut reader, encoding)
            .with_context(|| format!("Reading headers from {path:?}"))?;
        let mut rows = Vec::new();
        for (idx, record) in reader.byte_records().enumerate() {
            let record = record.with_context(|| format!("Reading row {} in {path:?}", idx + 2))?;
            rows.push(io_utils::decode_record(&record, encoding)?);
        }
        Ok(Self { headers, rows })
    }

    pub fn ensure_unique_headers(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let duplicates = self
            .headers
            .iter()
            .filter(|name| !seen.insert(name.as_str()))
            .unique()
            .join(", ");
        ensure!(duplicates.is_empty(), "Duplicate column name(s) in header: {duplicates}");
        Ok(())
    }
}

/// Result of rendering a table; `sql` has no trailing newline.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub sql: String,
    pub row_count: usize,
}

pub fn convert_table(
    table: &PropertyTable,
    classification: &ColumnClassification,
    table_name: &str,
) -> Result<Conversion> {
    table.ensure_unique_headers()?;
    let kinds = classification.kinds_for(&table.headers);
    for (name, kind) in table.headers.iter().zip(&kinds) {
        debug!("Column '{name}' coerced as {kind}");
    }
    let rows = table
        .rows
        .iter()
        .map(|raw| coerce_row(raw, &kinds))
        .collect::<Vec<_>>();
    let sql = render_insert(table_name, &table.headers, &rows)?;
    Ok(Conversion {
        sql,
        row_count: rows.len(),
    })
}

pub fn execute(args: &ConvertArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let classification = ColumnClassification::resolve(args.classification.as_deref())?;

    info!("Reading properties from {:?}", args.input);
    let table = PropertyTable::load(&args.input, delimiter, encoding)?;
    ensure!(
        !table.rows.is_empty(),
        "Input {:?} contains no data rows",
        args.input
    );
    info!(
        "Loaded {} row(s) across {} column(s)",
        table.rows.len(),
        table.headers.len()
    );

    let conversion = convert_table(&table, &classification, &args.table)
        .with_context(|| format!("Building INSERT for table '{}'", args.table))?;
    io_utils::write_text_file(&args.output, &format!("{}\n", conversion.sql))?;
    info!("INSERT script written to {:?}", args.output);

    println!(
        "Written {} rows to {}",
        conversion.row_count,
        args.output.display()
    );
    println!("\nPreview:\n");
    println!("{}", preview::truncate_chars(&conversion.sql, args.preview_chars));
    Ok(())
}
