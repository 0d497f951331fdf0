//! The `columns` command.
//!
//! Reads only the header of the input and prints the coercion kind each column
//! will receive, so a classification file can be checked before converting.

use anyhow::{Context, Result};
use log::info;

use crate::{cli::ColumnsArgs, columns::ColumnClassification, io_utils, table};

pub fn execute(args: &ColumnsArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let classification = ColumnClassification::resolve(args.classification.as_deref())?;

    let mut reader = io_utils::open_csv_reader_from_path(&args.input, delimiter)?;
    let headers = io_utils::reader_headers(&mut reader, encoding)
        .with_context(|| format!("Reading headers from {:?}", args.input))?;

    if headers.is_empty() {
        info!("Input {:?} does not define any columns", args.input);
        return Ok(());
    }

    let rows = headers
        .iter()
        .zip(classification.kinds_for(&headers))
        .enumerate()
        .map(|(idx, (name, kind))| vec![(idx + 1).to_string(), name.clone(), kind.to_string()])
        .collect::<Vec<_>>();
    let table_headers = vec!["#".to_string(), "column".to_string(), "kind".to_string()];
    table::print_table(&table_headers, &rows);
    info!("Listed {} column(s) from {:?}", headers.len(), args.input);
    Ok(())
}
