use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{preview::DEFAULT_PREVIEW_CHARS, statement::DEFAULT_TABLE_NAME};

pub const DEFAULT_INPUT_PATH: &str = "Properties.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "supabase/migrations/003_import_properties.sql";

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Convert a properties CSV export into a SQL INSERT script",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a bulk INSERT statement from the properties CSV
    Convert(ConvertArgs),
    /// Show how each column of the input will be coerced
    Columns(ColumnsArgs),
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Properties CSV export to read ('-' for stdin)
    #[arg(short = 'i', long = "input", default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,
    /// Destination SQL file (overwritten)
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,
    /// Target table for the INSERT statement
    #[arg(short = 't', long = "table", default_value = DEFAULT_TABLE_NAME)]
    pub table: String,
    /// YAML file listing numeric, date, and nullable_text columns
    #[arg(short = 'c', long = "classification")]
    pub classification: Option<PathBuf>,
    /// Number of characters of generated SQL echoed to the console
    #[arg(long = "preview-chars", default_value_t = DEFAULT_PREVIEW_CHARS)]
    pub preview_chars: usize,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct ColumnsArgs {
    /// Properties CSV export to inspect ('-' for stdin)
    #[arg(short = 'i', long = "input", default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,
    /// YAML file listing numeric, date, and nullable_text columns
    #[arg(short = 'c', long = "classification")]
    pub classification: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_delimiter_accepts_named_values() {
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter("semicolon"), Ok(b';'));
        assert_eq!(parse_delimiter("#"), Ok(b'#'));
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("§").is_err());
    }

    #[test]
    fn convert_defaults_match_fixed_paths() {
        let cli = Cli::parse_from(["properties-sql", "convert"]);
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert command");
        };
        assert_eq!(args.input, PathBuf::from(DEFAULT_INPUT_PATH));
        assert_eq!(args.output, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(args.table, "properties");
        assert_eq!(args.preview_chars, 2000);
        assert!(args.classification.is_none());
    }
}
