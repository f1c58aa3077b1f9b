use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Read, inspect, sort, and re-export tabular files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the columns of a file with their logical names, units, and types
    Inspect(InspectArgs),
    /// Show the first rows of a file as an aligned table
    Preview(PreviewArgs),
    /// Re-serialise a file as ';'- or tab-delimited text
    Export(ExportArgs),
    /// Print the rank of every row when sorted by one column
    Sort(SortArgs),
}

/// Options shared by every command that reads a table.
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Input file (.csv, .tsv, .txt, or .xlsx)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Field delimiter for delimited text (any string; 'tab' for a tab)
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<String>,
    /// Spreadsheet engine: 'bulk' or 'cell-walk'
    #[arg(long, default_value = "bulk")]
    pub engine: String,
    /// Character encoding of delimited input (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: InputArgs,
    /// Emit the column summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub source: InputArgs,
    /// Number of rows to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: InputArgs,
    /// Output file (.csv, .tsv, or .txt)
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub struct SortArgs {
    #[command(flatten)]
    pub source: InputArgs,
    /// Logical column name (name segments joined by spaces, without units)
    #[arg(short = 'c', long = "column")]
    pub column: String,
    /// Sort from largest to smallest
    #[arg(long)]
    pub descending: bool,
    /// Print the rows in sorted order instead of their ranks
    #[arg(long = "rows")]
    pub show_rows: bool,
}

pub fn parse_delimiter(value: &str) -> Result<String, String> {
    match value {
        "" => Err("Delimiter must not be empty".to_string()),
        "tab" | "\\t" => Ok("\t".to_string()),
        other => Ok(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_delimiter_expands_tab_aliases() {
        assert_eq!(parse_delimiter("tab").unwrap(), "\t");
        assert_eq!(parse_delimiter("\\t").unwrap(), "\t");
        assert_eq!(parse_delimiter(";").unwrap(), ";");
        assert!(parse_delimiter("").is_err());
    }

    #[test]
    fn sort_args_parse() {
        let cli = Cli::parse_from([
            "table-ingest",
            "sort",
            "-i",
            "data.csv",
            "--column",
            "weight",
            "--descending",
        ]);
        match cli.command {
            Commands::Sort(args) => {
                assert_eq!(args.column, "weight");
                assert!(args.descending);
                assert_eq!(args.source.engine, "bulk");
            }
            other => panic!("Expected sort command, got {other:?}"),
        }
    }
}
