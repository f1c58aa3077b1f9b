//! Ingestion of delimited-text and spreadsheet files into one typed,
//! unit-aware [`Table`], with lossless re-export and column rank sorting.

pub mod cli;
pub mod data;
pub mod error;
pub mod header;
pub mod io_utils;
pub mod preview;
pub mod reader;
pub mod sort;
pub mod spreadsheet;
pub mod table;
pub mod writer;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};

use crate::cli::{Cli, Commands, InputArgs};

pub use crate::{
    data::{Scalar, ScalarType, coerce_scalar},
    error::TableError,
    header::{HeaderParts, decompose_header},
    reader::{ReadOptions, read_table},
    sort::{SortDirection, rank_rows},
    spreadsheet::SpreadsheetEngine,
    table::{Column, ColumnView, Table, lookup_by_logical_name, lookup_type, lookup_unit},
    writer::write_table,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("table_ingest", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Inspect(args) => handle_inspect(&args),
        Commands::Preview(args) => handle_preview(&args),
        Commands::Export(args) => handle_export(&args),
        Commands::Sort(args) => handle_sort(&args),
    }
}

fn load(source: &InputArgs) -> Result<Table> {
    let mut options = ReadOptions::default().with_engine_name(&source.engine)?;
    if let Some(delimiter) = &source.delimiter {
        options = options.with_delimiter(delimiter.clone());
    }
    if let Some(label) = &source.input_encoding {
        options = options.with_encoding(label.clone());
    }
    debug!("Read options: {:?}", options);
    let table = read_table(&source.input, &options)
        .with_context(|| format!("Reading table from {:?}", source.input))?;
    info!(
        "Read {} column(s) and {} row(s) from {:?}",
        table.len(),
        table.row_count(),
        source.input
    );
    Ok(table)
}

fn handle_inspect(args: &cli::InspectArgs) -> Result<()> {
    let table = load(&args.source)?;
    let summary = preview::summarize(&table);
    if args.json {
        let rendered =
            serde_json::to_string_pretty(&summary).context("Serializing column summary")?;
        println!("{rendered}");
    } else if summary.is_empty() {
        println!("No columns found.");
    } else {
        print!("{}", preview::render_summary(&summary));
    }
    Ok(())
}

fn handle_preview(args: &cli::PreviewArgs) -> Result<()> {
    let table = load(&args.source)?;
    print!("{}", preview::render_rows(&table, None, Some(args.rows)));
    info!(
        "Displayed {} row(s) from {:?}",
        args.rows.min(table.row_count()),
        args.source.input
    );
    Ok(())
}

fn handle_export(args: &cli::ExportArgs) -> Result<()> {
    let table = load(&args.source)?;
    write_table(&table, &args.output)
        .with_context(|| format!("Writing table to {:?}", args.output))?;
    info!(
        "Exported {} row(s) across {} column(s) to {:?}",
        table.row_count(),
        table.len(),
        args.output
    );
    Ok(())
}

fn handle_sort(args: &cli::SortArgs) -> Result<()> {
    let table = load(&args.source)?;
    let direction = SortDirection::from_descending(args.descending);
    if args.show_rows {
        let order = sort::sorted_row_order(Some(&table), &args.column, direction)
            .with_context(|| format!("Sorting by '{}' ({direction})", args.column))?;
        print!("{}", preview::render_rows(&table, Some(&order), None));
    } else {
        let ranks = rank_rows(Some(&table), &args.column, direction)
            .with_context(|| format!("Ranking by '{}' ({direction})", args.column))?;
        for rank in ranks {
            println!("{rank}");
        }
    }
    Ok(())
}
