//! Table ingestion entry point.
//!
//! [`read_table()`] resolves the file format, then dispatches to the
//! delimited-text backend in this module or to [`crate::spreadsheet`].
//! Reads are all-or-nothing: any failure discards the partially built table.

use std::path::Path;

use log::debug;

use crate::{
    data::{ColumnTypeGuard, ScalarType},
    error::{Result, TableError},
    header::decompose_header,
    io_utils::{self, SourceFormat, TextKind},
    spreadsheet::{self, SpreadsheetEngine},
    table::{Column, Table},
};

/// Caller-supplied read configuration.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Explicit field delimiter; skips extension defaults and sniffing.
    pub delimiter: Option<String>,
    pub engine: SpreadsheetEngine,
    /// Input encoding label understood by `encoding_rs` (UTF-8 if unset).
    pub encoding: Option<String>,
}

impl ReadOptions {
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    pub fn with_engine(mut self, engine: SpreadsheetEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Selects the engine by name, failing on anything but `bulk`/`cell-walk`.
    pub fn with_engine_name(self, name: &str) -> Result<Self> {
        Ok(self.with_engine(name.parse()?))
    }

    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }
}

pub fn read_table(path: &Path, options: &ReadOptions) -> Result<Table> {
    let source = io_utils::resolve_source(path)?;
    debug!("Resolved {:?} as {:?}", source.path, source.format);
    match source.format {
        SourceFormat::Delimited(kind) => read_delimited(&source, kind, options),
        SourceFormat::Spreadsheet => spreadsheet::read_spreadsheet(&source.path, options.engine),
    }
}

fn read_delimited(
    source: &io_utils::ResolvedSource,
    kind: TextKind,
    options: &ReadOptions,
) -> Result<Table> {
    let encoding = io_utils::resolve_encoding(options.encoding.as_deref())?;
    let text = io_utils::read_text(&source.path, encoding)?;
    let mut lines = text.lines();
    let Some(header_line) = lines.next() else {
        debug!("{:?} is empty", source.path);
        return Ok(Table::new());
    };
    let delimiter = io_utils::resolve_input_delimiter(
        source,
        kind,
        options.delimiter.as_deref(),
        header_line,
    )?;
    debug!(
        "Reading {:?} with delimiter {:?}",
        source.path, delimiter
    );
    parse_delimited(header_line, lines, &delimiter)
}

/// Parses a header line and its data lines into a typed table.
///
/// Line numbers in errors are 1-based with the header on line 1; row numbers
/// in type errors count data rows from 1. A blank line ends the data.
pub fn parse_delimited<'a, I>(header_line: &str, lines: I, delimiter: &str) -> Result<Table>
where
    I: IntoIterator<Item = &'a str>,
{
    let keys = header_line
        .split(delimiter)
        .map(str::to_string)
        .collect::<Vec<_>>();
    let mut guards = vec![ColumnTypeGuard::new(); keys.len()];
    let mut cells = vec![Vec::new(); keys.len()];

    for (idx, line) in lines.into_iter().enumerate() {
        if line.trim().is_empty() {
            break;
        }
        let line_number = idx + 2;
        let fields = line.split(delimiter).collect::<Vec<_>>();
        if fields.len() != keys.len() {
            return Err(TableError::RowWidthMismatch {
                line_number,
                expected: keys.len(),
                actual: fields.len(),
            });
        }
        for (column, field) in fields.into_iter().enumerate() {
            let value = guards[column].admit(field, idx + 1, &keys[column])?;
            cells[column].push(value);
        }
    }

    let mut table = Table::new();
    for ((key, guard), values) in keys.into_iter().zip(guards).zip(cells) {
        let scalar_type = guard.reference().unwrap_or(ScalarType::Text);
        let column = Column::new(decompose_header(&key), scalar_type, values);
        table.insert(key, column);
    }
    Ok(table)
}
