//! Serialises a [`Table`] back to delimited text.
//!
//! `.csv` and `.txt` outputs use `;` between columns, `.tsv` uses a tab.
//! Validation happens before the output file is created, and a write that
//! fails midway removes whatever it had written.
//!
//! Fields are written unquoted, so a value the reader could not split back
//! out of its line is rejected up front with
//! [`TableError::UnencodableValue`].

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use csv::{QuoteStyle, Terminator};
use log::{debug, warn};

use crate::{
    error::{Result, TableError},
    io_utils::{self, SNIFF_CANDIDATES},
    table::Table,
};

pub fn write_table(table: &Table, path: &Path) -> Result<()> {
    let separator = io_utils::resolve_output_separator(path)?;
    ensure_equal_row_counts(table)?;
    ensure_encodable(table, separator)?;

    let file =
        File::create(path).map_err(|err| TableError::io(format!("Creating {path:?}"), err))?;
    if let Err(err) = write_rows(table, separator, BufWriter::new(file)) {
        remove_partial_output(path);
        return Err(TableError::io(format!("Writing {path:?}"), err));
    }
    debug!(
        "Wrote {} column(s) x {} row(s) to {path:?}",
        table.len(),
        table.row_count()
    );
    Ok(())
}

/// Writes the header line and one line per row. A table without columns
/// produces no output at all.
fn write_rows<W: Write>(table: &Table, separator: u8, sink: W) -> csv::Result<()> {
    if table.is_empty() {
        return Ok(());
    }
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(separator)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'));
    let mut writer = builder.from_writer(sink);

    writer.write_record(table.keys())?;
    for index in 0..table.row_count() {
        writer.write_record(table.row(index).into_iter().map(|cell| cell.as_display()))?;
    }
    writer.flush()?;
    Ok(())
}

fn remove_partial_output(path: &Path) {
    if let Err(cleanup) = fs::remove_file(path)
        && cleanup.kind() != io::ErrorKind::NotFound
    {
        warn!("Could not remove partial output {path:?}: {cleanup}");
    }
}

fn ensure_equal_row_counts(table: &Table) -> Result<()> {
    let expected = table.row_count();
    for column in table.columns() {
        let actual = column.cells().len();
        if actual != expected {
            return Err(TableError::RowCountMismatch {
                column: column.key.to_string(),
                expected,
                actual,
            });
        }
    }
    Ok(())
}

/// Every key and cell must survive a re-read of the written text. Keys may
/// not hold any sniffable delimiter in `;` outputs, so the header line
/// always sniffs back to `;`.
fn ensure_encodable(table: &Table, separator: u8) -> Result<()> {
    let separator = char::from(separator);
    let key_forbidden: &[char] = if separator == '\t' {
        &['\t']
    } else {
        SNIFF_CANDIDATES
    };
    let single_column = table.len() == 1;

    for column in table.columns() {
        if let Some(reason) = unencodable_reason(column.key, key_forbidden, single_column) {
            return Err(TableError::UnencodableValue {
                line_number: 1,
                column: column.key.to_string(),
                value: column.key.to_string(),
                reason,
            });
        }
        for (idx, cell) in column.cells().iter().enumerate() {
            let value = cell.as_display();
            if let Some(reason) = unencodable_reason(&value, &[separator], single_column) {
                return Err(TableError::UnencodableValue {
                    line_number: idx + 2,
                    column: column.key.to_string(),
                    value,
                    reason,
                });
            }
        }
    }
    Ok(())
}

fn unencodable_reason(value: &str, forbidden: &[char], single_column: bool) -> Option<String> {
    if value.contains(['\n', '\r']) {
        return Some("contains a line break".to_string());
    }
    if let Some(found) = value.chars().find(|c| forbidden.contains(c)) {
        return Some(format!("contains the delimiter {found:?}"));
    }
    if single_column && value.trim().is_empty() {
        return Some("would be written as a blank line".to_string());
    }
    None
}
