//! Spreadsheet ingestion through `calamine`.
//!
//! Two engines read the first worksheet of an `.xlsx` workbook:
//!
//! - **bulk** loads the whole sheet as a dense range and transposes its rows
//!   into columns;
//! - **cell-walk** streams cells one by one and places them into the same
//!   bounding box, header row first.
//!
//! Both engines take cell types as the workbook reports them. Unlike the
//! delimited-text backend, there is no cross-row type check here.

use std::{collections::HashMap, fmt, path::Path, str::FromStr};

use calamine::{Data, DataRef, Reader, Xlsx, XlsxError, open_workbook};
use log::debug;

use crate::{
    data::{Scalar, ScalarType},
    error::{Result, TableError},
    table::{Column, Table},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpreadsheetEngine {
    #[default]
    Bulk,
    CellWalk,
}

impl SpreadsheetEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpreadsheetEngine::Bulk => "bulk",
            SpreadsheetEngine::CellWalk => "cell-walk",
        }
    }

    pub fn alternate(&self) -> SpreadsheetEngine {
        match self {
            SpreadsheetEngine::Bulk => SpreadsheetEngine::CellWalk,
            SpreadsheetEngine::CellWalk => SpreadsheetEngine::Bulk,
        }
    }
}

impl fmt::Display for SpreadsheetEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpreadsheetEngine {
    type Err = TableError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "bulk" => Ok(SpreadsheetEngine::Bulk),
            "cell-walk" => Ok(SpreadsheetEngine::CellWalk),
            other => Err(TableError::UnknownEngine {
                name: other.to_string(),
            }),
        }
    }
}

pub fn read_spreadsheet(path: &Path, engine: SpreadsheetEngine) -> Result<Table> {
    let grid = match engine {
        SpreadsheetEngine::Bulk => load_bulk(path),
        SpreadsheetEngine::CellWalk => load_cell_walk(path),
    }
    .map_err(|message| TableError::IOFailure {
        context: format!(
            "Loading {path:?} with the {engine} engine failed; retry with the {} engine",
            engine.alternate()
        ),
        message,
    })?;
    debug!(
        "Loaded {} row(s) from {:?} with the {} engine",
        grid.len(),
        path,
        engine
    );
    Ok(grid_to_table(grid))
}

type Grid = Vec<Vec<Scalar>>;

fn load_bulk(path: &Path) -> std::result::Result<Grid, String> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e: XlsxError| e.to_string())?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| e.to_string())?,
        None => return Ok(Vec::new()),
    };
    Ok(range
        .rows()
        .map(|row| row.iter().map(scalar_from_data).collect())
        .collect())
}

fn load_cell_walk(path: &Path) -> std::result::Result<Grid, String> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e: XlsxError| e.to_string())?;
    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        return Ok(Vec::new());
    };
    let mut reader = workbook
        .worksheet_cells_reader(&sheet)
        .map_err(|e| e.to_string())?;

    let mut cells = HashMap::new();
    let (mut min_row, mut min_col) = (u32::MAX, u32::MAX);
    let (mut max_row, mut max_col) = (0u32, 0u32);
    while let Some(cell) = reader.next_cell().map_err(|e| e.to_string())? {
        let Some(value) = scalar_from_data_ref(cell.get_value()) else {
            continue;
        };
        let (row, col) = cell.get_position();
        min_row = min_row.min(row);
        min_col = min_col.min(col);
        max_row = max_row.max(row);
        max_col = max_col.max(col);
        cells.insert((row, col), value);
    }
    if cells.is_empty() {
        return Ok(Vec::new());
    }

    let mut grid = Vec::with_capacity((max_row - min_row + 1) as usize);
    for row in min_row..=max_row {
        let line = (min_col..=max_col)
            .map(|col| {
                cells
                    .remove(&(row, col))
                    .unwrap_or_else(|| Scalar::Text(String::new()))
            })
            .collect();
        grid.push(line);
    }
    Ok(grid)
}

fn scalar_from_data(cell: &Data) -> Scalar {
    match cell {
        Data::Int(i) => Scalar::Integer(*i),
        Data::Float(f) => Scalar::Float(*f),
        Data::Bool(b) => Scalar::Boolean(*b),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Scalar::Text(s.clone()),
        Data::DateTime(dt) => Scalar::Float(dt.as_f64()),
        Data::Error(e) => Scalar::Text(e.to_string()),
        Data::Empty => Scalar::Text(String::new()),
    }
}

// `None` for empty cells, which the bounding box fills in later.
fn scalar_from_data_ref(cell: &DataRef<'_>) -> Option<Scalar> {
    let value = match cell {
        DataRef::Int(i) => Scalar::Integer(*i),
        DataRef::Float(f) => Scalar::Float(*f),
        DataRef::Bool(b) => Scalar::Boolean(*b),
        DataRef::String(s) | DataRef::DateTimeIso(s) | DataRef::DurationIso(s) => {
            Scalar::Text(s.clone())
        }
        DataRef::SharedString(s) => Scalar::Text((*s).to_string()),
        DataRef::DateTime(dt) => Scalar::Float(dt.as_f64()),
        DataRef::Error(e) => Scalar::Text(e.to_string()),
        DataRef::Empty => return None,
    };
    Some(value)
}

fn grid_to_table(grid: Grid) -> Table {
    let mut rows = grid.into_iter();
    let Some(header) = rows.next() else {
        return Table::new();
    };
    let keys = header.iter().map(Scalar::as_display).collect::<Vec<_>>();
    let mut columns = vec![Vec::new(); keys.len()];
    for row in rows {
        for (idx, value) in row.into_iter().enumerate().take(keys.len()) {
            columns[idx].push(value);
        }
    }

    let mut table = Table::new();
    for (key, cells) in keys.into_iter().zip(columns) {
        let scalar_type = cells
            .first()
            .map(Scalar::scalar_type)
            .unwrap_or(ScalarType::Text);
        let column = Column::from_key(&key, scalar_type, cells);
        table.insert(key, column);
    }
    table
}
