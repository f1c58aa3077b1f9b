//! Rank permutations over a single column.
//!
//! [`rank_rows()`] never reorders the table: it returns, for every original
//! row, the position that row would take in the requested ordering. Equal
//! values keep their input order in both directions.

use std::{cmp::Ordering, fmt, str::FromStr};

use crate::{
    error::{Result, TableError},
    table::Table,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn from_descending(descending: bool) -> Self {
        if descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("asc"),
            SortDirection::Descending => f.write_str("desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!("Unknown sort direction '{other}'")),
        }
    }
}

/// Row order after sorting by the column whose logical name is `name`:
/// `order[k]` is the original index of the row placed at position `k`.
pub fn sorted_row_order(
    table: Option<&Table>,
    name: &str,
    direction: SortDirection,
) -> Result<Vec<usize>> {
    let table = table.ok_or(TableError::NullTable)?;
    let column = table
        .lookup_by_logical_name(name)
        .ok_or_else(|| TableError::ColumnNotFound {
            name: name.to_string(),
        })?;
    let cells = column.cells();
    let mut order = (0..cells.len()).collect::<Vec<_>>();
    // `sort_by` is stable, so ties keep input order in either direction.
    order.sort_by(|&a, &b| direction.apply(cells[a].natural_cmp(&cells[b])));
    Ok(order)
}

/// Rank permutation: `ranks[i]` is the 0-based position of original row `i`.
pub fn rank_rows(table: Option<&Table>, name: &str, direction: SortDirection) -> Result<Vec<usize>> {
    let order = sorted_row_order(table, name, direction)?;
    let mut ranks = vec![0; order.len()];
    for (position, &row) in order.iter().enumerate() {
        ranks[row] = position;
    }
    Ok(ranks)
}

impl Table {
    pub fn rank_by(&self, name: &str, direction: SortDirection) -> Result<Vec<usize>> {
        rank_rows(Some(self), name, direction)
    }
}
