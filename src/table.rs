//! The canonical in-memory table shared by every ingestion backend.
//!
//! A [`Table`] maps unique raw header strings (column keys) to [`Column`]s in
//! source order. Inserting a key that already exists replaces that column's
//! contents in place, which mirrors what happens when a file repeats a
//! header. Once built, a table is only exposed through shared references.
//!
//! Downstream consumers address columns by *logical name*: the column's
//! `name_parts` joined by a single space, independent of units.

use crate::{
    data::{Scalar, ScalarType},
    header::{HeaderParts, decompose_header},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name_parts: Vec<String>,
    pub unit_parts: Vec<String>,
    pub scalar_type: ScalarType,
    pub cells: Vec<Scalar>,
}

impl Column {
    pub fn new(header: HeaderParts, scalar_type: ScalarType, cells: Vec<Scalar>) -> Self {
        Self {
            name_parts: header.name_parts,
            unit_parts: header.unit_parts,
            scalar_type,
            cells,
        }
    }

    /// Builds a column for `key`, decomposing it into name and unit parts.
    pub fn from_key(key: &str, scalar_type: ScalarType, cells: Vec<Scalar>) -> Self {
        Self::new(decompose_header(key), scalar_type, cells)
    }

    pub fn logical_name(&self) -> String {
        self.name_parts.join(" ")
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Read-only view of one column, handed to downstream consumers.
#[derive(Debug, Clone, Copy)]
pub struct ColumnView<'a> {
    pub key: &'a str,
    column: &'a Column,
}

impl<'a> ColumnView<'a> {
    pub fn name_parts(&self) -> &'a [String] {
        &self.column.name_parts
    }

    pub fn unit_parts(&self) -> &'a [String] {
        &self.column.unit_parts
    }

    pub fn scalar_type(&self) -> ScalarType {
        self.column.scalar_type
    }

    pub fn cells(&self) -> &'a [Scalar] {
        &self.column.cells
    }

    pub fn logical_name(&self) -> String {
        self.column.logical_name()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<(String, Column)>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `column` under `key`, or replaces the existing column with the
    /// same key while keeping its original position.
    pub fn insert(&mut self, key: impl Into<String>, column: Column) {
        let key = key.into();
        match self.columns.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = column,
            None => self.columns.push((key, column)),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(key, _)| key.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = ColumnView<'_>> {
        self.columns
            .iter()
            .map(|(key, column)| ColumnView { key, column })
    }

    pub fn column(&self, key: &str) -> Option<ColumnView<'_>> {
        self.columns()
            .find(|view| view.key == key)
    }

    /// Row count of the first column; zero for a table without columns.
    pub fn row_count(&self) -> usize {
        self.columns
            .first()
            .map(|(_, column)| column.len())
            .unwrap_or(0)
    }

    /// Returns one row as cell references in column order, skipping columns
    /// too short to reach `index`.
    pub fn row(&self, index: usize) -> Vec<&Scalar> {
        self.columns
            .iter()
            .filter_map(|(_, column)| column.cells.get(index))
            .collect()
    }

    pub fn lookup_by_logical_name(&self, name: &str) -> Option<ColumnView<'_>> {
        self.columns().find(|view| view.logical_name() == name)
    }

    pub fn lookup_type(&self, name: &str) -> Option<ScalarType> {
        self.lookup_by_logical_name(name).map(|view| view.scalar_type())
    }

    pub fn lookup_unit(&self, name: &str) -> Option<Vec<String>> {
        self.lookup_by_logical_name(name)
            .map(|view| view.unit_parts().to_vec())
    }
}

pub fn lookup_by_logical_name<'a>(table: &'a Table, name: &str) -> Option<ColumnView<'a>> {
    table.lookup_by_logical_name(name)
}

pub fn lookup_type(table: &Table, name: &str) -> Option<ScalarType> {
    table.lookup_type(name)
}

pub fn lookup_unit(table: &Table, name: &str) -> Option<Vec<String>> {
    table.lookup_unit(name)
}
