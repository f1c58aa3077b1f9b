#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Joins `name` onto the workspace root without creating anything.
    pub fn join(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        self.write_bytes(name, contents.as_bytes())
    }

    pub fn write_bytes(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents).expect("write temp file contents");
        path
    }

    /// Builds a small workbook whose first sheet holds `rows`, header first.
    pub fn write_xlsx(&self, name: &str, rows: &[Vec<Cell>]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                let (r, c) = (row_idx as u32, col_idx as u16);
                match cell {
                    Cell::Text(value) => {
                        sheet.write_string(r, c, *value).expect("write string");
                    }
                    Cell::Number(value) => {
                        sheet.write_number(r, c, *value).expect("write number");
                    }
                    Cell::Bool(value) => {
                        sheet.write_boolean(r, c, *value).expect("write boolean");
                    }
                    Cell::Blank => {}
                }
            }
        }
        workbook.save(&path).expect("save workbook");
        path
    }
}

/// Cell content for generated workbooks.
#[derive(Debug, Clone, Copy)]
pub enum Cell {
    Text(&'static str),
    Number(f64),
    Bool(bool),
    Blank,
}
