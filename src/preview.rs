//! Plain-text rendering of tables for the command-line surface.

use std::borrow::Cow;
use std::fmt::Write as _;

use serde::Serialize;

use crate::table::Table;

/// One line of the `inspect` summary.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ColumnSummary {
    pub key: String,
    pub name: String,
    pub units: Vec<String>,
    #[serde(rename = "type")]
    pub scalar_type: String,
    pub rows: usize,
}

pub fn summarize(table: &Table) -> Vec<ColumnSummary> {
    table
        .columns()
        .map(|view| ColumnSummary {
            key: view.key.to_string(),
            name: view.logical_name(),
            units: view.unit_parts().to_vec(),
            scalar_type: view.scalar_type().to_string(),
            rows: view.cells().len(),
        })
        .collect()
}

pub fn render_summary(summary: &[ColumnSummary]) -> String {
    let headers = ["#", "key", "name", "unit", "type", "rows"]
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();
    let rows = summary
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            vec![
                (idx + 1).to_string(),
                column.key.clone(),
                column.name.clone(),
                column.units.join("."),
                column.scalar_type.clone(),
                column.rows.to_string(),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&headers, &rows)
}

/// Renders up to `limit` rows, taking them in `order` when one is given.
pub fn render_rows(table: &Table, order: Option<&[usize]>, limit: Option<usize>) -> String {
    let headers = table.keys().map(str::to_string).collect::<Vec<_>>();
    let natural = (0..table.row_count()).collect::<Vec<_>>();
    let order = order.unwrap_or(natural.as_slice());
    let take = limit.unwrap_or(order.len());
    let rows = order
        .iter()
        .take(take)
        .map(|&row| {
            table
                .row(row)
                .into_iter()
                .map(|cell| cell.as_display())
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    render_table(&headers, &rows)
}

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let column_count = headers.len();
    let mut widths = headers.iter().map(|h| display_width(h)).collect::<Vec<_>>();

    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(display_width(cell));
        }
    }

    for width in &mut widths {
        *width = (*width).max(1);
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_row(headers, &widths));

    let separator_widths = widths.iter().map(|w| (*w).max(3)).collect::<Vec<usize>>();
    let separator_cells = separator_widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&separator_cells, &separator_widths));

    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, &widths));
    }

    output
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let mut cells = Vec::with_capacity(values.len());
    for (value, width) in values.iter().zip(widths) {
        let sanitized = sanitize_cell(value);
        let padding = width.saturating_sub(display_width(sanitized.as_ref()));
        let mut cell = sanitized.into_owned();
        cell.push_str(&" ".repeat(padding));
        cells.push(cell);
    }
    cells.join("  ").trim_end().to_string()
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::parse_delimited;

    #[test]
    fn render_table_aligns_columns() {
        let headers = vec!["id".to_string(), "name".to_string()];
        let rows = vec![
            vec!["1".to_string(), "Alice".to_string()],
            vec!["2".to_string(), "Bob".to_string()],
        ];
        let rendered = render_table(&headers, &rows);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines, vec!["id  name", "---  -----", "1   Alice", "2   Bob"]);
    }

    #[test]
    fn render_rows_follows_requested_order() {
        let table = parse_delimited("id,name", ["1,Dett", "2,Nern"], ",").unwrap();
        let rendered = render_rows(&table, Some(&[1, 0][..]), Some(1));
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "2   Nern");
    }

    #[test]
    fn summary_lists_units_and_types() {
        let table = parse_delimited("distance.km,ok", ["3,true"], ",").unwrap();
        let summary = summarize(&table);
        assert_eq!(summary[0].name, "distance");
        assert_eq!(summary[0].units, vec!["km".to_string()]);
        assert_eq!(summary[0].scalar_type, "Integer");
        assert_eq!(summary[1].scalar_type, "Boolean");
    }
}
