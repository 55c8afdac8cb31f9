//! Table rendering utilities for CLI outputs.
//! Widths are measured in terminal columns so names like "João" line up.

use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub separator: char,
}

impl Table {
    pub fn new(columns: Vec<Column>, separator: char) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            separator,
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|cell| visible_width(cell))
                    .chain(std::iter::once(col.header.width()))
                    .max()
                    .unwrap_or(0)
                    .max(col.width)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        // Header
        for (col, w) in self.columns.iter().zip(&widths) {
            out.push_str(&pad(&col.header, *w));
            out.push(' ');
        }
        out.push('\n');

        let total: usize = widths.iter().map(|w| w + 1).sum();
        out.push_str(&self.separator.to_string().repeat(total.saturating_sub(1)));
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, w) in widths.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&pad(cell, *w));
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}

/// Width ignoring ANSI colour sequences.
fn visible_width(s: &str) -> usize {
    super::colors::strip_ansi(s).width()
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(visible_width(s));
    format!("{}{}", s, " ".repeat(fill))
}
