use serde::{Deserialize, Serialize};

use super::Cell;
use crate::cell_ref::column_letter;

/// A decoded workbook: sheets in decoder order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Sort rows by number and cells by column.
    ///
    /// Decoders emit rows and cells in order already; this only guards the
    /// binary search in [`Row::cell`] against hand-built inputs.
    pub fn normalize(&mut self) {
        for sheet in &mut self.sheets {
            sheet.normalize();
        }
    }
}

/// A single worksheet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    /// Decoder-assigned sheet id
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Sheet {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn normalize(&mut self) {
        self.rows.sort_by_key(|r| r.number);
        for row in &mut self.rows {
            row.cells.sort_by_key(|c| c.col);
        }
    }

    /// Number of the last row (rows are dense from 1 up to this).
    pub fn row_count(&self) -> u32 {
        self.rows.iter().map(|r| r.number).max().unwrap_or(0)
    }

    /// Find a row by its 1-based number.
    pub fn row(&self, number: u32) -> Option<&Row> {
        self.rows
            .binary_search_by_key(&number, |r| r.number)
            .ok()
            .and_then(|i| self.rows.get(i))
    }
}

/// Column descriptor. Its position in [`Sheet::columns`] is its index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Width in character units; `None` or non-positive means default width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl Column {
    pub fn with_width(width: f64) -> Self {
        Self { width: Some(width) }
    }
}

/// Column letter for the 0-based position in the column list.
pub fn column_label(index: usize) -> String {
    u32::try_from(index + 1)
        .map(column_letter)
        .unwrap_or_default()
}

/// A worksheet row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// Row number (1-indexed)
    pub number: u32,
    /// Height in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Cells ordered by column
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            height: None,
            cells: Vec::new(),
        }
    }

    /// Look up the cell at a 1-based column.
    pub fn cell(&self, col: u32) -> Option<&Cell> {
        self.cells
            .binary_search_by_key(&col, |c| c.col)
            .ok()
            .and_then(|i| self.cells.get(i))
    }
}
