//! Test fixtures for building decoded workbooks in memory.
//!
//! This module provides builders for creating workbooks programmatically,
//! useful for testing the viewer with known inputs.
//!
//! # Example
//!
//! ```rust,ignore
//! use fixtures::{SheetBuilder, StyleBuilder, WorkbookBuilder};
//!
//! let workbook = WorkbookBuilder::new()
//!     .sheet(
//!         SheetBuilder::new("Sheet1")
//!             .cell("A1", "Hello", Some(StyleBuilder::new().bold().build()))
//!             .cell("B1", 42.0, None)
//!             .merge("A2:B3"),
//!     )
//!     .build();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_lossless
)]

use std::collections::BTreeMap;

use xltable::cell_ref::{parse_cell_range, parse_cell_ref, CellAddress};
use xltable::{
    Alignment, BorderEdge, Borders, Cell, CellStyle, CellValue, ColorRef, Column, Fill, Font,
    HAlign, MergeState, Row, Sheet, Underline, VAlign, Workbook,
};

// ============================================================================
// Style Builder
// ============================================================================

/// Builder for creating cell styles.
#[derive(Debug, Clone, Default)]
pub struct StyleBuilder {
    style: CellStyle,
}

impl StyleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn font_mut(&mut self) -> &mut Font {
        self.style.font.get_or_insert_with(Font::default)
    }

    fn border_mut(&mut self) -> &mut Borders {
        self.style.border.get_or_insert_with(Borders::default)
    }

    /// Font present with every property unset.
    pub fn plain_font(mut self) -> Self {
        self.font_mut();
        self
    }

    pub fn bold(mut self) -> Self {
        self.font_mut().bold = Some(true);
        self
    }

    pub fn italic(mut self) -> Self {
        self.font_mut().italic = Some(true);
        self
    }

    pub fn underline(mut self) -> Self {
        self.font_mut().underline = Some(Underline::Flag(true));
        self
    }

    pub fn font_name(mut self, name: &str) -> Self {
        self.font_mut().name = Some(name.to_string());
        self
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.font_mut().size = Some(size);
        self
    }

    pub fn font_color(mut self, argb: &str) -> Self {
        self.font_mut().color = Some(ColorRef::argb(argb));
        self
    }

    pub fn bg_color(mut self, argb: &str) -> Self {
        self.style.fill = Some(Fill {
            fg_color: Some(ColorRef::argb(argb)),
        });
        self
    }

    /// Fill present but without a color.
    pub fn empty_fill(mut self) -> Self {
        self.style.fill = Some(Fill::default());
        self
    }

    pub fn border_top(mut self, argb: &str) -> Self {
        self.border_mut().top = Some(edge(argb));
        self
    }

    pub fn border_bottom(mut self, argb: &str) -> Self {
        self.border_mut().bottom = Some(edge(argb));
        self
    }

    pub fn border_left(mut self, argb: &str) -> Self {
        self.border_mut().left = Some(edge(argb));
        self
    }

    pub fn border_right(mut self, argb: &str) -> Self {
        self.border_mut().right = Some(edge(argb));
        self
    }

    pub fn border_all(self, argb: &str) -> Self {
        self.border_top(argb)
            .border_bottom(argb)
            .border_left(argb)
            .border_right(argb)
    }

    pub fn align(mut self, horizontal: Option<HAlign>, vertical: Option<VAlign>) -> Self {
        self.style.alignment = Some(Alignment {
            horizontal,
            vertical,
        });
        self
    }

    pub fn build(self) -> CellStyle {
        self.style
    }
}

fn edge(argb: &str) -> BorderEdge {
    BorderEdge {
        style: Some("thin".to_string()),
        color: Some(ColorRef::argb(argb)),
    }
}

// ============================================================================
// Sheet Builder
// ============================================================================

/// Builder for one worksheet.
#[derive(Debug, Clone)]
pub struct SheetBuilder {
    name: String,
    columns: Vec<Column>,
    cells: BTreeMap<(u32, u32), Cell>,
    heights: BTreeMap<u32, f64>,
}

impl SheetBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
            cells: BTreeMap::new(),
            heights: BTreeMap::new(),
        }
    }

    /// Append `count` columns without a width.
    pub fn columns(mut self, count: usize) -> Self {
        self.columns
            .extend(std::iter::repeat_with(Column::default).take(count));
        self
    }

    /// Append one column with a width.
    pub fn column_width(mut self, width: f64) -> Self {
        self.columns.push(Column::with_width(width));
        self
    }

    /// Set a cell by A1 reference.
    pub fn cell(
        mut self,
        cell_ref: &str,
        value: impl Into<CellValue>,
        style: Option<CellStyle>,
    ) -> Self {
        let at = parse_cell_ref(cell_ref).expect("invalid cell reference");
        let cell = self.cell_mut(at);
        cell.value = value.into();
        cell.style = style;
        self
    }

    pub fn row_height(mut self, row: u32, height: f64) -> Self {
        self.heights.insert(row, height);
        self
    }

    /// Merge an A1 range: the top-left cell anchors, the others point at it.
    /// Cells not set yet are created empty.
    pub fn merge(mut self, range: &str) -> Self {
        let (start, end) = parse_cell_range(range).expect("invalid range");
        for row in start.row..=end.row {
            for col in start.col..=end.col {
                let at = CellAddress::new(row, col);
                self.cell_mut(at).merge = if at == start {
                    MergeState::Anchor
                } else {
                    MergeState::Member { anchor: start }
                };
            }
        }
        self
    }

    fn cell_mut(&mut self, at: CellAddress) -> &mut Cell {
        self.cells
            .entry((at.row, at.col))
            .or_insert_with(|| Cell::new(at.row, at.col, CellValue::Empty))
    }

    pub fn build(self, id: u32) -> Sheet {
        let mut rows: BTreeMap<u32, Row> = BTreeMap::new();
        for (row, height) in &self.heights {
            rows.entry(*row).or_insert_with(|| Row::new(*row)).height = Some(*height);
        }
        for ((row, _), cell) in self.cells {
            rows.entry(row)
                .or_insert_with(|| Row::new(row))
                .cells
                .push(cell);
        }
        let mut sheet = Sheet::new(id, self.name);
        sheet.columns = self.columns;
        sheet.rows = rows.into_values().collect();
        sheet
    }
}

// ============================================================================
// Workbook Builder
// ============================================================================

/// Builder for a workbook; sheet ids are assigned from 1 in order.
#[derive(Debug, Clone, Default)]
pub struct WorkbookBuilder {
    sheets: Vec<SheetBuilder>,
}

impl WorkbookBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet(mut self, sheet: SheetBuilder) -> Self {
        self.sheets.push(sheet);
        self
    }

    /// Add `count` sheets named `Sheet1`, `Sheet2`, ... with `columns` columns
    /// and `rows` rows of numbers.
    pub fn numbered_sheets(mut self, count: usize, rows: u32, columns: u32) -> Self {
        for i in 1..=count {
            let mut sheet = SheetBuilder::new(&format!("Sheet{i}")).columns(columns as usize);
            for row in 1..=rows {
                for col in 1..=columns {
                    let at = CellAddress::new(row, col).to_string();
                    sheet = sheet.cell(&at, f64::from(row * 100 + col), None);
                }
            }
            self.sheets.push(sheet);
        }
        self
    }

    pub fn build(self) -> Workbook {
        Workbook {
            sheets: self
                .sheets
                .into_iter()
                .enumerate()
                .map(|(i, sheet)| sheet.build(i as u32 + 1))
                .collect(),
        }
    }

    /// Serialized form read by `JsonDecoder`.
    pub fn build_json(self) -> Vec<u8> {
        serde_json::to_vec(&self.build()).expect("workbook serializes")
    }
}
