//! Row renderer: one worksheet row to ordered cell presentation records.

use super::content::{resolve_content, Content};
use super::style::ResolvedStyle;
use crate::cell_ref::CellAddress;
use crate::merge::{MergeIndex, Span};
use crate::types::{Cell, Row, Sheet};

/// Presentation of one rendered table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellPresentation {
    pub address: CellAddress,
    pub span: Span,
    /// True when the cell anchors a merged range (even a 1×1 one).
    pub merged: bool,
    pub style: ResolvedStyle,
    pub content: Content,
}

/// Presentation of one table body row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowPresentation {
    /// 1-based row number shown in the gutter.
    pub number: u32,
    pub cells: Vec<CellPresentation>,
}

/// Renders rows of one sheet against its column list and merge index.
#[derive(Debug, Clone, Copy)]
pub struct RowRenderer<'a> {
    column_count: u32,
    merges: &'a MergeIndex,
}

impl<'a> RowRenderer<'a> {
    pub fn new(column_count: usize, merges: &'a MergeIndex) -> Self {
        Self {
            column_count: u32::try_from(column_count).unwrap_or(u32::MAX),
            merges,
        }
    }

    /// Render every column position of `row`, skipping cells absorbed by a merge.
    pub fn render(&self, row: &Row) -> RowPresentation {
        let cells = (1..=self.column_count)
            .filter_map(|col| match row.cell(col) {
                Some(cell) if cell.is_absorbed() => None,
                Some(cell) => Some(self.render_cell(cell, row.height)),
                None => Some(empty_cell(CellAddress::new(row.number, col), row.height)),
            })
            .collect();
        RowPresentation {
            number: row.number,
            cells,
        }
    }

    fn render_cell(&self, cell: &Cell, row_height: Option<f64>) -> CellPresentation {
        let address = cell.address();
        let anchored = cell.merge_anchor() == Some(address);
        CellPresentation {
            address,
            span: if anchored {
                self.merges.span_at(address).unwrap_or_default()
            } else {
                Span::SINGLE
            },
            merged: anchored,
            style: ResolvedStyle::resolve(cell.style.as_ref(), row_height),
            content: resolve_content(&cell.value),
        }
    }
}

fn empty_cell(address: CellAddress, row_height: Option<f64>) -> CellPresentation {
    CellPresentation {
        address,
        span: Span::SINGLE,
        merged: false,
        style: ResolvedStyle::resolve(None, row_height),
        content: Content::Empty,
    }
}

/// Lazily render every row of a sheet, 1 through its last row.
///
/// Rows the decoder omitted render as empty rows so row numbers and row spans
/// stay aligned.
pub fn render_rows<'a>(
    sheet: &'a Sheet,
    merges: &'a MergeIndex,
) -> impl Iterator<Item = RowPresentation> + 'a {
    let renderer = RowRenderer::new(sheet.columns.len(), merges);
    let mut stored = sheet.rows.iter().peekable();
    (1..=sheet.row_count()).map(move |number| {
        while stored.next_if(|r| r.number < number).is_some() {}
        match stored.next_if(|r| r.number == number) {
            Some(row) => renderer.render(row),
            None => renderer.render(&Row::new(number)),
        }
    })
}
