//! Tests for merged ranges: index construction, spans and absorbed cells.
//!
//! The decoder marks each merged cell as the anchor (top-left) or as a member
//! pointing at the anchor. The index groups them by anchor; the row renderer
//! emits the anchor with its span and skips every other member.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;
mod fixtures;

use fixtures::SheetBuilder;
use xltable::cell_ref::CellAddress;
use xltable::merge::{MergeIndex, Span};
use xltable::render::{render_rows, RowPresentation};

fn index_of(sheet: &SheetBuilder) -> MergeIndex {
    MergeIndex::build(&sheet.clone().build(1).rows)
}

fn rendered(sheet: SheetBuilder) -> Vec<RowPresentation> {
    let sheet = sheet.build(1);
    let merges = MergeIndex::build(&sheet.rows);
    render_rows(&sheet, &merges).collect()
}

// ============================================================================
// INDEX
// ============================================================================

#[test]
fn test_simple_2x2_merge() {
    let sheet = SheetBuilder::new("Sheet1").columns(3).merge("A1:B2");
    let index = index_of(&sheet);

    assert_eq!(index.len(), 1);
    let range = index.get(CellAddress::new(1, 1)).unwrap();
    assert_eq!(range.members().len(), 4);
    assert_eq!(range.members()[0], CellAddress::new(1, 1));
    assert_eq!(range.span(), Span::new(2, 2));
}

#[test]
fn test_members_in_row_major_order() {
    let sheet = SheetBuilder::new("Sheet1").columns(3).merge("B2:C3");
    let index = index_of(&sheet);
    let members: Vec<String> = index
        .get(CellAddress::new(2, 2))
        .unwrap()
        .members()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(members, ["B2", "C2", "B3", "C3"]);
}

#[test]
fn test_horizontal_and_vertical_spans() {
    let sheet = SheetBuilder::new("Sheet1")
        .columns(5)
        .merge("A1:E1")
        .merge("A3:A6");
    let index = index_of(&sheet);

    assert_eq!(index.span_at(CellAddress::new(1, 1)), Some(Span::new(5, 1)));
    assert_eq!(index.span_at(CellAddress::new(3, 1)), Some(Span::new(1, 4)));
    assert_eq!(index.span_at(CellAddress::new(2, 1)), None);
}

#[test]
fn test_single_cell_merge_keeps_unit_span() {
    let sheet = SheetBuilder::new("Sheet1").columns(1).merge("A1:A1");
    let index = index_of(&sheet);
    assert_eq!(index.span_at(CellAddress::new(1, 1)), Some(Span::SINGLE));
}

#[test]
fn test_unmerged_sheet_has_empty_index() {
    let sheet = SheetBuilder::new("Sheet1").columns(2).cell("A1", "x", None);
    assert!(index_of(&sheet).is_empty());
}

// ============================================================================
// RENDERING
// ============================================================================

#[test]
fn test_absorbed_members_are_not_emitted() {
    let rows = rendered(SheetBuilder::new("Sheet1").columns(3).merge("A1:B2"));

    assert_eq!(rows.len(), 2);
    // Row 1: anchor A1 (2x2) and C1
    assert_eq!(rows[0].cells.len(), 2);
    assert_eq!(rows[0].cells[0].address, CellAddress::new(1, 1));
    assert_eq!(rows[0].cells[0].span, Span::new(2, 2));
    assert!(rows[0].cells[0].merged);
    assert_eq!(rows[0].cells[1].address, CellAddress::new(1, 3));
    // Row 2: only C2
    assert_eq!(rows[1].cells.len(), 1);
    assert_eq!(rows[1].cells[0].address, CellAddress::new(2, 3));
}

#[test]
fn test_emitted_cells_equal_columns_minus_absorbed() {
    let rows = rendered(
        SheetBuilder::new("Sheet1")
            .columns(6)
            .merge("B1:D3")
            .merge("F2:F4"),
    );
    let per_row: Vec<usize> = rows.iter().map(|r| r.cells.len()).collect();
    // B1:D3 absorbs 2 cells in row 1 and 3 in rows 2-3; F2:F4 absorbs F3 and F4.
    assert_eq!(per_row, vec![4, 3, 2, 5]);
}

#[test]
fn test_single_cell_merge_renders_as_merged() {
    let rows = rendered(SheetBuilder::new("Sheet1").columns(2).merge("B1:B1"));
    let cell = &rows[0].cells[1];
    assert!(cell.merged);
    assert_eq!(cell.span, Span::SINGLE);
}

#[test]
fn test_anchor_value_is_rendered() {
    let rows = rendered(
        SheetBuilder::new("Sheet1")
            .columns(2)
            .cell("A1", "Title", None)
            .merge("A1:B1"),
    );
    assert_eq!(rows[0].cells.len(), 1);
    assert_eq!(rows[0].cells[0].content.plain_text(), "Title");
}
