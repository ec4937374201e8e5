//! Merge index: groups merged cells into ranges keyed by their anchor.
//!
//! The decoder marks each merged cell as either the anchor (top-left) or a
//! member pointing at the anchor. Ranges are assumed rectangular and
//! non-overlapping; nothing here re-validates that.

use std::collections::HashMap;

use crate::cell_ref::CellAddress;
use crate::types::Row;

/// Column and row span of a rendered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub cols: u32,
    pub rows: u32,
}

impl Span {
    pub const SINGLE: Self = Self { cols: 1, rows: 1 };

    pub const fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::SINGLE
    }
}

/// One merged range: its anchor and every member seen, anchor included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRange {
    anchor: CellAddress,
    members: Vec<CellAddress>,
}

impl MergeRange {
    fn new(anchor: CellAddress) -> Self {
        Self {
            anchor,
            members: Vec::new(),
        }
    }

    pub fn anchor(&self) -> CellAddress {
        self.anchor
    }

    /// Members in row-major discovery order.
    pub fn members(&self) -> &[CellAddress] {
        &self.members
    }

    /// Span from the anchor to the furthest member in each direction.
    pub fn span(&self) -> Span {
        let max_col = self.members.iter().map(|m| m.col).max().unwrap_or(self.anchor.col);
        let max_row = self.members.iter().map(|m| m.row).max().unwrap_or(self.anchor.row);
        Span {
            cols: max_col.saturating_sub(self.anchor.col) + 1,
            rows: max_row.saturating_sub(self.anchor.row) + 1,
        }
    }
}

/// Anchor address → merged range, for one sheet.
#[derive(Debug, Clone, Default)]
pub struct MergeIndex {
    ranges: Vec<MergeRange>,
    by_anchor: HashMap<CellAddress, usize>,
}

impl MergeIndex {
    /// Scan rows top-to-bottom and cells left-to-right, collecting merged cells
    /// under their anchor.
    pub fn build(rows: &[Row]) -> Self {
        let mut index = Self::default();
        for row in rows {
            for cell in &row.cells {
                if let Some(anchor) = cell.merge_anchor() {
                    index.insert(anchor, cell.address());
                }
            }
        }
        index
    }

    fn insert(&mut self, anchor: CellAddress, member: CellAddress) {
        let slot = match self.by_anchor.get(&anchor) {
            Some(&slot) => slot,
            None => {
                self.ranges.push(MergeRange::new(anchor));
                let slot = self.ranges.len() - 1;
                self.by_anchor.insert(anchor, slot);
                slot
            }
        };
        if let Some(range) = self.ranges.get_mut(slot) {
            range.members.push(member);
        }
    }

    pub fn get(&self, anchor: CellAddress) -> Option<&MergeRange> {
        self.by_anchor
            .get(&anchor)
            .and_then(|&slot| self.ranges.get(slot))
    }

    /// Span of the range anchored at `anchor`, if any.
    pub fn span_at(&self, anchor: CellAddress) -> Option<Span> {
        self.get(anchor).map(MergeRange::span)
    }

    /// Ranges in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &MergeRange> {
        self.ranges.iter()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::{Cell, CellValue, MergeState};

    fn merged(row: u32, col: u32, anchor: CellAddress) -> Cell {
        let mut cell = Cell::new(row, col, CellValue::Empty);
        cell.merge = if anchor == CellAddress::new(row, col) {
            MergeState::Anchor
        } else {
            MergeState::Member { anchor }
        };
        cell
    }

    #[test]
    fn test_member_before_anchor_joins_same_range() {
        // Out-of-order input: the member row arrives first.
        let anchor = CellAddress::new(1, 1);
        let rows = vec![
            Row {
                number: 2,
                height: None,
                cells: vec![merged(2, 1, anchor)],
            },
            Row {
                number: 1,
                height: None,
                cells: vec![merged(1, 1, anchor)],
            },
        ];
        let index = MergeIndex::build(&rows);
        assert_eq!(index.len(), 1);
        let range = index.get(anchor).unwrap();
        assert_eq!(range.members().len(), 2);
        assert_eq!(range.span(), Span::new(1, 2));
    }

    #[test]
    fn test_unmerged_cells_are_ignored() {
        let rows = vec![Row {
            number: 1,
            height: None,
            cells: vec![Cell::new(1, 1, CellValue::text("x"))],
        }];
        assert!(MergeIndex::build(&rows).is_empty());
    }
}
