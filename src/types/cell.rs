use serde::{Deserialize, Serialize};

use super::{CellStyle, RichTextRun};
use crate::cell_ref::CellAddress;

/// A single cell: position, value, optional style and merge membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Row (1-indexed)
    pub row: u32,
    /// Column (1-indexed)
    pub col: u32,
    #[serde(default)]
    pub value: CellValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<CellStyle>,
    #[serde(default, skip_serializing_if = "MergeState::is_unmerged")]
    pub merge: MergeState,
}

impl Cell {
    /// An unstyled, unmerged cell.
    pub fn new(row: u32, col: u32, value: CellValue) -> Self {
        Self {
            row,
            col,
            value,
            style: None,
            merge: MergeState::Unmerged,
        }
    }

    pub fn address(&self) -> CellAddress {
        CellAddress::new(self.row, self.col)
    }

    /// Address of the merge anchor this cell belongs to, if merged.
    pub fn merge_anchor(&self) -> Option<CellAddress> {
        match self.merge {
            MergeState::Unmerged => None,
            MergeState::Anchor => Some(self.address()),
            MergeState::Member { anchor } => Some(anchor),
        }
    }

    /// True for merge members other than the anchor; these never render.
    pub fn is_absorbed(&self) -> bool {
        matches!(self.merge, MergeState::Member { anchor } if anchor != self.address())
    }
}

/// Merge membership of a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MergeState {
    #[default]
    Unmerged,
    /// Top-left cell of a merged range.
    Anchor,
    /// Any other cell of a merged range.
    Member { anchor: CellAddress },
}

impl MergeState {
    pub fn is_unmerged(&self) -> bool {
        matches!(self, Self::Unmerged)
    }
}

/// Cell value, as a closed set of kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CellValue {
    #[default]
    Empty,
    String {
        text: String,
    },
    Number {
        value: f64,
    },
    Boolean {
        value: bool,
    },
    /// Milliseconds since the Unix epoch (UTC), like JS `Date.getTime()`.
    Date {
        timestamp: i64,
    },
    RichText {
        runs: Vec<RichTextRun>,
    },
    Hyperlink {
        text: String,
        target: String,
    },
    /// Formula with the cached result computed by the authoring application.
    Formula {
        formula: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result: Option<Box<CellValue>>,
    },
    /// Error literal such as `#DIV/0!`.
    Error {
        text: String,
    },
}

impl CellValue {
    pub fn text(text: impl Into<String>) -> Self {
        Self::String { text: text.into() }
    }

    pub fn number(value: f64) -> Self {
        Self::Number { value }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::String { text: s }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number { value }
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Boolean { value }
    }
}
