//! Utilities for Excel-style cell addresses and column letters.
//!
//! Rows and columns are 1-based throughout, matching the decoded workbook.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 1-based (row, column) cell position, displayed as `A1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    pub row: u32,
    pub col: u32,
}

impl CellAddress {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letter(self.col), self.row)
    }
}

impl FromStr for CellAddress {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cell_ref(s).ok_or_else(|| format!("invalid cell reference `{s}`"))
    }
}

impl Serialize for CellAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Convert a 1-based column index to Excel column letters (A, B, ..., Z, AA, AB, ...)
pub fn column_letter(col: u32) -> String {
    let mut result = String::new();
    let mut n = col;
    while n > 0 {
        n -= 1;
        let c = char::from(b'A' + u8::try_from(n % 26).unwrap_or(0));
        result.insert(0, c);
        n /= 26;
    }
    result
}

/// Parse a cell reference like "B3" (or "$B$3") into a 1-based address.
pub fn parse_cell_ref(cell_ref: &str) -> Option<CellAddress> {
    let mut col: u32 = 0;
    let mut row: u32 = 0;
    let mut saw_col = false;
    let mut saw_row = false;

    for ch in cell_ref.trim().chars() {
        if ch == '$' {
            continue;
        }
        if ch.is_ascii_alphabetic() {
            if saw_row {
                return None;
            }
            let upper = ch.to_ascii_uppercase();
            col = col.checked_mul(26)?.checked_add(upper as u32 - 'A' as u32 + 1)?;
            saw_col = true;
        } else if ch.is_ascii_digit() {
            row = row.checked_mul(10)?.checked_add(ch as u32 - '0' as u32)?;
            saw_row = true;
        } else {
            return None;
        }
    }

    if !saw_col || !saw_row || row == 0 {
        return None;
    }

    Some(CellAddress { row, col })
}

/// Parse a range like "A1:B10" (or a single "A1") into its top-left and
/// bottom-right corners.
pub fn parse_cell_range(range: &str) -> Option<(CellAddress, CellAddress)> {
    if let Some((start, end)) = range.split_once(':') {
        let start = parse_cell_ref(start)?;
        let end = parse_cell_ref(end)?;
        Some((
            CellAddress::new(start.row.min(end.row), start.col.min(end.col)),
            CellAddress::new(start.row.max(end.row), start.col.max(end.col)),
        ))
    } else {
        let cell = parse_cell_ref(range)?;
        Some((cell, cell))
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

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
        assert_eq!(column_letter(52), "AZ");
        assert_eq!(column_letter(703), "AAA");
        assert_eq!(column_letter(0), "");
    }

    #[test]
    fn test_parse_and_display() {
        let addr = parse_cell_ref("$C$12").unwrap();
        assert_eq!(addr, CellAddress::new(12, 3));
        assert_eq!(addr.to_string(), "C12");
    }

    #[test]
    fn test_rejects_malformed_refs() {
        assert_eq!(parse_cell_ref("12"), None);
        assert_eq!(parse_cell_ref("AB"), None);
        assert_eq!(parse_cell_ref("A0"), None);
        assert_eq!(parse_cell_ref("1A"), None);
        assert_eq!(parse_cell_ref("A-1"), None);
    }

    #[test]
    fn test_parse_range_normalizes_corners() {
        let (start, end) = parse_cell_range("C4:A1").unwrap();
        assert_eq!(start, CellAddress::new(1, 1));
        assert_eq!(end, CellAddress::new(4, 3));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&CellAddress::new(2, 28)).unwrap();
        assert_eq!(json, "\"AB2\"");
        let back: CellAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CellAddress::new(2, 28));
    }
}
