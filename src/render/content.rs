//! Cell content dispatch: value kind to displayable content.

use chrono::{Local, TimeZone};

use super::style::{Declaration, ResolvedFont, LINK_COLOR};
use crate::color::CssColor;
use crate::types::{plain_text, CellValue, RichTextRun};

/// Date cells render with this pattern (`YYYY-MM-DD HH:mm:ss`).
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Displayable content of one table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Empty,
    Text(String),
    /// Independently styled runs, concatenated in order.
    Runs(Vec<TextRun>),
    /// A link opened in a new browsing context.
    Link(LinkRun),
}

impl Content {
    /// Concatenated visible text.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.clone(),
            Self::Runs(runs) => runs.iter().map(|r| r.text.as_str()).collect(),
            Self::Link(link) => link.text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// `None` when the run carries no font of its own (inherits the cell).
    pub font: Option<ResolvedFont>,
}

/// Hyperlink run. Only the color and underline are fixed; everything else
/// is inherited from the cell.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRun {
    pub text: String,
    pub href: String,
    pub color: CssColor,
}

impl LinkRun {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
            color: LINK_COLOR.to_string(),
        }
    }

    pub fn declarations(&self) -> Vec<Declaration> {
        vec![
            ("color", self.color.clone()),
            ("text-decoration", "underline".to_string()),
        ]
    }
}

/// Resolve a cell value into content, formatting dates in the local time zone.
pub fn resolve_content(value: &CellValue) -> Content {
    resolve_content_in(value, &Local)
}

/// Resolve a cell value into content, formatting dates in `tz`.
pub fn resolve_content_in<Tz: TimeZone>(value: &CellValue, tz: &Tz) -> Content
where
    Tz::Offset: std::fmt::Display,
{
    match value {
        CellValue::Empty => Content::Empty,
        CellValue::RichText { runs } => Content::Runs(runs.iter().map(text_run).collect()),
        CellValue::Hyperlink { text, target } => {
            Content::Link(LinkRun::new(text.as_str(), target.as_str()))
        }
        CellValue::Date { timestamp } => Content::Text(format_date_in(*timestamp, tz)),
        CellValue::Formula { result, .. } => match result.as_deref() {
            Some(CellValue::RichText { runs }) => Content::Text(plain_text(runs)),
            Some(CellValue::Formula { .. }) | None => Content::Empty,
            Some(other) => resolve_content_in(other, tz),
        },
        scalar => scalar_text(scalar).map_or(Content::Empty, Content::Text),
    }
}

fn text_run(run: &RichTextRun) -> TextRun {
    TextRun {
        text: run.text.clone(),
        font: run.font.as_ref().map(ResolvedFont::resolve),
    }
}

/// Stringify a plain scalar value as-is.
fn scalar_text(value: &CellValue) -> Option<String> {
    match value {
        CellValue::String { text } | CellValue::Error { text } => Some(text.clone()),
        CellValue::Number { value } => Some(format_number(*value)),
        CellValue::Boolean { value } => Some(value.to_string()),
        _ => None,
    }
}

/// Magnitudes in `[1e-6, 1e21)` print in positional notation, others in
/// exponent notation.
const POSITIONAL_RANGE: std::ops::Range<f64> = 1e-6..1e21;

/// Format a number the way JavaScript's `String(n)` does.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if value == 0.0 {
        // -0 prints as 0
        "0".to_string()
    } else if POSITIONAL_RANGE.contains(&value.abs()) {
        value.to_string()
    } else {
        // Shortest round-trip digits; JS writes an explicit `+` on the exponent
        let exponent = format!("{value:e}");
        match exponent.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{mantissa}e+{power}")
            }
            _ => exponent,
        }
    }
}

/// Format a millisecond Unix timestamp as `YYYY-MM-DD HH:mm:ss` in the local time zone.
pub fn format_date(timestamp_ms: i64) -> String {
    format_date_in(timestamp_ms, &Local)
}

/// Format a millisecond Unix timestamp as `YYYY-MM-DD HH:mm:ss` in `tz`.
///
/// Timestamps outside chrono's range print as the raw number.
pub fn format_date_in<Tz: TimeZone>(timestamp_ms: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match tz.timestamp_millis_opt(timestamp_ms).earliest() {
        Some(datetime) => datetime.format(DATE_FORMAT).to_string(),
        None => timestamp_ms.to_string(),
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
    use chrono::Utc;

    #[test]
    fn test_format_number_matches_js() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_format_number_exponent_range_matches_js() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e25), "-2.5e+25");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(0.000_001), "0.000001");
        assert_eq!(format_number(1.234_567_890_123_456_8e20), "123456789012345680000");
        assert_eq!(format_number(f64::MAX), "1.7976931348623157e+308");
        assert_eq!(format_number(5e-324), "5e-324");
    }

    #[test]
    fn test_hyperlink_fixes_only_color_and_underline() {
        let value = CellValue::Hyperlink {
            text: "Docs".into(),
            target: "https://example.com".into(),
        };
        let Content::Link(link) = resolve_content(&value) else {
            panic!("expected a link");
        };
        assert_eq!(
            link.declarations(),
            vec![
                ("color", "#0563C1".to_string()),
                ("text-decoration", "underline".to_string()),
            ]
        );
    }

    #[test]
    fn test_format_date_utc() {
        // 2021-03-04T05:06:07Z
        assert_eq!(format_date_in(1_614_834_367_000, &Utc), "2021-03-04 05:06:07");
    }

    #[test]
    fn test_formula_shows_cached_result() {
        let value = CellValue::Formula {
            formula: "SUM(A1:A2)".into(),
            result: Some(Box::new(CellValue::number(3.0))),
        };
        assert_eq!(resolve_content(&value), Content::Text("3".into()));
    }

    #[test]
    fn test_formula_without_result_is_empty() {
        let value = CellValue::Formula {
            formula: "NOW()".into(),
            result: None,
        };
        assert_eq!(resolve_content(&value), Content::Empty);
    }
}
