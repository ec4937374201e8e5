//! HTML serialization of table presentations.
//!
//! Both surfaces use these: the static document writes them into a page, the
//! DOM surface inserts them with `insertAdjacentHTML`.

use std::fmt::Write as _;

use super::content::{Content, LinkRun, TextRun};
use super::row::{CellPresentation, RowPresentation};
use super::style::{px, Declaration};
use super::table::{TableHeader, GUTTER_WIDTH_PX};

/// Escape text for use between tags.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape text for use inside a double-quoted attribute.
pub fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Join declarations into an inline `style` value: `a: b; c: d`.
pub fn style_value(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(|(property, value)| format!("{property}: {value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// ` style="..."`, or nothing for an empty declaration list.
fn style_attr(out: &mut String, declarations: &[Declaration]) {
    if !declarations.is_empty() {
        let _ = write!(
            out,
            " style=\"{}\"",
            escape_attr(&style_value(declarations))
        );
    }
}

/// Header row: an empty gutter cell, then one lettered cell per column.
pub fn header_row(header: &TableHeader) -> String {
    let mut out = String::from("<tr>");
    let _ = write!(out, "<th style=\"width: {}\"></th>", px(GUTTER_WIDTH_PX));
    for column in &header.columns {
        let _ = write!(
            out,
            "<th style=\"width: {}\">{}</th>",
            px(column.width_px),
            escape_text(&column.label)
        );
    }
    out.push_str("</tr>");
    out
}

/// Body row: the row-number gutter cell, then every presented cell.
pub fn body_row(row: &RowPresentation) -> String {
    let mut out = String::from("<tr>");
    let _ = write!(out, "<td>{}</td>", row.number);
    for cell in &row.cells {
        write_cell(&mut out, cell);
    }
    out.push_str("</tr>");
    out
}

/// Concatenated body rows of one batch.
pub fn body_rows(rows: &[RowPresentation]) -> String {
    rows.iter().map(body_row).collect()
}

fn write_cell(out: &mut String, cell: &CellPresentation) {
    out.push_str("<td");
    if cell.merged {
        let _ = write!(
            out,
            " colspan=\"{}\" rowspan=\"{}\"",
            cell.span.cols, cell.span.rows
        );
    }
    style_attr(out, &cell.style.declarations());
    out.push('>');
    write_content(out, &cell.content);
    out.push_str("</td>");
}

fn write_content(out: &mut String, content: &Content) {
    match content {
        Content::Empty => {}
        Content::Text(text) => out.push_str(&escape_text(text)),
        Content::Runs(runs) => {
            for run in runs {
                write_run(out, run);
            }
        }
        Content::Link(link) => write_link(out, link),
    }
}

fn write_run(out: &mut String, run: &TextRun) {
    out.push_str("<span");
    if let Some(font) = &run.font {
        style_attr(out, &font.declarations());
    }
    out.push('>');
    out.push_str(&escape_text(&run.text));
    out.push_str("</span>");
}

fn write_link(out: &mut String, link: &LinkRun) {
    let _ = write!(
        out,
        "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\"",
        escape_attr(&link.href)
    );
    style_attr(out, &link.declarations());
    out.push('>');
    out.push_str(&escape_text(&link.text));
    out.push_str("</a>");
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
    use crate::cell_ref::CellAddress;
    use crate::merge::Span;
    use crate::render::style::ResolvedStyle;
    use crate::types::Column;

    fn cell(content: Content) -> CellPresentation {
        CellPresentation {
            address: CellAddress::new(1, 1),
            span: Span::SINGLE,
            merged: false,
            style: ResolvedStyle::default(),
            content,
        }
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_attr(r#"x"y'z"#), "x&quot;y&#39;z");
    }

    #[test]
    fn test_header_row_widths() {
        let header = TableHeader::from_columns(&[Column::with_width(10.0), Column::default()]);
        assert_eq!(
            header_row(&header),
            "<tr><th style=\"width: 50px\"></th><th style=\"width: 80px\">A</th><th style=\"width: 100px\">B</th></tr>"
        );
    }

    #[test]
    fn test_body_row_gutter_and_plain_cell() {
        let row = RowPresentation {
            number: 7,
            cells: vec![cell(Content::Text("<b>".into()))],
        };
        assert_eq!(body_row(&row), "<tr><td>7</td><td>&lt;b&gt;</td></tr>");
    }

    #[test]
    fn test_merged_cell_carries_spans() {
        let mut merged = cell(Content::Empty);
        merged.merged = true;
        merged.span = Span::new(2, 3);
        let row = RowPresentation {
            number: 1,
            cells: vec![merged],
        };
        assert!(body_row(&row).contains("<td colspan=\"2\" rowspan=\"3\"></td>"));
    }

    #[test]
    fn test_link_opens_new_context() {
        let html = body_row(&RowPresentation {
            number: 1,
            cells: vec![cell(Content::Link(LinkRun::new(
                "site",
                "https://example.com/?a=1&b=2",
            )))],
        });
        assert!(html.contains("href=\"https://example.com/?a=1&amp;b=2\""));
        assert!(html.contains("target=\"_blank\""));
        assert!(html.contains("color: #0563C1"));
        assert!(html.contains("text-decoration: underline"));
        // Size, weight and family come from the cell
        assert!(!html.contains("font-size"));
        assert!(!html.contains("font-weight"));
    }

    #[test]
    fn test_run_without_font_has_no_style() {
        let html = body_row(&RowPresentation {
            number: 1,
            cells: vec![cell(Content::Runs(vec![TextRun {
                text: "plain".into(),
                font: None,
            }]))],
        });
        assert!(html.contains("<span>plain</span>"));
    }
}
