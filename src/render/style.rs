//! Style resolution: decoded cell styles to CSS declarations.
//!
//! Missing or invalid parts never fail; they fall back to the defaults below.

use crate::color::{decode_css, decode_css_or, CssColor};
use crate::types::{packed, BorderEdge, CellStyle, Font};

/// Background used when a fill has no usable color.
pub const DEFAULT_BACKGROUND: &str = "#fff";
/// Text color used when a font has no usable color.
pub const DEFAULT_FONT_COLOR: &str = "#333";
/// Font size (CSS px) used when a font has no size.
pub const DEFAULT_FONT_SIZE_PX: f64 = 14.0;
/// Points to CSS pixels: row heights and font sizes are divided by this.
pub const POINTS_PER_PX: f64 = 0.75;
/// Color of hyperlink runs.
pub const LINK_COLOR: &str = "#0563C1";

/// A CSS property/value pair.
pub type Declaration = (&'static str, String);

/// Fully resolved font for a cell or run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFont {
    pub color: CssColor,
    pub family: Option<String>,
    pub size_px: f64,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl ResolvedFont {
    pub fn resolve(font: &Font) -> Self {
        Self {
            color: decode_css_or(packed(font.color.as_ref()), DEFAULT_FONT_COLOR),
            family: font.name.clone().filter(|name| !name.is_empty()),
            size_px: font
                .size
                .filter(|size| *size > 0.0)
                .map_or(DEFAULT_FONT_SIZE_PX, |size| size / POINTS_PER_PX),
            bold: font.bold.unwrap_or(false),
            italic: font.italic.unwrap_or(false),
            underline: font.underline.as_ref().is_some_and(|u| u.is_set()),
        }
    }

    pub fn declarations(&self) -> Vec<Declaration> {
        let mut decls = vec![("color", self.color.clone())];
        if let Some(family) = &self.family {
            decls.push(("font-family", family.clone()));
        }
        decls.push(("font-size", px(self.size_px)));
        decls.push(("font-weight", keyword(self.bold, "bold")));
        decls.push(("font-style", keyword(self.italic, "italic")));
        decls.push(("text-decoration", underline_keyword(self.underline)));
        decls
    }
}

/// Resolved presentation style of one table cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedStyle {
    pub text_align: Option<&'static str>,
    pub vertical_align: Option<&'static str>,
    /// Set only when the cell has a fill.
    pub background: Option<CssColor>,
    pub border_top: Option<String>,
    pub border_bottom: Option<String>,
    pub border_left: Option<String>,
    pub border_right: Option<String>,
    /// Set only when the cell has a font.
    pub font: Option<ResolvedFont>,
    pub height_px: Option<f64>,
}

impl ResolvedStyle {
    /// Resolve a cell style for a row of the given height (points).
    pub fn resolve(style: Option<&CellStyle>, row_height: Option<f64>) -> Self {
        let mut resolved = Self {
            height_px: row_height
                .filter(|h| *h > 0.0)
                .map(|h| h / POINTS_PER_PX),
            ..Self::default()
        };
        let Some(style) = style else {
            return resolved;
        };

        if let Some(alignment) = &style.alignment {
            resolved.text_align = alignment.horizontal.and_then(|h| h.css());
            resolved.vertical_align = alignment.vertical.and_then(|v| v.css());
        }
        if let Some(fill) = &style.fill {
            resolved.background = Some(decode_css_or(
                packed(fill.fg_color.as_ref()),
                DEFAULT_BACKGROUND,
            ));
        }
        if let Some(border) = &style.border {
            resolved.border_top = border_edge(border.top.as_ref());
            resolved.border_bottom = border_edge(border.bottom.as_ref());
            resolved.border_left = border_edge(border.left.as_ref());
            resolved.border_right = border_edge(border.right.as_ref());
        }
        resolved.font = style.font.as_ref().map(ResolvedFont::resolve);
        resolved
    }

    /// CSS declarations in a stable order.
    pub fn declarations(&self) -> Vec<Declaration> {
        let mut decls = Vec::new();
        if let Some(height) = self.height_px {
            decls.push(("height", px(height)));
        }
        if let Some(align) = self.text_align {
            decls.push(("text-align", align.to_string()));
        }
        if let Some(align) = self.vertical_align {
            decls.push(("vertical-align", align.to_string()));
        }
        if let Some(bg) = &self.background {
            decls.push(("background-color", bg.clone()));
        }
        let edges = [
            ("border-top", &self.border_top),
            ("border-bottom", &self.border_bottom),
            ("border-left", &self.border_left),
            ("border-right", &self.border_right),
        ];
        for (property, edge) in edges {
            if let Some(edge) = edge {
                decls.push((property, edge.clone()));
            }
        }
        if let Some(font) = &self.font {
            decls.extend(font.declarations());
        }
        decls
    }
}

/// `1px solid <color>` for an edge with a usable color, otherwise no border.
fn border_edge(edge: Option<&BorderEdge>) -> Option<String> {
    decode_css(packed(edge.and_then(|e| e.color.as_ref())))
        .map(|color| format!("1px solid {color}"))
}

fn keyword(on: bool, value: &str) -> String {
    let kw = if on { value } else { "normal" };
    kw.to_string()
}

fn underline_keyword(on: bool) -> String {
    let kw = if on { "underline" } else { "none" };
    kw.to_string()
}

/// Format a pixel length the way a JS number would print.
pub fn px(value: f64) -> String {
    format!("{value}px")
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::{Borders, ColorRef, Fill, Underline};

    #[test]
    fn test_unstyled_cell_has_no_declarations() {
        assert!(ResolvedStyle::resolve(None, None).declarations().is_empty());
    }

    #[test]
    fn test_fill_without_color_falls_back_to_white() {
        let style = CellStyle {
            fill: Some(Fill { fg_color: None }),
            ..CellStyle::default()
        };
        let resolved = ResolvedStyle::resolve(Some(&style), None);
        assert_eq!(resolved.background.as_deref(), Some(DEFAULT_BACKGROUND));
    }

    #[test]
    fn test_border_edges_resolve_independently() {
        let style = CellStyle {
            border: Some(Borders {
                top: Some(BorderEdge {
                    style: Some("thin".into()),
                    color: Some(ColorRef::argb("FF000000")),
                }),
                bottom: Some(BorderEdge {
                    style: Some("thin".into()),
                    color: None,
                }),
                left: None,
                right: Some(BorderEdge {
                    style: None,
                    color: Some(ColorRef::argb("bad")),
                }),
            }),
            ..CellStyle::default()
        };
        let resolved = ResolvedStyle::resolve(Some(&style), None);
        assert_eq!(
            resolved.border_top.as_deref(),
            Some("1px solid rgba(0, 0, 0, 1)")
        );
        assert_eq!(resolved.border_bottom, None);
        assert_eq!(resolved.border_left, None);
        assert_eq!(resolved.border_right, None);
    }

    #[test]
    fn test_font_size_converted_from_points() {
        let font = Font {
            size: Some(12.0),
            underline: Some(Underline::Kind("double".into())),
            ..Font::default()
        };
        let resolved = ResolvedFont::resolve(&font);
        assert_eq!(resolved.size_px, 16.0);
        assert!(resolved.underline);
        assert_eq!(resolved.color, DEFAULT_FONT_COLOR);
    }

    #[test]
    fn test_row_height_converted_from_points() {
        let resolved = ResolvedStyle::resolve(None, Some(15.0));
        assert_eq!(resolved.declarations(), vec![("height", "20px".to_string())]);
    }
}
