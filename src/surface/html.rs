//! In-memory HTML document surface.
//!
//! Collects the viewer's output as markup and serializes it to a fragment
//! or a standalone page. Used natively (CLI, tests).

use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use super::{
    ViewSurface, ACTIVE_CLASS, CONTAINER_CLASS, LOADING_TIP, SHEET_STRIP_CLASS, SHEET_TAB_CLASS,
    TABLE_AREA_CLASS, TABLE_PANEL_CLASS, TIP_CLASS,
};
use crate::error::{Result, ViewerError};
use crate::render::html::{body_rows, escape_attr, escape_text, header_row};
use crate::render::style::px;
use crate::render::{RowPresentation, TableHeader, TableSink};
use crate::tabs::SheetInfo;

/// Stylesheet embedded by [`HtmlDocument::to_page`].
pub const DEFAULT_STYLESHEET: &str = r#".xlsx-viewer-container { font-family: sans-serif; font-size: 14px; color: #333; }
.xlsx-viewer-tip { padding: 8px; }
.xlsx-viewer-sheet { display: flex; gap: 2px; border-bottom: 1px solid #ccc; }
.xlsx-viewer-sheet-content { padding: 4px 12px; cursor: pointer; background: #f3f3f3; }
.xlsx-viewer-sheet-content.active { background: #fff; color: #217346; font-weight: bold; }
.xlsx-viewer-table { overflow: auto; }
.xlsx-viewer-table-content { display: none; }
.xlsx-viewer-table-content.active { display: block; }
.xlsx-viewer-table-content table { border-collapse: collapse; table-layout: fixed; }
.xlsx-viewer-table-content th, .xlsx-viewer-table-content td { border: 1px solid #e0e0e0; padding: 0 4px; overflow: hidden; white-space: nowrap; }
.xlsx-viewer-table-content th, .xlsx-viewer-table-content td:first-child { background: #f8f8f8; color: #666; text-align: center; }
"#;

#[derive(Debug, Default)]
struct PanelContent {
    width_px: Option<f64>,
    header: String,
    body: String,
    rows: usize,
    finished: bool,
}

/// Table panel of one sheet; clones share the same content.
#[derive(Debug, Clone, Default)]
pub struct HtmlPanel(Rc<RefCell<PanelContent>>);

impl HtmlPanel {
    /// Body rows appended so far.
    pub fn row_count(&self) -> usize {
        self.0.borrow().rows
    }

    /// True once the build finished.
    pub fn is_finished(&self) -> bool {
        self.0.borrow().finished
    }

    /// `<table>` markup, or nothing before a build started.
    pub fn table_html(&self) -> String {
        let content = self.0.borrow();
        if content.header.is_empty() && content.body.is_empty() && !content.finished {
            return String::new();
        }
        let mut out = String::from("<table");
        if let Some(width) = content.width_px {
            let _ = write!(out, " style=\"width: {}\"", px(width));
        }
        out.push('>');
        let _ = write!(
            out,
            "<thead>{}</thead><tbody>{}</tbody></table>",
            content.header, content.body
        );
        out
    }
}

impl TableSink for HtmlPanel {
    fn write_header(&mut self, header: &TableHeader) -> Result<()> {
        let mut content = self.0.borrow_mut();
        content.width_px = Some(header.width_px);
        content.header = header_row(header);
        Ok(())
    }

    fn append_rows(&mut self, rows: &[RowPresentation]) -> Result<()> {
        let mut content = self.0.borrow_mut();
        content.body.push_str(&body_rows(rows));
        content.rows += rows.len();
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.0.borrow_mut().finished = true;
        Ok(())
    }
}

#[derive(Debug)]
struct SheetSlot {
    info: SheetInfo,
    active: bool,
    panel: HtmlPanel,
}

/// In-memory viewer container.
#[derive(Debug, Default)]
pub struct HtmlDocument {
    mounted: bool,
    /// `None` once hidden.
    tip: Option<String>,
    sheets: Vec<SheetSlot>,
}

impl HtmlDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tip text, `None` when hidden.
    pub fn tip(&self) -> Option<&str> {
        self.tip.as_deref()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn panel(&self, index: usize) -> Option<&HtmlPanel> {
        self.sheets.get(index).map(|s| &s.panel)
    }

    /// Indices of tabs carrying the active class.
    pub fn active_tabs(&self) -> Vec<usize> {
        self.sheets
            .iter()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, _)| i)
            .collect()
    }

    /// Container markup.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        let _ = write!(out, "<div class=\"{CONTAINER_CLASS}\">");
        if let Some(tip) = &self.tip {
            let _ = write!(out, "<div class=\"{TIP_CLASS}\">{}</div>", escape_text(tip));
        }
        let _ = write!(out, "<div class=\"{SHEET_STRIP_CLASS}\">");
        for (i, slot) in self.sheets.iter().enumerate() {
            let _ = write!(
                out,
                "<div class=\"{}\" data-index=\"{i}\">{}</div>",
                classes(SHEET_TAB_CLASS, slot.active),
                escape_text(&slot.info.name)
            );
        }
        out.push_str("</div>");
        let _ = write!(out, "<div class=\"{TABLE_AREA_CLASS}\">");
        for slot in &self.sheets {
            let _ = write!(
                out,
                "<div class=\"{}\" data-sheet=\"{}\">{}</div>",
                classes(TABLE_PANEL_CLASS, slot.active),
                escape_attr(&slot.info.name),
                slot.panel.table_html()
            );
        }
        out.push_str("</div></div>");
        out
    }

    /// Standalone page with the default stylesheet.
    pub fn to_page(&self, title: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{DEFAULT_STYLESHEET}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
            escape_text(title),
            self.to_html()
        )
    }
}

fn classes(base: &str, active: bool) -> String {
    if active {
        format!("{base} {ACTIVE_CLASS}")
    } else {
        base.to_string()
    }
}

impl ViewSurface for HtmlDocument {
    type Panel = HtmlPanel;

    fn mount(&mut self) -> Result<()> {
        if !self.mounted {
            self.mounted = true;
            self.tip = Some(LOADING_TIP.to_string());
        }
        Ok(())
    }

    fn set_tip(&mut self, text: &str) -> Result<()> {
        self.tip = Some(text.to_string());
        Ok(())
    }

    fn hide_tip(&mut self) -> Result<()> {
        self.tip = None;
        Ok(())
    }

    fn add_sheet(&mut self, sheet: &SheetInfo) -> Result<HtmlPanel> {
        let panel = HtmlPanel::default();
        self.sheets.push(SheetSlot {
            info: sheet.clone(),
            active: false,
            panel: panel.clone(),
        });
        Ok(panel)
    }

    fn set_active(&mut self, index: usize, active: bool) -> Result<()> {
        let slot = self
            .sheets
            .get_mut(index)
            .ok_or_else(|| ViewerError::Surface(format!("no sheet panel at index {index}")))?;
        slot.active = active;
        Ok(())
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

    fn info(index: usize, name: &str) -> SheetInfo {
        SheetInfo {
            index,
            id: u32::try_from(index + 1).unwrap(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_mount_shows_loading_tip() {
        let mut doc = HtmlDocument::new();
        doc.mount().unwrap();
        assert_eq!(doc.tip(), Some("Loading..."));
        assert!(doc
            .to_html()
            .contains("<div class=\"xlsx-viewer-tip\">Loading...</div>"));
    }

    #[test]
    fn test_active_pair_classes() {
        let mut doc = HtmlDocument::new();
        doc.mount().unwrap();
        doc.add_sheet(&info(0, "One")).unwrap();
        doc.add_sheet(&info(1, "Two & more")).unwrap();
        doc.set_active(1, true).unwrap();
        let html = doc.to_html();
        assert!(html.contains("<div class=\"xlsx-viewer-sheet-content active\" data-index=\"1\">Two &amp; more</div>"));
        assert!(html.contains("<div class=\"xlsx-viewer-sheet-content\" data-index=\"0\">One</div>"));
        assert_eq!(doc.active_tabs(), vec![1]);
    }

    #[test]
    fn test_unknown_panel_is_surface_error() {
        let mut doc = HtmlDocument::new();
        assert!(doc.set_active(3, true).is_err());
    }

    #[test]
    fn test_page_embeds_stylesheet() {
        let doc = HtmlDocument::new();
        let page = doc.to_page("a <b>");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>a &lt;b&gt;</title>"));
        assert!(page.contains(".xlsx-viewer-table-content.active"));
    }
}
