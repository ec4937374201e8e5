//! Rendering surfaces.
//!
//! A surface is a container holding a tip area, a sheet-tab strip and one
//! table panel per sheet. Exactly one tab/panel pair carries the active
//! class at a time.

pub mod html;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use html::{HtmlDocument, HtmlPanel, DEFAULT_STYLESHEET};

#[cfg(target_arch = "wasm32")]
pub use dom::{DomPanel, DomSurface};

use crate::error::Result;
use crate::render::TableSink;
use crate::tabs::SheetInfo;

pub const CONTAINER_CLASS: &str = "xlsx-viewer-container";
pub const TIP_CLASS: &str = "xlsx-viewer-tip";
pub const SHEET_STRIP_CLASS: &str = "xlsx-viewer-sheet";
pub const TABLE_AREA_CLASS: &str = "xlsx-viewer-table";
pub const SHEET_TAB_CLASS: &str = "xlsx-viewer-sheet-content";
pub const TABLE_PANEL_CLASS: &str = "xlsx-viewer-table-content";
pub const ACTIVE_CLASS: &str = "active";

pub const LOADING_TIP: &str = "Loading...";
pub const INCOMPATIBLE_TIP: &str = "Browser incompatibility.";

/// Tip text shown when decoding fails.
pub fn load_error_tip(error: &impl std::fmt::Display) -> String {
    format!("Load error: {error}")
}

/// Where the viewer draws.
pub trait ViewSurface {
    /// Table panel of one sheet. Cloned into builds so they run without
    /// borrowing the surface.
    type Panel: TableSink + Clone;

    /// True when the host is a legacy engine the viewer refuses to run in.
    fn is_legacy_host(&self) -> bool {
        false
    }

    /// Create the container, tip (`Loading...`), tab strip and table area.
    fn mount(&mut self) -> Result<()>;

    fn set_tip(&mut self, text: &str) -> Result<()>;

    fn hide_tip(&mut self) -> Result<()>;

    /// Append a tab and an empty table panel for `sheet`.
    fn add_sheet(&mut self, sheet: &SheetInfo) -> Result<Self::Panel>;

    /// Toggle the active class on the tab/panel pair at `index`.
    fn set_active(&mut self, index: usize, active: bool) -> Result<()>;
}

/// Legacy engine check: an `MSIE` or `Trident/` user agent, or an
/// `ActiveXObject` global.
pub fn is_legacy_engine(user_agent: &str, has_activex: bool) -> bool {
    has_activex || user_agent.contains("MSIE") || user_agent.contains("Trident/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_engine_detection() {
        assert!(is_legacy_engine(
            "Mozilla/4.0 (compatible; MSIE 8.0; Windows NT 6.1)",
            false
        ));
        assert!(is_legacy_engine(
            "Mozilla/5.0 (Windows NT 10.0; Trident/7.0; rv:11.0) like Gecko",
            false
        ));
        assert!(is_legacy_engine("", true));
        assert!(!is_legacy_engine(
            "Mozilla/5.0 (X11; Linux x86_64; rv:131.0) Gecko/20100101 Firefox/131.0",
            false
        ));
    }

    #[test]
    fn test_load_error_tip() {
        assert_eq!(load_error_tip(&"bad zip"), "Load error: bad zip");
    }
}
