//! xltable - spreadsheet table viewer for the web
//!
//! Renders an already-decoded workbook as tabbed HTML tables:
//! - Cell styles (fonts, colors, borders, fills, alignment)
//! - Rich text, hyperlinks, dates, merged ranges
//! - Lazy per-sheet builds, appended in chunks between animation frames
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { renderXlsx } from 'xltable';
//! await init();
//! const viewer = await renderXlsx(file, document.getElementById('view'), decode, {
//!   initialSheetIndex: 0,
//!   chunkSize: 500,
//!   onSwitch: (sheet) => console.log(sheet.name),
//! });
//! viewer.activate(1);
//! ```
//!
//! # Usage (Rust)
//!
//! ```no_run
//! use std::rc::Rc;
//! use xltable::{HtmlDocument, Immediate, JsonDecoder, NoopListener, Viewer, ViewerOptions};
//!
//! # async fn demo() -> xltable::error::Result<()> {
//! let mut viewer = Viewer::new(
//!     HtmlDocument::new(),
//!     Rc::new(Immediate),
//!     Rc::new(NoopListener),
//!     ViewerOptions::default(),
//! )?;
//! viewer.open(b"{\"sheets\":[]}".to_vec().into(), &JsonDecoder).await?;
//! let page = viewer.surface().to_page("Workbook");
//! # let _ = page;
//! # Ok(())
//! # }
//! ```

// Model
pub mod cell_ref;
pub mod color;
pub mod error;
pub mod merge;
pub mod types;

// Rendering
pub mod render;
pub mod schedule;
pub mod surface;
pub mod tabs;

// Orchestration
pub mod decode;
pub mod listener;
pub mod logging;
pub mod options;
pub mod source;
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use decode::{JsonDecoder, WorkbookDecoder};
pub use error::ViewerError;
pub use listener::{NoopListener, ViewerListener};
pub use options::ViewerOptions;
pub use schedule::{FrameScheduler, Immediate};
pub use source::WorkbookSource;
pub use surface::{HtmlDocument, ViewSurface};
pub use tabs::{RenderState, SheetInfo};
pub use types::*;
pub use viewer::{fetch_workbook, LoadOutcome, PendingBuild, Transition, Viewer};

#[cfg(target_arch = "wasm32")]
pub use viewer::web::{render_xlsx, SheetViewer};

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
