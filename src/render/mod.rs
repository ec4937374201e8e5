//! Table rendering.
//!
//! This module provides:
//! - Style and content resolution for single cells
//! - The merge-aware row renderer
//! - The chunked table builder and its sink trait
//! - HTML serialization of the resulting presentations

pub mod content;
pub mod html;
pub mod row;
pub mod style;
pub mod table;

// Re-export commonly used types
pub use content::{format_date, format_number, resolve_content, Content, LinkRun, TextRun};
pub use row::{render_rows, CellPresentation, RowPresentation, RowRenderer};
pub use style::{ResolvedFont, ResolvedStyle};
pub use table::{
    column_width_px, BuildReport, ChunkedTableBuilder, HeaderCell, TableHeader, TableSink,
    DEFAULT_CHUNK_SIZE,
};
