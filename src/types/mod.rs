//! Data types for the decoded workbook.
//!
//! These mirror the object graph produced by the external decoder. They are
//! read-only once loaded; per-sheet render state lives in [`crate::tabs`].

mod cell;
mod rich_text;
mod style;
mod workbook;

pub use cell::*;
pub use rich_text::*;
pub use style::*;
pub use workbook::*;
