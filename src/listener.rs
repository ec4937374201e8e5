//! Viewer notifications (`onLoad`, `onRender`, `onSwitch`).

use std::rc::Rc;

use crate::tabs::SheetInfo;

/// Receives viewer lifecycle notifications. All methods default to no-ops.
pub trait ViewerListener {
    /// Once, with every sheet, after the workbook is decoded.
    fn on_load(&self, _sheets: &[SheetInfo]) {}

    /// Once per sheet, after its table has been fully built.
    fn on_render(&self, _sheet: &SheetInfo) {}

    /// When the active sheet changes.
    fn on_switch(&self, _sheet: &SheetInfo) {}
}

/// Listener that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl ViewerListener for NoopListener {}

impl<T: ViewerListener + ?Sized> ViewerListener for Rc<T> {
    fn on_load(&self, sheets: &[SheetInfo]) {
        (**self).on_load(sheets);
    }

    fn on_render(&self, sheet: &SheetInfo) {
        (**self).on_render(sheet);
    }

    fn on_switch(&self, sheet: &SheetInfo) {
        (**self).on_switch(sheet);
    }
}
