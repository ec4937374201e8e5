//! Sheet tab controller.
//!
//! Owns the sheet list, each sheet's render state and the active-sheet
//! pointer. Per sheet the state only moves forward:
//! `Unrendered` → `Rendering` (first activation) → `Rendered` (build done).

use serde::Serialize;
use std::cell::Cell;
use std::rc::Rc;

use crate::merge::MergeIndex;
use crate::types::{Sheet, Workbook};

/// Render state of one sheet's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderState {
    #[default]
    Unrendered,
    Rendering,
    Rendered,
}

/// Identity of a sheet as reported to listeners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetInfo {
    /// Position in decoder order (0-based)
    pub index: usize,
    /// Decoder-assigned id
    pub id: u32,
    pub name: String,
}

/// A sheet together with its merge index and render state.
#[derive(Debug)]
pub struct SheetEntry {
    info: SheetInfo,
    sheet: Sheet,
    merges: MergeIndex,
    state: Cell<RenderState>,
}

impl SheetEntry {
    pub fn new(index: usize, sheet: Sheet) -> Self {
        let merges = MergeIndex::build(&sheet.rows);
        Self {
            info: SheetInfo {
                index,
                id: sheet.id,
                name: sheet.name.clone(),
            },
            sheet,
            merges,
            state: Cell::new(RenderState::Unrendered),
        }
    }

    pub fn info(&self) -> &SheetInfo {
        &self.info
    }

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    pub fn merges(&self) -> &MergeIndex {
        &self.merges
    }

    pub fn state(&self) -> RenderState {
        self.state.get()
    }

    pub fn is_rendered(&self) -> bool {
        self.state.get() == RenderState::Rendered
    }

    /// Move `Unrendered` → `Rendering`. Returns false if a build already started.
    pub(crate) fn begin_render(&self) -> bool {
        if self.state.get() == RenderState::Unrendered {
            self.state.set(RenderState::Rendering);
            true
        } else {
            false
        }
    }

    pub(crate) fn mark_rendered(&self) {
        self.state.set(RenderState::Rendered);
    }
}

/// Shared handle to a sheet entry; builds hold one while they run.
pub type SheetHandle = Rc<SheetEntry>;

/// Result of activating a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    pub index: usize,
    /// Previously active sheet, if any.
    pub previous: Option<usize>,
    /// The active sheet identity changed (raise a switch notification).
    pub switched: bool,
    /// The sheet was unrendered and must be built now.
    pub build: bool,
}

/// Sheet list plus active-sheet pointer.
#[derive(Debug, Default)]
pub struct SheetTabs {
    sheets: Vec<SheetHandle>,
    active: Option<usize>,
}

impl SheetTabs {
    /// Take ownership of a decoded workbook. No sheet is active yet.
    pub fn new(mut workbook: Workbook) -> Self {
        workbook.normalize();
        let sheets = workbook
            .sheets
            .into_iter()
            .enumerate()
            .map(|(i, sheet)| Rc::new(SheetEntry::new(i, sheet)))
            .collect();
        Self {
            sheets,
            active: None,
        }
    }

    /// Requested initial index, or the first sheet when negative or out of
    /// range.
    pub fn initial_index(&self, requested: i64) -> usize {
        usize::try_from(requested)
            .ok()
            .filter(|&index| index < self.sheets.len())
            .unwrap_or(0)
    }

    /// Make `index` the active sheet.
    ///
    /// Returns `None` for an index outside the sheet list. Re-activating the
    /// active sheet reports neither a switch nor a build. Activating the
    /// first sheet ever (nothing active before) is not a switch.
    pub fn activate(&mut self, index: usize) -> Option<Activation> {
        let entry = self.sheets.get(index)?;
        let previous = self.active;
        if previous == Some(index) {
            return Some(Activation {
                index,
                previous,
                switched: false,
                build: false,
            });
        }
        self.active = Some(index);
        Some(Activation {
            index,
            previous,
            switched: previous.is_some(),
            build: entry.begin_render(),
        })
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_sheet(&self) -> Option<&SheetHandle> {
        self.active.and_then(|i| self.sheets.get(i))
    }

    pub fn get(&self, index: usize) -> Option<&SheetHandle> {
        self.sheets.get(index)
    }

    pub fn sheets(&self) -> &[SheetHandle] {
        &self.sheets
    }

    pub fn infos(&self) -> Vec<SheetInfo> {
        self.sheets.iter().map(|s| s.info().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
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

    fn tabs(n: u32) -> SheetTabs {
        SheetTabs::new(Workbook {
            sheets: (1..=n).map(|i| Sheet::new(i, format!("Sheet{i}"))).collect(),
        })
    }

    #[test]
    fn test_first_activation_builds_without_switch() {
        let mut tabs = tabs(2);
        let activation = tabs.activate(0).unwrap();
        assert!(activation.build);
        assert!(!activation.switched);
        assert_eq!(tabs.get(0).unwrap().state(), RenderState::Rendering);
    }

    #[test]
    fn test_returning_to_a_sheet_mid_build_does_not_rebuild() {
        let mut tabs = tabs(2);
        tabs.activate(0);
        tabs.activate(1);
        let back = tabs.activate(0).unwrap();
        assert!(back.switched);
        assert!(!back.build);
    }

    #[test]
    fn test_out_of_range_activation_is_ignored() {
        let mut tabs = tabs(1);
        assert_eq!(tabs.activate(5), None);
        assert_eq!(tabs.active(), None);
    }
}
