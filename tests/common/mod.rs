//! Common test utilities and assertion helpers.
//!
//! This module provides recording collaborators (listener, scheduler, sink)
//! and viewer constructors shared by the integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_lossless
)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use xltable::error::{Result, ViewerError};
use xltable::render::{RowPresentation, TableHeader, TableSink};
use xltable::surface::HtmlPanel;
use xltable::{
    FrameScheduler, HtmlDocument, SheetInfo, ViewSurface, Viewer, ViewerListener, ViewerOptions,
};

// Re-export fixtures for convenience
pub use super::fixtures::*;

// ============================================================================
// Recording collaborators
// ============================================================================

/// Notification seen by [`RecordingListener`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Load(Vec<String>),
    Render(String),
    Switch(String),
}

/// Listener that records every notification in order.
#[derive(Debug, Default)]
pub struct RecordingListener {
    events: RefCell<Vec<Event>>,
}

impl RecordingListener {
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn renders(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Render(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn switches(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Switch(name) => Some(name),
                _ => None,
            })
            .collect()
    }
}

impl ViewerListener for RecordingListener {
    fn on_load(&self, sheets: &[SheetInfo]) {
        self.events
            .borrow_mut()
            .push(Event::Load(sheets.iter().map(|s| s.name.clone()).collect()));
    }

    fn on_render(&self, sheet: &SheetInfo) {
        self.events
            .borrow_mut()
            .push(Event::Render(sheet.name.clone()));
    }

    fn on_switch(&self, sheet: &SheetInfo) {
        self.events
            .borrow_mut()
            .push(Event::Switch(sheet.name.clone()));
    }
}

/// Scheduler that counts the turns it was asked for.
#[derive(Debug, Default)]
pub struct CountingScheduler {
    turns: Cell<usize>,
}

impl CountingScheduler {
    pub fn turns(&self) -> usize {
        self.turns.get()
    }
}

impl FrameScheduler for CountingScheduler {
    async fn next_frame(&self) {
        self.turns.set(self.turns.get() + 1);
    }
}

/// Sink that records the row numbers of every batch.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub header: Option<TableHeader>,
    pub batches: Vec<Vec<u32>>,
    pub rows: Vec<RowPresentation>,
    pub finished: bool,
    /// Fail when asked to append this batch (0-based).
    pub fail_on_batch: Option<usize>,
}

impl RecordingSink {
    pub fn failing_on(batch: usize) -> Self {
        Self {
            fail_on_batch: Some(batch),
            ..Self::default()
        }
    }

    pub fn row_numbers(&self) -> Vec<u32> {
        self.batches.iter().flatten().copied().collect()
    }
}

impl TableSink for RecordingSink {
    fn write_header(&mut self, header: &TableHeader) -> Result<()> {
        self.header = Some(header.clone());
        Ok(())
    }

    fn append_rows(&mut self, rows: &[RowPresentation]) -> Result<()> {
        if self.fail_on_batch == Some(self.batches.len()) {
            return Err(ViewerError::Surface("panel detached".to_string()));
        }
        self.batches.push(rows.iter().map(|r| r.number).collect());
        self.rows.extend_from_slice(rows);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

// ============================================================================
// Surfaces
// ============================================================================

/// HTML document that reports itself as a legacy browser engine.
#[derive(Debug, Default)]
pub struct LegacyDocument(pub HtmlDocument);

impl ViewSurface for LegacyDocument {
    type Panel = HtmlPanel;

    fn is_legacy_host(&self) -> bool {
        true
    }

    fn mount(&mut self) -> Result<()> {
        self.0.mount()
    }

    fn set_tip(&mut self, text: &str) -> Result<()> {
        self.0.set_tip(text)
    }

    fn hide_tip(&mut self) -> Result<()> {
        self.0.hide_tip()
    }

    fn add_sheet(&mut self, sheet: &SheetInfo) -> Result<HtmlPanel> {
        self.0.add_sheet(sheet)
    }

    fn set_active(&mut self, index: usize, active: bool) -> Result<()> {
        self.0.set_active(index, active)
    }
}

/// HTML document whose panel at `fail_on` refuses to become active.
#[derive(Debug, Default)]
pub struct FlakyDocument {
    pub inner: HtmlDocument,
    pub fail_on: Cell<Option<usize>>,
}

impl ViewSurface for FlakyDocument {
    type Panel = HtmlPanel;

    fn mount(&mut self) -> Result<()> {
        self.inner.mount()
    }

    fn set_tip(&mut self, text: &str) -> Result<()> {
        self.inner.set_tip(text)
    }

    fn hide_tip(&mut self) -> Result<()> {
        self.inner.hide_tip()
    }

    fn add_sheet(&mut self, sheet: &SheetInfo) -> Result<HtmlPanel> {
        self.inner.add_sheet(sheet)
    }

    fn set_active(&mut self, index: usize, active: bool) -> Result<()> {
        if active && self.fail_on.get() == Some(index) {
            return Err(ViewerError::Surface(format!("panel {index} detached")));
        }
        self.inner.set_active(index, active)
    }
}

// ============================================================================
// Viewer helpers
// ============================================================================

pub type TestViewer = Viewer<HtmlDocument, CountingScheduler, RecordingListener>;

/// Viewer over an HTML document with recording collaborators.
pub fn test_viewer(options: ViewerOptions) -> (TestViewer, Rc<RecordingListener>) {
    let listener = Rc::new(RecordingListener::default());
    let viewer = Viewer::new(
        HtmlDocument::new(),
        Rc::new(CountingScheduler::default()),
        Rc::clone(&listener),
        options,
    )
    .expect("valid options");
    (viewer, listener)
}

/// Count non-overlapping occurrences of `needle`.
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// Markup of one sheet's table panel.
pub fn table_html(viewer: &TestViewer, index: usize) -> String {
    viewer
        .surface()
        .panel(index)
        .expect("panel exists")
        .table_html()
}
