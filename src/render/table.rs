//! Chunked table builder.
//!
//! The header row is written at once; body rows are appended in batches of
//! `chunk_size`, yielding to the host scheduler before each batch so a long
//! sheet never blocks a paint.

use super::row::RowPresentation;
use crate::error::Result;
use crate::listener::ViewerListener;
use crate::schedule::{for_each_chunk, FrameScheduler};
use crate::tabs::SheetEntry;
use crate::types::{column_label, Column};

/// Rows appended per scheduling turn unless configured otherwise.
pub const DEFAULT_CHUNK_SIZE: usize = 500;
/// Width of the leading row-number gutter column (CSS px).
pub const GUTTER_WIDTH_PX: f64 = 50.0;
/// Column width unit: a stored width of `w` is `w / 0.125` px.
pub const COLUMN_WIDTH_UNIT: f64 = 0.125;
/// Width used for columns without a positive width (CSS px).
pub const DEFAULT_COLUMN_WIDTH_PX: f64 = 100.0;

/// One header cell: column letter and pixel width.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub label: String,
    pub width_px: f64,
}

/// Header row of a sheet table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableHeader {
    pub columns: Vec<HeaderCell>,
    /// Gutter plus every column width.
    pub width_px: f64,
}

impl TableHeader {
    pub fn from_columns(columns: &[Column]) -> Self {
        let columns: Vec<HeaderCell> = columns
            .iter()
            .enumerate()
            .map(|(i, column)| HeaderCell {
                label: column_label(i),
                width_px: column_width_px(column),
            })
            .collect();
        let width_px = columns.iter().map(|c| c.width_px).sum::<f64>() + GUTTER_WIDTH_PX;
        Self { columns, width_px }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Pixel width of a column.
pub fn column_width_px(column: &Column) -> f64 {
    match column.width {
        Some(width) if width > 0.0 => width / COLUMN_WIDTH_UNIT,
        _ => DEFAULT_COLUMN_WIDTH_PX,
    }
}

/// Destination of a table build: one sheet's table panel.
pub trait TableSink {
    /// Write the header row. Called once, before any body rows.
    fn write_header(&mut self, header: &TableHeader) -> Result<()>;

    /// Append one batch of body rows, in order.
    fn append_rows(&mut self, rows: &[RowPresentation]) -> Result<()>;

    /// Called after the last batch.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Outcome of a completed build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildReport {
    /// Scheduling turns used (one per batch).
    pub batches: usize,
    pub rows: usize,
}

/// Materializes row presentations into a [`TableSink`] in bounded batches.
#[derive(Debug, Clone, Copy)]
pub struct ChunkedTableBuilder {
    chunk_size: usize,
}

impl Default for ChunkedTableBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl ChunkedTableBuilder {
    /// A zero chunk size is treated as 1.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Build the table for `entry`.
    ///
    /// On success the sheet is marked rendered and `on_render` fires once.
    /// A sink error stops the build where it is: already appended rows stay,
    /// later batches are never scheduled and the sheet is not marked rendered.
    pub async fn build<I, K, S, L>(
        &self,
        entry: &SheetEntry,
        header: &TableHeader,
        rows: I,
        sink: &mut K,
        scheduler: &S,
        listener: &L,
    ) -> Result<BuildReport>
    where
        I: IntoIterator<Item = RowPresentation>,
        K: TableSink + ?Sized,
        S: FrameScheduler,
        L: ViewerListener + ?Sized,
    {
        log::debug!(
            "building sheet `{}` in chunks of {}",
            entry.info().name,
            self.chunk_size
        );
        if !header.is_empty() {
            sink.write_header(header)?;
        }

        let mut appended = 0;
        let batches = for_each_chunk(rows, self.chunk_size, scheduler, |_, batch| {
            appended += batch.len();
            sink.append_rows(&batch)
        })
        .await?;
        sink.finish()?;
        let report = BuildReport {
            batches,
            rows: appended,
        };

        entry.mark_rendered();
        log::debug!(
            "sheet `{}` rendered: {} rows in {} batches",
            entry.info().name,
            report.rows,
            report.batches
        );
        listener.on_render(entry.info());
        Ok(report)
    }
}
