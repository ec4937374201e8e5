//! Viewer orchestration.
//!
//! Ties the input boundary, the decoder, the tab controller and a surface
//! together. State changes happen synchronously in [`Viewer`]; the
//! notifications and table builds they cause are handed back as a
//! [`Transition`] so callers holding the viewer in a `RefCell` can release
//! the borrow before running them.

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::rc::Rc;

use crate::decode::WorkbookDecoder;
use crate::error::{Result, ViewerError};
use crate::listener::ViewerListener;
use crate::options::ViewerOptions;
use crate::render::{render_rows, BuildReport, ChunkedTableBuilder, TableHeader, TableSink};
use crate::schedule::FrameScheduler;
use crate::source::WorkbookSource;
use crate::surface::{load_error_tip, ViewSurface, INCOMPATIBLE_TIP};
use crate::tabs::{SheetHandle, SheetInfo, SheetTabs};
use crate::types::Workbook;

/// Read `source` and decode it.
pub async fn fetch_workbook<D>(source: WorkbookSource, decoder: &D) -> Result<Workbook>
where
    D: WorkbookDecoder + ?Sized,
{
    let bytes = source.into_bytes().await?;
    log::debug!("decoding {} bytes", bytes.len());
    decoder.decode(&bytes).await
}

/// A table build waiting to run: one sheet and its panel.
#[derive(Debug)]
pub struct PendingBuild<P> {
    entry: SheetHandle,
    panel: P,
    chunk_size: usize,
}

impl<P: TableSink> PendingBuild<P> {
    pub fn sheet(&self) -> &SheetInfo {
        self.entry.info()
    }

    /// Build the sheet's table, yielding to `scheduler` between batches.
    pub async fn run<S, L>(self, scheduler: &S, listener: &L) -> Result<BuildReport>
    where
        S: FrameScheduler,
        L: ViewerListener + ?Sized,
    {
        let Self {
            entry,
            mut panel,
            chunk_size,
        } = self;
        let sheet = entry.sheet();
        let header = TableHeader::from_columns(&sheet.columns);
        let rows = render_rows(sheet, entry.merges());
        ChunkedTableBuilder::new(chunk_size)
            .build(&entry, &header, rows, &mut panel, scheduler, listener)
            .await
    }
}

/// Notifications and work produced by a state change.
#[derive(Debug)]
pub struct Transition<P> {
    /// Every sheet, after a workbook was installed.
    pub loaded: Option<Vec<SheetInfo>>,
    /// The newly active sheet, when the active sheet changed.
    pub switched: Option<SheetInfo>,
    pub build: Option<PendingBuild<P>>,
}

impl<P> Default for Transition<P> {
    fn default() -> Self {
        Self {
            loaded: None,
            switched: None,
            build: None,
        }
    }
}

impl<P> Transition<P> {
    /// Raise the notifications and hand back the build, if any.
    pub fn notify<L: ViewerListener + ?Sized>(self, listener: &L) -> Option<PendingBuild<P>> {
        if let Some(sheets) = &self.loaded {
            listener.on_load(sheets);
        }
        if let Some(sheet) = &self.switched {
            listener.on_switch(sheet);
        }
        self.build
    }
}

/// Result of [`Viewer::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The workbook was installed and the initial sheet built.
    Loaded { sheets: usize },
    /// The host is a legacy engine; nothing was loaded.
    Incompatible,
    /// Reading or decoding failed; the tip shows the error.
    Failed(String),
}

/// Workbook viewer over a surface `V`.
pub struct Viewer<V: ViewSurface, S, L: ?Sized> {
    surface: V,
    scheduler: Rc<S>,
    listener: Rc<L>,
    options: ViewerOptions,
    tabs: SheetTabs,
    panels: Vec<V::Panel>,
}

impl<V, S, L> Viewer<V, S, L>
where
    V: ViewSurface,
    S: FrameScheduler,
    L: ViewerListener + ?Sized,
{
    /// Validates `options` before touching the surface.
    pub fn new(
        surface: V,
        scheduler: Rc<S>,
        listener: Rc<L>,
        options: ViewerOptions,
    ) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            surface,
            scheduler,
            listener,
            options,
            tabs: SheetTabs::default(),
            panels: Vec::new(),
        })
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    pub fn into_surface(self) -> V {
        self.surface
    }

    pub fn scheduler(&self) -> Rc<S> {
        Rc::clone(&self.scheduler)
    }

    pub fn listener(&self) -> Rc<L> {
        Rc::clone(&self.listener)
    }

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    pub fn tabs(&self) -> &SheetTabs {
        &self.tabs
    }

    pub fn active(&self) -> Option<usize> {
        self.tabs.active()
    }

    /// Mount the surface. Returns false, leaving the incompatibility tip, on
    /// a legacy host.
    pub fn begin(&mut self) -> Result<bool> {
        self.surface.mount()?;
        if self.surface.is_legacy_host() {
            log::warn!("legacy browser engine detected, viewer disabled");
            self.surface.set_tip(INCOMPATIBLE_TIP)?;
            return Ok(false);
        }
        Ok(true)
    }

    /// Show a read or decode failure in the tip area.
    pub fn report_load_error(&mut self, error: &ViewerError) -> Result<()> {
        log::error!("[xltable] load error: {error}");
        self.surface.set_tip(&load_error_tip(error))
    }

    /// Add a tab/panel pair per sheet, hide the tip and activate the
    /// initial sheet.
    pub fn install(&mut self, workbook: Workbook) -> Result<Transition<V::Panel>> {
        self.tabs = SheetTabs::new(workbook);
        self.panels = self
            .tabs
            .sheets()
            .iter()
            .map(|entry| self.surface.add_sheet(entry.info()))
            .collect::<Result<_>>()?;
        self.surface.hide_tip()?;
        log::debug!("workbook installed with {} sheets", self.tabs.len());

        let loaded = Some(self.tabs.infos());
        if self.tabs.is_empty() {
            return Ok(Transition {
                loaded,
                ..Transition::default()
            });
        }
        let initial = self.tabs.initial_index(self.options.initial_sheet_index);
        let mut transition = self.select(initial)?;
        transition.loaded = loaded;
        Ok(transition)
    }

    /// Make `index` the active sheet.
    ///
    /// Out-of-range indices and re-selecting the active sheet change nothing.
    /// The surface is updated first; if it fails, the previous pair is
    /// restored and neither the active pointer nor any render state moves.
    pub fn select(&mut self, index: usize) -> Result<Transition<V::Panel>> {
        if self.tabs.get(index).is_none() {
            log::warn!("ignoring activation of missing sheet {index}");
            return Ok(Transition::default());
        }
        let previous = self.tabs.active();
        if previous == Some(index) {
            return Ok(Transition::default());
        }
        self.show(previous, index)?;

        let Some(activation) = self.tabs.activate(index) else {
            return Ok(Transition::default());
        };

        let switched = if activation.switched {
            self.tabs.get(index).map(|entry| entry.info().clone())
        } else {
            None
        };
        if let Some(sheet) = &switched {
            log::debug!("switched to sheet `{}`", sheet.name);
        }
        Ok(Transition {
            loaded: None,
            switched,
            build: if activation.build {
                self.pending(index)
            } else {
                None
            },
        })
    }

    /// Move the active class from `previous` to `index`.
    fn show(&mut self, previous: Option<usize>, index: usize) -> Result<()> {
        if let Some(previous) = previous {
            self.surface.set_active(previous, false)?;
        }
        if let Err(error) = self.surface.set_active(index, true) {
            log::error!("activating sheet {index} failed: {error}");
            if let Some(previous) = previous {
                let _ = self.surface.set_active(previous, true);
            }
            return Err(error);
        }
        Ok(())
    }

    /// Start the build of a sheet that was never activated, without
    /// activating it.
    pub fn prebuild(&self, index: usize) -> Option<PendingBuild<V::Panel>> {
        let entry = self.tabs.get(index)?;
        if entry.begin_render() {
            self.pending(index)
        } else {
            None
        }
    }

    fn pending(&self, index: usize) -> Option<PendingBuild<V::Panel>> {
        Some(PendingBuild {
            entry: Rc::clone(self.tabs.get(index)?),
            panel: self.panels.get(index)?.clone(),
            chunk_size: self.options.chunk_size,
        })
    }

    /// Read, decode and install a workbook, then build the initial sheet.
    ///
    /// Read and decode failures are shown in the tip and reported as
    /// [`LoadOutcome::Failed`]; surface failures are returned as errors.
    pub async fn open<D>(&mut self, source: WorkbookSource, decoder: &D) -> Result<LoadOutcome>
    where
        D: WorkbookDecoder + ?Sized,
    {
        if !self.begin()? {
            return Ok(LoadOutcome::Incompatible);
        }
        let workbook = match fetch_workbook(source, decoder).await {
            Ok(workbook) => workbook,
            Err(error) => {
                self.report_load_error(&error)?;
                return Ok(LoadOutcome::Failed(error.to_string()));
            }
        };
        let transition = self.install(workbook)?;
        self.run(transition).await?;
        Ok(LoadOutcome::Loaded {
            sheets: self.tabs.len(),
        })
    }

    /// Activate a sheet and, if it was never shown, build its table.
    pub async fn activate(&mut self, index: usize) -> Result<Option<BuildReport>> {
        let transition = self.select(index)?;
        self.run(transition).await
    }

    async fn run(&self, transition: Transition<V::Panel>) -> Result<Option<BuildReport>> {
        let listener = self.listener();
        match transition.notify(&*listener) {
            Some(build) => Ok(Some(build.run(&*self.scheduler, &*listener).await?)),
            None => Ok(None),
        }
    }
}
