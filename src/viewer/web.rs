//! Browser entry point: `renderXlsx(data, target, decode, options)`.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use super::{fetch_workbook, PendingBuild, Transition, Viewer};
use crate::decode::JsDecoder;
use crate::error::{Result, ViewerError};
use crate::listener::ViewerListener;
use crate::options::ViewerOptions;
use crate::schedule::AnimationFrame;
use crate::source::WorkbookSource;
use crate::surface::{DomPanel, DomSurface};
use crate::tabs::SheetInfo;

type WebViewer = Viewer<DomSurface, AnimationFrame, JsListener>;
type Shared = Rc<RefCell<WebViewer>>;

/// `onLoad` / `onRender` / `onSwitch` host callbacks.
#[derive(Debug, Default)]
pub struct JsListener {
    on_load: Option<Function>,
    on_render: Option<Function>,
    on_switch: Option<Function>,
}

impl JsListener {
    fn call<T: serde::Serialize + ?Sized>(callback: Option<&Function>, name: &str, arg: &T) {
        let Some(callback) = callback else {
            return;
        };
        let result = serde_wasm_bindgen::to_value(arg)
            .map_err(JsValue::from)
            .and_then(|value| callback.call1(&JsValue::NULL, &value));
        if let Err(err) = result {
            log::error!("{name} callback failed: {err:?}");
        }
    }
}

impl ViewerListener for JsListener {
    fn on_load(&self, sheets: &[SheetInfo]) {
        Self::call(self.on_load.as_ref(), "onLoad", sheets);
    }

    fn on_render(&self, sheet: &SheetInfo) {
        Self::call(self.on_render.as_ref(), "onRender", sheet);
    }

    fn on_switch(&self, sheet: &SheetInfo) {
        Self::call(self.on_switch.as_ref(), "onSwitch", sheet);
    }
}

/// Type-check the options object field by field.
fn read_options(value: &JsValue) -> Result<(ViewerOptions, JsListener)> {
    let mut options = ViewerOptions::default();
    if value.is_undefined() || value.is_null() {
        return Ok((options, JsListener::default()));
    }
    if !value.is_object() {
        return Err(ViewerError::InvalidOption {
            name: "options",
            expected: "an object",
        });
    }
    if let Some(index) = read_integer(value, "initialSheetIndex", "an integer")? {
        options.initial_sheet_index = index;
    }
    if let Some(size) = read_integer(value, "frameRenderSize", "a positive integer")? {
        options.chunk_size = size;
    }
    if let Some(size) = read_integer(value, "chunkSize", "a positive integer")? {
        options.chunk_size = size;
    }
    let listener = JsListener {
        on_load: read_function(value, "onLoad")?,
        on_render: read_function(value, "onRender")?,
        on_switch: read_function(value, "onSwitch")?,
    };
    Ok((options, listener))
}

fn read_field(object: &JsValue, name: &str) -> Result<Option<JsValue>> {
    let value = Reflect::get(object, &JsValue::from_str(name))?;
    Ok((!value.is_undefined()).then_some(value))
}

/// Integral number field; fractions, strings and out-of-range values fail.
fn read_integer<T: serde::de::DeserializeOwned>(
    object: &JsValue,
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>> {
    read_field(object, name)?
        .map(|value| {
            serde_wasm_bindgen::from_value::<T>(value)
                .map_err(|_| ViewerError::InvalidOption { name, expected })
        })
        .transpose()
}

fn read_function(object: &JsValue, name: &'static str) -> Result<Option<Function>> {
    read_field(object, name)?
        .map(|value| {
            value.dyn_into::<Function>().map_err(|_| ViewerError::InvalidOption {
                name,
                expected: "a function",
            })
        })
        .transpose()
}

/// Handle returned to the page.
#[wasm_bindgen]
pub struct SheetViewer {
    inner: Shared,
}

#[wasm_bindgen]
impl SheetViewer {
    /// Index of the active sheet, if a workbook is loaded.
    #[wasm_bindgen(getter, js_name = activeSheet)]
    pub fn active_sheet(&self) -> Option<usize> {
        self.inner.try_borrow().ok().and_then(|v| v.active())
    }

    #[wasm_bindgen(getter, js_name = sheetCount)]
    pub fn sheet_count(&self) -> usize {
        self.inner.try_borrow().map_or(0, |v| v.tabs().len())
    }

    /// Activate a sheet as if its tab was clicked.
    pub fn activate(&self, index: usize) -> std::result::Result<(), JsValue> {
        select(&self.inner, index)?;
        Ok(())
    }
}

/// Render a workbook into `target`.
///
/// `data` is an `ArrayBuffer`, `Uint8Array`, `Blob` or `File`; `decode`
/// turns its bytes into the workbook object (optionally via a `Promise`).
/// Input, target and option errors reject before the page is touched. Decode
/// errors are shown in the viewer instead.
#[wasm_bindgen(js_name = renderXlsx)]
pub async fn render_xlsx(
    data: JsValue,
    target: JsValue,
    decode: Function,
    options: JsValue,
) -> std::result::Result<SheetViewer, JsValue> {
    console_error_panic_hook::set_once();
    crate::logging::init(log::LevelFilter::Info);

    let source = WorkbookSource::from_js(&data)?;
    let target = target
        .dyn_into::<Element>()
        .map_err(|value| ViewerError::InvalidTarget(format!("{value:?}")))?;
    let (options, listener) = read_options(&options)?;
    let surface = DomSurface::new(target)?;
    let viewer = Viewer::new(surface, Rc::new(AnimationFrame), Rc::new(listener), options)?;
    let inner: Shared = Rc::new(RefCell::new(viewer));
    let handle = SheetViewer {
        inner: Rc::clone(&inner),
    };

    if !inner.borrow_mut().begin()? {
        return Ok(handle);
    }
    let workbook = match fetch_workbook(source, &JsDecoder::new(decode)).await {
        Ok(workbook) => workbook,
        Err(error) => {
            inner.borrow_mut().report_load_error(&error)?;
            return Ok(handle);
        }
    };
    let transition = inner.borrow_mut().install(workbook)?;
    wire_tabs(&inner)?;
    dispatch(&inner, transition);
    Ok(handle)
}

/// Click on tab `i` selects sheet `i`.
fn wire_tabs(inner: &Shared) -> Result<()> {
    let tabs: Vec<Element> = {
        let viewer = inner.borrow();
        (0..viewer.tabs().len())
            .filter_map(|i| viewer.surface().tab(i).cloned())
            .collect()
    };
    for (index, tab) in tabs.into_iter().enumerate() {
        let inner = Rc::clone(inner);
        let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            if let Err(err) = select(&inner, index) {
                log::error!("sheet activation failed: {err}");
            }
        });
        tab.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        // Lives as long as the tab element.
        on_click.forget();
    }
    Ok(())
}

fn select(inner: &Shared, index: usize) -> Result<()> {
    let transition = inner
        .try_borrow_mut()
        .map_err(|_| ViewerError::Surface("viewer is busy".to_string()))?
        .select(index)?;
    dispatch(inner, transition);
    Ok(())
}

/// Raise notifications with the viewer released, then spawn the build.
fn dispatch(inner: &Shared, transition: Transition<DomPanel>) {
    let listener = inner.borrow().listener();
    if let Some(build) = transition.notify(&*listener) {
        spawn_build(inner, build, listener);
    }
}

fn spawn_build(inner: &Shared, build: PendingBuild<DomPanel>, listener: Rc<JsListener>) {
    let scheduler = inner.borrow().scheduler();
    wasm_bindgen_futures::spawn_local(async move {
        let name = build.sheet().name.clone();
        if let Err(err) = build.run(&*scheduler, &*listener).await {
            log::error!("building sheet `{name}` failed: {err}");
        }
    });
}
