//! Browser tests for the DOM surface.
//!
//! Run with: wasm-pack test --headless --firefox
#![cfg(target_arch = "wasm32")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod common;
mod fixtures;

use std::rc::Rc;

use common::{CountingScheduler, RecordingListener};
use fixtures::{SheetBuilder, WorkbookBuilder};
use wasm_bindgen_test::*;
use xltable::surface::DomSurface;
use xltable::{ViewSurface, Viewer, ViewerOptions};

wasm_bindgen_test_configure!(run_in_browser);

fn host() -> web_sys::Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let host = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&host).unwrap();
    host
}

#[wasm_bindgen_test]
fn test_mount_builds_container_with_loading_tip() {
    let host = host();
    let mut surface = DomSurface::new(host.clone()).unwrap();
    surface.mount().unwrap();

    let tip = host.query_selector(".xlsx-viewer-tip").unwrap().unwrap();
    assert_eq!(tip.text_content().as_deref(), Some("Loading..."));
    assert!(host.query_selector(".xlsx-viewer-sheet").unwrap().is_some());
    assert!(host.query_selector(".xlsx-viewer-table").unwrap().is_some());
}

#[wasm_bindgen_test]
async fn test_merged_cell_in_dom() {
    let host = host();
    let listener = Rc::new(RecordingListener::default());
    let mut viewer = Viewer::new(
        DomSurface::new(host.clone()).unwrap(),
        Rc::new(CountingScheduler::default()),
        Rc::clone(&listener),
        ViewerOptions::default(),
    )
    .unwrap();
    let workbook = WorkbookBuilder::new()
        .sheet(
            SheetBuilder::new("Merged")
                .columns(2)
                .cell("A1", "big", None)
                .merge("A1:B2"),
        )
        .build();

    assert!(viewer.begin().unwrap());
    let transition = viewer.install(workbook).unwrap();
    let build = transition.notify(&*listener).unwrap();
    build.run(&*viewer.scheduler(), &*listener).await.unwrap();

    let td = host
        .query_selector("td[colspan=\"2\"][rowspan=\"2\"]")
        .unwrap()
        .unwrap();
    assert_eq!(td.text_content().as_deref(), Some("big"));
    let active = host
        .query_selector(".xlsx-viewer-sheet-content.active")
        .unwrap()
        .unwrap();
    assert_eq!(active.text_content().as_deref(), Some("Merged"));
    assert_eq!(listener.renders(), ["Merged"]);
}
