//! Tests for the sheet tab controller: activation, lazy builds and switch
//! notifications.
#![cfg(not(target_arch = "wasm32"))]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod common;
mod fixtures;

use std::rc::Rc;

use common::{table_html, test_viewer, CountingScheduler, Event, FlakyDocument, RecordingListener};
use fixtures::WorkbookBuilder;
use xltable::tabs::{RenderState, SheetTabs};
use xltable::{Viewer, ViewerOptions};

fn three_sheets() -> SheetTabs {
    SheetTabs::new(WorkbookBuilder::new().numbered_sheets(3, 2, 2).build())
}

// ============================================================================
// CONTROLLER
// ============================================================================

#[test]
fn test_sheets_keep_decoder_order() {
    let tabs = three_sheets();
    let names: Vec<String> = tabs.infos().into_iter().map(|s| s.name).collect();
    assert_eq!(names, ["Sheet1", "Sheet2", "Sheet3"]);
    assert_eq!(tabs.get(2).unwrap().info().index, 2);
    assert_eq!(tabs.get(2).unwrap().info().id, 3);
}

#[test]
fn test_reactivating_active_sheet_is_a_no_op() {
    let mut tabs = three_sheets();
    tabs.activate(1).unwrap();
    let again = tabs.activate(1).unwrap();
    assert!(!again.switched);
    assert!(!again.build);
    assert_eq!(tabs.active(), Some(1));
}

#[test]
fn test_state_moves_forward_only() {
    let mut tabs = three_sheets();
    assert_eq!(tabs.get(0).unwrap().state(), RenderState::Unrendered);

    assert!(tabs.activate(0).unwrap().build);
    assert_eq!(tabs.get(0).unwrap().state(), RenderState::Rendering);

    tabs.activate(2);
    let back = tabs.activate(0).unwrap();
    assert!(back.switched);
    assert!(!back.build);
    assert_eq!(tabs.get(0).unwrap().state(), RenderState::Rendering);
}

#[test]
fn test_out_of_range_initial_index_falls_back_to_first() {
    let tabs = three_sheets();
    assert_eq!(tabs.initial_index(99), 0);
    assert_eq!(tabs.initial_index(3), 0);
    assert_eq!(tabs.initial_index(-1), 0);
    assert_eq!(tabs.initial_index(i64::MIN), 0);
    assert_eq!(tabs.initial_index(2), 2);
}

// ============================================================================
// VIEWER
// ============================================================================

#[tokio::test]
async fn test_initial_index_99_activates_first_sheet() {
    let (mut viewer, listener) = test_viewer(ViewerOptions::default().with_initial_sheet(99));
    let transition = viewer
        .install(WorkbookBuilder::new().numbered_sheets(3, 2, 2).build())
        .unwrap();
    let build = transition.notify(&*listener).unwrap();
    build.run(&*viewer.scheduler(), &*listener).await.unwrap();

    assert_eq!(viewer.active(), Some(0));
    assert_eq!(viewer.surface().active_tabs(), vec![0]);
    // The initial activation is not a switch
    assert_eq!(
        listener.events(),
        vec![
            Event::Load(vec!["Sheet1".into(), "Sheet2".into(), "Sheet3".into()]),
            Event::Render("Sheet1".into()),
        ]
    );
}

#[tokio::test]
async fn test_negative_initial_index_activates_first_sheet() {
    let options = ViewerOptions::from_json(r#"{"initialSheetIndex": -1}"#).unwrap();
    let (mut viewer, listener) = test_viewer(options);
    let transition = viewer
        .install(WorkbookBuilder::new().numbered_sheets(3, 2, 2).build())
        .unwrap();
    let build = transition.notify(&*listener).unwrap();
    build.run(&*viewer.scheduler(), &*listener).await.unwrap();

    assert_eq!(viewer.active(), Some(0));
    assert_eq!(viewer.surface().active_tabs(), vec![0]);
    assert_eq!(listener.renders(), ["Sheet1"]);
    assert!(listener.switches().is_empty());
}

#[tokio::test]
async fn test_switching_builds_once_and_notifies_on_change() {
    let (mut viewer, listener) = test_viewer(ViewerOptions::default());
    let transition = viewer
        .install(WorkbookBuilder::new().numbered_sheets(3, 2, 2).build())
        .unwrap();
    if let Some(build) = transition.notify(&*listener) {
        build.run(&*viewer.scheduler(), &*listener).await.unwrap();
    }

    assert!(viewer.activate(1).await.unwrap().is_some());
    assert!(viewer.activate(1).await.unwrap().is_none());
    assert!(viewer.activate(0).await.unwrap().is_none());
    assert!(viewer.activate(1).await.unwrap().is_none());

    assert_eq!(listener.switches(), ["Sheet2", "Sheet1", "Sheet2"]);
    assert_eq!(listener.renders(), ["Sheet1", "Sheet2"]);
    assert_eq!(viewer.surface().active_tabs(), vec![1]);
    assert!(table_html(&viewer, 1).contains("<td>1</td>"));
    assert!(table_html(&viewer, 2).is_empty());
}

#[tokio::test]
async fn test_missing_sheet_activation_is_ignored() {
    let (mut viewer, listener) = test_viewer(ViewerOptions::default());
    let _ = viewer
        .install(WorkbookBuilder::new().numbered_sheets(1, 1, 1).build())
        .unwrap()
        .notify(&*listener);

    assert!(viewer.activate(5).await.unwrap().is_none());
    assert_eq!(viewer.active(), Some(0));
    assert!(listener.switches().is_empty());
}

#[tokio::test]
async fn test_surface_failure_leaves_selection_untouched() {
    let listener = Rc::new(RecordingListener::default());
    let mut viewer = Viewer::new(
        FlakyDocument::default(),
        Rc::new(CountingScheduler::default()),
        Rc::clone(&listener),
        ViewerOptions::default(),
    )
    .unwrap();
    let build = viewer
        .install(WorkbookBuilder::new().numbered_sheets(2, 2, 2).build())
        .unwrap()
        .notify(&*listener)
        .unwrap();
    build.run(&*viewer.scheduler(), &*listener).await.unwrap();

    viewer.surface().fail_on.set(Some(1));
    assert!(viewer.select(1).is_err());
    assert_eq!(viewer.active(), Some(0));
    assert_eq!(viewer.surface().inner.active_tabs(), vec![0]);
    assert_eq!(viewer.tabs().get(1).unwrap().state(), RenderState::Unrendered);
    assert!(listener.switches().is_empty());

    // Once the surface recovers the sheet still gets its first build
    viewer.surface().fail_on.set(None);
    assert!(viewer.activate(1).await.unwrap().is_some());
    assert_eq!(viewer.surface().inner.active_tabs(), vec![1]);
    assert_eq!(listener.switches(), ["Sheet2"]);
    assert_eq!(listener.renders(), ["Sheet1", "Sheet2"]);
}
