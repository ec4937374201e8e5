//! Browser DOM surface built on web-sys.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use super::{
    is_legacy_engine, ViewSurface, ACTIVE_CLASS, CONTAINER_CLASS, LOADING_TIP, SHEET_STRIP_CLASS,
    SHEET_TAB_CLASS, TABLE_AREA_CLASS, TABLE_PANEL_CLASS, TIP_CLASS,
};
use crate::error::{Result, ViewerError};
use crate::render::html::{body_rows, header_row};
use crate::render::style::px;
use crate::render::{RowPresentation, TableHeader, TableSink};
use crate::tabs::SheetInfo;

/// Table panel of one sheet. The `<table>` is attached on the first write.
#[derive(Debug, Clone)]
pub struct DomPanel {
    panel: Element,
    table: Element,
    head: Element,
    body: Element,
}

impl DomPanel {
    fn new(document: &Document, panel: Element) -> Result<Self> {
        let table = document.create_element("table")?;
        let head = document.create_element("thead")?;
        let body = document.create_element("tbody")?;
        table.append_child(&head)?;
        table.append_child(&body)?;
        Ok(Self {
            panel,
            table,
            head,
            body,
        })
    }

    fn attach(&self) -> Result<()> {
        if self.table.parent_node().is_none() {
            self.panel.append_child(&self.table)?;
        }
        Ok(())
    }
}

impl TableSink for DomPanel {
    fn write_header(&mut self, header: &TableHeader) -> Result<()> {
        self.attach()?;
        self.table
            .set_attribute("style", &format!("width: {}", px(header.width_px)))?;
        self.head
            .insert_adjacent_html("beforeend", &header_row(header))?;
        Ok(())
    }

    fn append_rows(&mut self, rows: &[RowPresentation]) -> Result<()> {
        self.attach()?;
        self.body.insert_adjacent_html("beforeend", &body_rows(rows))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.attach()
    }
}

#[derive(Debug, Clone)]
struct Mounted {
    container: Element,
    tip: Element,
    strip: Element,
    area: Element,
}

/// Viewer container appended to a host element.
#[derive(Debug)]
pub struct DomSurface {
    document: Document,
    target: Element,
    mounted: Option<Mounted>,
    tabs: Vec<Element>,
    panels: Vec<Element>,
}

impl DomSurface {
    pub fn new(target: Element) -> Result<Self> {
        let document = target
            .owner_document()
            .ok_or_else(|| ViewerError::InvalidTarget("detached element".to_string()))?;
        Ok(Self {
            document,
            target,
            mounted: None,
            tabs: Vec::new(),
            panels: Vec::new(),
        })
    }

    /// Tab element at `index`, for wiring click handlers.
    pub fn tab(&self, index: usize) -> Option<&Element> {
        self.tabs.get(index)
    }

    /// The container, once mounted.
    pub fn container(&self) -> Option<&Element> {
        self.mounted.as_ref().map(|m| &m.container)
    }

    fn div(&self, class: &str) -> Result<Element> {
        let element = self.document.create_element("div")?;
        element.class_list().add_1(class)?;
        Ok(element)
    }

    fn mounted(&self) -> Result<&Mounted> {
        self.mounted
            .as_ref()
            .ok_or_else(|| ViewerError::Surface("surface is not mounted".to_string()))
    }
}

impl ViewSurface for DomSurface {
    type Panel = DomPanel;

    fn is_legacy_host(&self) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        let user_agent = window.navigator().user_agent().unwrap_or_default();
        let has_activex =
            js_sys::Reflect::has(&window, &JsValue::from_str("ActiveXObject")).unwrap_or(false);
        is_legacy_engine(&user_agent, has_activex)
    }

    fn mount(&mut self) -> Result<()> {
        if self.mounted.is_some() {
            return Ok(());
        }
        let container = self.div(CONTAINER_CLASS)?;
        let tip = self.div(TIP_CLASS)?;
        let strip = self.div(SHEET_STRIP_CLASS)?;
        let area = self.div(TABLE_AREA_CLASS)?;
        tip.set_text_content(Some(LOADING_TIP));
        container.append_child(&tip)?;
        container.append_child(&strip)?;
        container.append_child(&area)?;
        self.target.append_child(&container)?;
        self.mounted = Some(Mounted {
            container,
            tip,
            strip,
            area,
        });
        Ok(())
    }

    fn set_tip(&mut self, text: &str) -> Result<()> {
        let tip = &self.mounted()?.tip;
        tip.remove_attribute("style")?;
        tip.set_text_content(Some(text));
        Ok(())
    }

    fn hide_tip(&mut self) -> Result<()> {
        self.mounted()?.tip.set_attribute("style", "display: none")?;
        Ok(())
    }

    fn add_sheet(&mut self, sheet: &SheetInfo) -> Result<DomPanel> {
        let mounted = self.mounted()?.clone();
        let tab = self.div(SHEET_TAB_CLASS)?;
        let panel = self.div(TABLE_PANEL_CLASS)?;
        tab.set_text_content(Some(&sheet.name));
        mounted.strip.append_child(&tab)?;
        mounted.area.append_child(&panel)?;
        let sink = DomPanel::new(&self.document, panel.clone())?;
        self.tabs.push(tab);
        self.panels.push(panel);
        Ok(sink)
    }

    fn set_active(&mut self, index: usize, active: bool) -> Result<()> {
        let (Some(tab), Some(panel)) = (self.tabs.get(index), self.panels.get(index)) else {
            return Err(ViewerError::Surface(format!(
                "no sheet panel at index {index}"
            )));
        };
        for element in [tab, panel] {
            element.class_list().toggle_with_force(ACTIVE_CLASS, active)?;
        }
        Ok(())
    }
}
