use std::collections::HashMap;

use foundation::RegionKey;
use layers::{RegionSet, RegionStyle};
use log::error;
use runtime::{ChartHandle, ChartSpec, Selector, ViewAdapter};
use serde_json::json;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlOptionElement, HtmlSelectElement};

use crate::bridge;
use crate::chart::chart_config;
use crate::page::PageConfig;

/// Leaflet style object for a region.
pub fn style_json(style: &RegionStyle) -> String {
    let mut value = json!({
        "color": style.stroke.css(),
        "weight": style.weight,
        "fillOpacity": style.fill_opacity,
    });
    if let Some(fill) = style.fill {
        value["fillColor"] = json!(fill.css());
    }
    value.to_string()
}

/// DOM, Leaflet and Chart.js rendition of the viewer.
pub struct DomView {
    document: Document,
    page: PageConfig,
    map: JsValue,
    layers: Vec<JsValue>,
    // Leaflet keeps references to these; dropping one would invalidate its click handler.
    click_handlers: Vec<Closure<dyn FnMut()>>,
    legend: Option<Element>,
    charts: HashMap<ChartHandle, JsValue>,
    next_chart: u32,
    on_region_click: fn(RegionKey),
}

impl DomView {
    pub fn new(page: PageConfig, on_region_click: fn(RegionKey)) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let map = bridge::vecc_map_init(
            &page.elements.map,
            page.center[0],
            page.center[1],
            page.zoom,
            &page.tile_url,
            &page.tile_attribution,
        )?;
        Ok(Self {
            document,
            page,
            map,
            layers: Vec::new(),
            click_handlers: Vec::new(),
            legend: None,
            charts: HashMap::new(),
            next_chart: 0,
            on_region_click,
        })
    }

    fn element(&self, id: &str) -> Option<Element> {
        let found = self.document.get_element_by_id(id);
        if found.is_none() {
            error!("element #{id} not found");
        }
        found
    }

    fn set_display(&self, id: &str, display: &str) {
        let Some(el) = self.element(id).and_then(|e| e.dyn_into::<HtmlElement>().ok()) else {
            return;
        };
        if let Err(err) = el.style().set_property("display", display) {
            error!("failed to set display on #{id}: {err:?}");
        }
    }

    fn layer(&self, key: RegionKey) -> Option<&JsValue> {
        let layer = self.layers.get(key.index());
        if layer.is_none() {
            error!("no map layer for region {}", key.index());
        }
        layer
    }

    fn fill_select(&self, select: &HtmlSelectElement, options: &[String]) -> Result<(), JsValue> {
        select.set_inner_html("");
        for value in options {
            let option: HtmlOptionElement = self.document.create_element("option")?.dyn_into()?;
            option.set_value(value);
            option.set_text(value);
            select.append_child(&option)?;
        }
        Ok(())
    }
}

impl ViewAdapter for DomView {
    fn attach_regions(&mut self, regions: &RegionSet) {
        for region in regions.iter() {
            let key = region.key;
            let on_click = self.on_region_click;
            let handler = Closure::<dyn FnMut()>::new(move || on_click(key));
            match bridge::vecc_map_add_region(
                &self.map,
                &region.feature.to_string(),
                &style_json(&region.style),
                &handler,
            ) {
                Ok(layer) => {
                    self.layers.push(layer);
                    self.click_handlers.push(handler);
                }
                Err(err) => {
                    error!("failed to add region {}: {err:?}", key.index());
                    self.layers.push(JsValue::NULL);
                }
            }
        }
    }

    fn set_region_style(&mut self, key: RegionKey, style: &RegionStyle) {
        let Some(layer) = self.layer(key) else {
            return;
        };
        if layer.is_null() {
            return;
        }
        if let Err(err) = bridge::vecc_region_set_style(layer, &style_json(style)) {
            error!("failed to style region {}: {err:?}", key.index());
        }
    }

    fn populate_options(&mut self, selector: Selector, options: &[String], selected: Option<&str>) {
        let id = self.page.elements.selector(selector).to_string();
        let Some(select) = self
            .element(&id)
            .and_then(|e| e.dyn_into::<HtmlSelectElement>().ok())
        else {
            return;
        };
        if let Err(err) = self.fill_select(&select, options) {
            error!("failed to fill #{id}: {err:?}");
            return;
        }
        select.set_value(selected.unwrap_or(""));
    }

    fn show_region_popup(&mut self, key: RegionKey, html: &str) {
        let Some(layer) = self.layer(key) else {
            return;
        };
        if let Err(err) = bridge::vecc_region_popup(layer, html) {
            error!("failed to open popup: {err:?}");
        }
    }

    fn render_legend(&mut self, html: &str) {
        if self.legend.is_none() {
            match bridge::vecc_legend_init(&self.map) {
                Ok(div) => self.legend = Some(div),
                Err(err) => {
                    error!("failed to add legend: {err:?}");
                    return;
                }
            }
        }
        if let Some(div) = &self.legend {
            div.set_inner_html(html);
        }
    }

    fn show_panel(&mut self) {
        let ids = &self.page.elements;
        self.set_display(&ids.chart_container, "block");
        self.set_display(&ids.close_chart_button, "block");
    }

    fn hide_panel(&mut self) {
        self.set_display(&self.page.elements.chart_container, "none");
    }

    fn create_chart(&mut self, spec: &ChartSpec) -> ChartHandle {
        let handle = ChartHandle(self.next_chart);
        self.next_chart += 1;
        let config = chart_config(spec).to_string();
        match bridge::vecc_chart_create(&self.page.elements.chart_canvas, &config) {
            Ok(chart) => {
                self.charts.insert(handle, chart);
            }
            Err(err) => error!("failed to create chart: {err:?}"),
        }
        handle
    }

    fn destroy_chart(&mut self, handle: ChartHandle) {
        let Some(chart) = self.charts.remove(&handle) else {
            return;
        };
        let ids = &self.page.elements;
        if let Err(err) = bridge::vecc_chart_destroy(&chart, &ids.chart_container, &ids.chart_canvas)
        {
            error!("failed to destroy chart: {err:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::style_json;
    use foundation::Color;
    use layers::RegionStyle;
    use serde_json::{Value, json};

    #[test]
    fn neutral_style_has_no_fill_color() {
        let v: Value = serde_json::from_str(&style_json(&RegionStyle::neutral())).expect("json");
        assert_eq!(v, json!({"color": "#666666", "weight": 0.5, "fillOpacity": 0.7}));
    }

    #[test]
    fn colored_style_sets_fill() {
        let style = RegionStyle::neutral().with_fill(Color::from_hex(0x3B0066));
        let v: Value = serde_json::from_str(&style_json(&style)).expect("json");
        assert_eq!(v["fillColor"], json!("#3B0066"));
    }
}
