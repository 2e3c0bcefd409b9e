//! Thin shims over the page's Leaflet and Chart.js globals.
//!
//! Everything here only moves handles and JSON strings across the boundary;
//! decisions stay on the Rust side.

use wasm_bindgen::prelude::*;

#[wasm_bindgen(inline_js = "
export function vecc_map_init(elementId, lat, lng, zoom, tileUrl, attribution) {
    const map = L.map(elementId).setView([lat, lng], zoom);
    L.tileLayer(tileUrl, { attribution }).addTo(map);
    return map;
}

export function vecc_map_add_region(map, featureJson, styleJson, onClick) {
    const layer = L.geoJSON(JSON.parse(featureJson), { style: JSON.parse(styleJson) });
    layer.on('click', (e) => {
        layer.__veccClick = e.latlng;
        onClick();
    });
    layer.addTo(map);
    return layer;
}

export function vecc_region_set_style(layer, styleJson) {
    layer.setStyle(JSON.parse(styleJson));
}

export function vecc_region_popup(layer, html) {
    layer.bindPopup(html, { minWidth: 100, maxWidth: 200 });
    layer.openPopup(layer.__veccClick);
}

export function vecc_legend_init(map) {
    const legend = L.control({ position: 'bottomright' });
    let div = null;
    legend.onAdd = function () {
        div = L.DomUtil.create('div', 'info legend');
        return div;
    };
    legend.addTo(map);
    return div;
}

export function vecc_chart_create(canvasId, configJson) {
    const canvas = document.getElementById(canvasId);
    if (!canvas) {
        throw new Error('chart canvas #' + canvasId + ' not found');
    }
    return new Chart(canvas.getContext('2d'), JSON.parse(configJson));
}

export function vecc_chart_destroy(chart, containerId, canvasId) {
    chart.destroy();
    const container = document.getElementById(containerId);
    const old = document.getElementById(canvasId);
    if (old) {
        old.remove();
    }
    if (container) {
        const fresh = document.createElement('canvas');
        fresh.id = canvasId;
        container.appendChild(fresh);
    }
}
")]
extern "C" {
    #[wasm_bindgen(catch)]
    pub fn vecc_map_init(
        element_id: &str,
        lat: f64,
        lng: f64,
        zoom: f64,
        tile_url: &str,
        attribution: &str,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub fn vecc_map_add_region(
        map: &JsValue,
        feature_json: &str,
        style_json: &str,
        on_click: &Closure<dyn FnMut()>,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub fn vecc_region_set_style(layer: &JsValue, style_json: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    pub fn vecc_region_popup(layer: &JsValue, html: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    pub fn vecc_legend_init(map: &JsValue) -> Result<web_sys::Element, JsValue>;

    #[wasm_bindgen(catch)]
    pub fn vecc_chart_create(canvas_id: &str, config_json: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub fn vecc_chart_destroy(
        chart: &JsValue,
        container_id: &str,
        canvas_id: &str,
    ) -> Result<(), JsValue>;
}
