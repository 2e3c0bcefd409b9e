use console_error_panic_hook::set_once;
use foundation::RegionKey;
use log::{Level, error, info, warn};
use runtime::{Selector, Viewer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event, HtmlSelectElement};

mod backend;
mod bridge;
pub mod chart;
pub mod page;
mod view;

use backend::GlooBackend;
use page::{ElementIds, Settings};
use view::DomView;

type WebViewer = Viewer<GlooBackend, DomView>;

thread_local! {
    static VIEWER: RefCell<Option<Rc<WebViewer>>> = const { RefCell::new(None) };
}

fn current_viewer() -> Option<Rc<WebViewer>> {
    VIEWER.with(|v| v.borrow().clone())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    // A second init (hot reload) is harmless.
    let _ = console_log::init_with_level(Level::Debug);
    Ok(())
}

/// Builds the map, binds the page controls and runs the startup sequence.
///
/// `config_json` is an optional JSON object with `viewer` and `page` sections;
/// when it does not parse the defaults are used.
#[wasm_bindgen]
pub fn start_viewer(config_json: Option<String>) -> Result<(), JsValue> {
    if current_viewer().is_some() {
        return Err(JsValue::from_str("viewer already started"));
    }
    let settings = Settings::from_json(config_json.as_deref()).unwrap_or_else(|e| {
        warn!("invalid viewer config, using defaults: {e}");
        Settings::default()
    });
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let elements = settings.page.elements.clone();
    let view = DomView::new(settings.page, on_region_click)?;
    let backend = GlooBackend::new(settings.viewer.api.clone());
    let viewer = Rc::new(Viewer::new(backend, view, settings.viewer));
    VIEWER.with(|v| *v.borrow_mut() = Some(viewer.clone()));

    bind_controls(&document, &elements)?;
    info!("viewer started");

    spawn_local(async move {
        viewer.initialize().await;
    });
    Ok(())
}

fn on_region_click(key: RegionKey) {
    let Some(viewer) = current_viewer() else {
        return;
    };
    spawn_local(async move {
        viewer.select_region(key).await;
    });
}

fn on_selector_change(selector: Selector, value: String) {
    let Some(viewer) = current_viewer() else {
        return;
    };
    spawn_local(async move {
        match selector {
            Selector::Year => viewer.select_year(&value).await,
            Selector::Scenario => viewer.select_scenario(&value).await,
            Selector::Variable => viewer.select_variable(&value).await,
        }
    });
}

fn bind_controls(document: &Document, ids: &ElementIds) -> Result<(), JsValue> {
    for selector in Selector::ALL {
        let id = ids.selector(selector);
        let Some(el) = document.get_element_by_id(id) else {
            error!("selector #{id} not found");
            continue;
        };
        let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let value = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
                .map(|s| s.value());
            if let Some(value) = value {
                on_selector_change(selector, value);
            }
        });
        el.add_event_listener_with_callback("change", handler.as_ref().unchecked_ref())?;
        // Page-lifetime listener.
        handler.forget();
    }

    match document.get_element_by_id(&ids.close_chart_button) {
        Some(button) => {
            let handler = Closure::<dyn FnMut()>::new(|| {
                if let Some(viewer) = current_viewer() {
                    viewer.close_chart();
                }
            });
            button.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
            handler.forget();
        }
        None => error!("close button #{} not found", ids.close_chart_button),
    }
    Ok(())
}
