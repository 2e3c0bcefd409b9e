//! In-memory backend and recording view shared by the unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, Waker};

use api::{ApiError, Backend, Endpoint, HttpResponse};
use foundation::RegionKey;
use layers::{RegionSet, RegionStyle};

use crate::chart_panel::ChartSpec;
use crate::view::{ChartHandle, Selector, ViewAdapter};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    AttachRegions(usize),
    SetRegionStyle(RegionKey, RegionStyle),
    PopulateOptions(Selector, Vec<String>, Option<String>),
    ShowPopup(RegionKey, String),
    RenderLegend(String),
    ShowPanel,
    HidePanel,
    CreateChart(ChartHandle, String),
    DestroyChart(ChartHandle),
}

#[derive(Debug, Default)]
pub struct RecordingView {
    pub calls: Vec<ViewCall>,
    pub styles: HashMap<RegionKey, RegionStyle>,
    pub options: HashMap<Selector, (Vec<String>, Option<String>)>,
    pub legend: Option<String>,
    pub panel_visible: bool,
    pub live_charts: HashSet<ChartHandle>,
    pub charts_created: Vec<ChartSpec>,
    next_chart: u32,
}

impl RecordingView {
    pub fn count(&self, pred: impl Fn(&ViewCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl ViewAdapter for RecordingView {
    fn attach_regions(&mut self, regions: &RegionSet) {
        for region in regions.iter() {
            self.styles.insert(region.key, region.style);
        }
        self.calls.push(ViewCall::AttachRegions(regions.len()));
    }

    fn set_region_style(&mut self, key: RegionKey, style: &RegionStyle) {
        self.styles.insert(key, *style);
        self.calls.push(ViewCall::SetRegionStyle(key, *style));
    }

    fn populate_options(&mut self, selector: Selector, options: &[String], selected: Option<&str>) {
        let entry = (options.to_vec(), selected.map(str::to_string));
        self.options.insert(selector, entry.clone());
        self.calls
            .push(ViewCall::PopulateOptions(selector, entry.0, entry.1));
    }

    fn show_region_popup(&mut self, key: RegionKey, html: &str) {
        self.calls.push(ViewCall::ShowPopup(key, html.to_string()));
    }

    fn render_legend(&mut self, html: &str) {
        self.legend = Some(html.to_string());
        self.calls.push(ViewCall::RenderLegend(html.to_string()));
    }

    fn show_panel(&mut self) {
        self.panel_visible = true;
        self.calls.push(ViewCall::ShowPanel);
    }

    fn hide_panel(&mut self) {
        self.panel_visible = false;
        self.calls.push(ViewCall::HidePanel);
    }

    fn create_chart(&mut self, spec: &ChartSpec) -> ChartHandle {
        let handle = ChartHandle(self.next_chart);
        self.next_chart += 1;
        self.live_charts.insert(handle);
        self.charts_created.push(spec.clone());
        self.calls
            .push(ViewCall::CreateChart(handle, spec.title.clone()));
        handle
    }

    fn destroy_chart(&mut self, handle: ChartHandle) {
        self.live_charts.remove(&handle);
        self.calls.push(ViewCall::DestroyChart(handle));
    }
}

/// Route table keyed by endpoint path. Held paths stay pending until released.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    routes: RefCell<HashMap<String, HttpResponse>>,
    held: RefCell<HashSet<String>>,
    pub requests: RefCell<Vec<String>>,
}

impl ScriptedBackend {
    pub fn route(self, path: &str, resp: HttpResponse) -> Self {
        self.set_route(path, resp);
        self
    }

    pub fn set_route(&self, path: &str, resp: HttpResponse) {
        self.routes.borrow_mut().insert(path.to_string(), resp);
    }

    pub fn hold(&self, path: &str) {
        self.held.borrow_mut().insert(path.to_string());
    }

    pub fn release(&self, path: &str) {
        self.held.borrow_mut().remove(path);
    }

    pub fn requests_starting_with(&self, prefix: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|p| p.starts_with(prefix))
            .count()
    }

    /// Standard fixture: regions `A`, `B`, and the backend's usual option lists.
    pub fn standard() -> Self {
        ScriptedBackend::default()
            .route(
                "/subcatchments",
                HttpResponse::ok(
                    r#"{"type":"FeatureCollection","features":[
                    {"type":"Feature","properties":{"SC_ID":"A"},
                     "geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}},
                    {"type":"Feature","properties":{"SC_ID":"B"},
                     "geometry":{"type":"Polygon","coordinates":[[[1,0],[2,0],[2,1],[1,0]]]}}]}"#,
                ),
            )
            .route(
                "/years",
                HttpResponse::ok(r#"["1995","2025","2030","2055","2085"]"#),
            )
            .route("/scenarios", HttpResponse::ok(r#"["ssp126","ssp585"]"#))
            .route("/variables", HttpResponse::ok(r#"["pr","et","rh"]"#))
    }
}

impl Backend for ScriptedBackend {
    async fn get(&self, endpoint: &Endpoint) -> Result<HttpResponse, ApiError> {
        let path = endpoint.path();
        self.requests.borrow_mut().push(path.clone());
        std::future::poll_fn(|_| {
            if self.held.borrow().contains(&path) {
                Poll::Pending
            } else {
                Poll::Ready(())
            }
        })
        .await;
        self.routes
            .borrow()
            .get(&path)
            .cloned()
            .ok_or_else(|| ApiError::Transport {
                endpoint: endpoint.clone(),
                message: "no route".to_string(),
            })
    }
}

/// Polls `fut` once without a real executor.
pub fn poll_once<F: Future>(fut: Pin<&mut F>) -> Poll<F::Output> {
    let mut cx = Context::from_waker(Waker::noop());
    fut.poll(&mut cx)
}
