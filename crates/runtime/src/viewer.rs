use std::cell::{Ref, RefCell};

use api::{Backend, fetch_subcatchments};
use foundation::RegionKey;
use layers::{ColorScale, RegionSet, render_legend};
use log::{debug, error, info, warn};

use crate::chart_panel::ChartPanel;
use crate::config::ViewerConfig;
use crate::dropdown::{DropdownLoader, OptionLists};
use crate::map_colors::{MapColorUpdater, MapUpdate};
use crate::selection::SelectionState;
use crate::timeseries::{SeriesUpdate, TimeSeriesController};
use crate::view::{Selector, ViewAdapter};

/// Everything the viewer mutates between events.
#[derive(Debug)]
pub struct AppState {
    pub selection: SelectionState,
    pub options: OptionLists,
    pub regions: RegionSet,
    pub chart: ChartPanel,
    geometry_requested: bool,
    map: MapColorUpdater,
    series: TimeSeriesController,
}

impl AppState {
    fn new(config: &ViewerConfig) -> Self {
        Self {
            selection: SelectionState::new(),
            options: OptionLists::default(),
            regions: RegionSet::default(),
            chart: ChartPanel::new(),
            geometry_requested: false,
            map: MapColorUpdater::new(ColorScale::precipitation()),
            series: TimeSeriesController::new(config.unit.clone()),
        }
    }
}

/// Drives the page: loads options and geometry, keeps the choropleth and the
/// chart in step with the selection.
///
/// Handlers take `&self` so one instance can be shared by every event
/// callback. No `RefCell` borrow is held across an `.await`, so a handler
/// suspended on the network never blocks another one.
pub struct Viewer<B, V> {
    backend: B,
    view: RefCell<V>,
    state: RefCell<AppState>,
    config: ViewerConfig,
}

impl<B: Backend, V: ViewAdapter> Viewer<B, V> {
    pub fn new(backend: B, view: V, config: ViewerConfig) -> Self {
        Self {
            state: RefCell::new(AppState::new(&config)),
            backend,
            view: RefCell::new(view),
            config,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> Ref<'_, AppState> {
        self.state.borrow()
    }

    pub fn view(&self) -> Ref<'_, V> {
        self.view.borrow()
    }

    /// Startup sequence: geometry, then each selector in turn, then the legend.
    ///
    /// Every successful option load asks for a map refresh; only the last one
    /// finds a complete selection, so a clean start fetches map data once.
    pub async fn initialize(&self) {
        self.load_geometry().await;
        for selector in Selector::ALL {
            if self.load_dropdown(selector).await {
                self.refresh_map().await;
            }
        }
        self.render_legend();
    }

    /// Fetches the subcatchment polygons and adds them to the map.
    ///
    /// Runs at most once per session; a failure leaves the region set empty.
    pub async fn load_geometry(&self) -> bool {
        {
            let mut state = self.state.borrow_mut();
            if state.geometry_requested {
                debug!("geometry already requested");
                return false;
            }
            state.geometry_requested = true;
        }
        match fetch_subcatchments(&self.backend, &self.config.region_id_property).await {
            Ok(collection) => {
                let regions = RegionSet::from_collection(&collection);
                info!("loaded {} subcatchments", regions.len());
                self.view.borrow_mut().attach_regions(&regions);
                self.state.borrow_mut().regions = regions;
                true
            }
            Err(err) => {
                error!("error loading geometry: {err}");
                false
            }
        }
    }

    /// Refills one selector. On failure the control and selection are untouched.
    pub async fn load_dropdown(&self, selector: Selector) -> bool {
        let loader = DropdownLoader::new(selector, self.config.defaults.for_selector(selector));
        match loader.fetch(&self.backend).await {
            Ok(list) => {
                let mut state = self.state.borrow_mut();
                let AppState {
                    options, selection, ..
                } = &mut *state;
                loader.apply(list, options, selection, &mut *self.view.borrow_mut());
                true
            }
            Err(err) => {
                error!("error loading {}: {err}", selector.plural());
                false
            }
        }
    }

    /// `None` when the selection is incomplete and nothing was requested.
    pub async fn refresh_map(&self) -> Option<MapUpdate> {
        let ticket = {
            let mut state = self.state.borrow_mut();
            let AppState { map, selection, .. } = &mut *state;
            map.begin(selection)?
        };
        let result = MapColorUpdater::fetch(&self.backend, &ticket.snapshot).await;
        let mut state = self.state.borrow_mut();
        let AppState {
            map,
            selection,
            regions,
            ..
        } = &mut *state;
        Some(map.complete(
            &ticket,
            result,
            selection,
            regions,
            &mut *self.view.borrow_mut(),
        ))
    }

    pub fn render_legend(&self) {
        let state = self.state.borrow();
        let Some(variable) = state.selection.variable() else {
            debug!("legend skipped: no variable selected");
            return;
        };
        let html = render_legend(variable, &self.config.unit, state.map.scale());
        self.view.borrow_mut().render_legend(&html);
    }

    /// `None` when no region is selected and nothing was requested.
    pub async fn load_time_series(&self) -> Option<SeriesUpdate> {
        let ticket = {
            let mut state = self.state.borrow_mut();
            let AppState {
                series, selection, ..
            } = &mut *state;
            series.begin(selection)?
        };
        let result = TimeSeriesController::fetch(&self.backend, &ticket.snapshot).await;
        let mut state = self.state.borrow_mut();
        let AppState {
            series,
            selection,
            chart,
            ..
        } = &mut *state;
        Some(series.complete(
            &ticket,
            result,
            selection,
            chart,
            &mut *self.view.borrow_mut(),
        ))
    }

    pub async fn select_year(&self, year: &str) {
        if self.accept_selection(Selector::Year, year) {
            self.refresh_map().await;
        }
    }

    pub async fn select_scenario(&self, scenario: &str) {
        if self.accept_selection(Selector::Scenario, scenario) {
            self.refresh_map().await;
            self.reload_visible_series().await;
        }
    }

    pub async fn select_variable(&self, variable: &str) {
        if self.accept_selection(Selector::Variable, variable) {
            self.render_legend();
            self.refresh_map().await;
            self.reload_visible_series().await;
        }
    }

    /// Region click: popup, open the panel, load the region's series.
    pub async fn select_region(&self, key: RegionKey) -> Option<SeriesUpdate> {
        {
            let mut state = self.state.borrow_mut();
            let AppState {
                regions,
                selection,
                chart,
                ..
            } = &mut *state;
            let Some(region) = regions.get(key) else {
                warn!("click on unknown region {}", key.index());
                return None;
            };
            let (Some(id), Some(popup)) = (region.id.clone(), region.popup_html()) else {
                error!(
                    "region {} has no {} property",
                    key.index(),
                    self.config.region_id_property
                );
                return None;
            };
            debug!("region {id} selected");
            selection.set_region(Some(id));
            let mut view = self.view.borrow_mut();
            view.show_region_popup(key, &popup);
            chart.show(&mut *view);
        }
        self.load_time_series().await
    }

    /// Hides the panel and destroys the chart. The selected region is kept.
    pub fn close_chart(&self) {
        let mut state = self.state.borrow_mut();
        state.chart.hide(&mut *self.view.borrow_mut());
    }

    fn accept_selection(&self, selector: Selector, value: &str) -> bool {
        let mut state = self.state.borrow_mut();
        if !state.options.contains(selector, value) {
            warn!("ignoring {value}: not among the loaded {}", selector.plural());
            return false;
        }
        state.selection.set(selector, Some(value.to_string()));
        true
    }

    async fn reload_visible_series(&self) {
        if !self.state.borrow().chart.is_visible() {
            debug!("chart hidden; time series not reloaded");
            return;
        }
        self.load_time_series().await;
    }
}
