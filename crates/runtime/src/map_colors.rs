use api::{ApiError, Backend, RequestTracker, Ticket, fetch_map_values};
use formats::MapValues;
use layers::{ColorScale, RegionSet};
use log::{debug, error};

use crate::selection::{MapQuery, SelectionState};
use crate::view::ViewAdapter;

#[derive(Debug, Clone, PartialEq)]
pub enum MapUpdate {
    /// Every region was restyled.
    Applied,
    /// A newer request was issued or the selection moved on; nothing touched.
    Stale,
    /// Logged; the previous coloring stays in place.
    Failed(ApiError),
}

/// Recolors the choropleth for the selected (scenario, variable, year).
///
/// Updates are all-or-nothing: either every region is restyled in one pass
/// or none is.
#[derive(Debug, Default)]
pub struct MapColorUpdater {
    scale: ColorScale,
    requests: RequestTracker<MapQuery>,
}

impl MapColorUpdater {
    pub fn new(scale: ColorScale) -> Self {
        Self {
            scale,
            requests: RequestTracker::new(),
        }
    }

    pub fn scale(&self) -> &ColorScale {
        &self.scale
    }

    /// Issues a ticket for the current selection, or `None` while it is incomplete.
    pub fn begin(&mut self, selection: &SelectionState) -> Option<Ticket<MapQuery>> {
        let Some(query) = selection.map_query() else {
            debug!("map refresh skipped: selection incomplete");
            return None;
        };
        Some(self.requests.issue(query))
    }

    pub async fn fetch<B: Backend>(backend: &B, query: &MapQuery) -> Result<MapValues, ApiError> {
        fetch_map_values(backend, &query.scenario, &query.variable, &query.year).await
    }

    pub fn complete<V: ViewAdapter>(
        &self,
        ticket: &Ticket<MapQuery>,
        result: Result<MapValues, ApiError>,
        selection: &SelectionState,
        regions: &mut RegionSet,
        view: &mut V,
    ) -> MapUpdate {
        if !self
            .requests
            .accepts(ticket, selection.map_query().as_ref())
        {
            debug!("discarding stale map data for {:?}", ticket.snapshot);
            return MapUpdate::Stale;
        }
        let values = match result {
            Ok(values) => values,
            Err(err) => {
                error!("error updating colors: {err}");
                return MapUpdate::Failed(err);
            }
        };
        regions.apply_colors(&values, &self.scale);
        for region in regions.iter() {
            view.set_region_style(region.key, &region.style);
        }
        MapUpdate::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::{MapColorUpdater, MapUpdate};
    use crate::selection::SelectionState;
    use crate::testing::{RecordingView, ViewCall};
    use api::{ApiError, Endpoint};
    use formats::{MapValues, SubcatchmentCollection};
    use foundation::{Color, RegionId, RegionKey};
    use layers::{ColorScale, RegionSet};

    fn regions() -> RegionSet {
        let payload = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"SC_ID":"A"},
             "geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}},
            {"type":"Feature","properties":{"SC_ID":"B"},
             "geometry":{"type":"Polygon","coordinates":[[[1,0],[2,0],[2,1],[1,0]]]}}]}"#;
        RegionSet::from_collection(
            &SubcatchmentCollection::from_geojson_str(payload, "SC_ID").expect("geometry"),
        )
    }

    fn selection(year: &str) -> SelectionState {
        let mut s = SelectionState::new();
        s.set_year(Some(year.into()));
        s.set_scenario(Some("ssp585".into()));
        s.set_variable(Some("pr".into()));
        s
    }

    fn values(v: f64) -> MapValues {
        [(RegionId::new("A"), v)].into_iter().collect()
    }

    #[test]
    fn incomplete_selection_issues_nothing() {
        let mut updater = MapColorUpdater::new(ColorScale::precipitation());
        assert!(updater.begin(&SelectionState::new()).is_none());
    }

    #[test]
    fn applies_all_regions_with_zero_default() {
        let mut updater = MapColorUpdater::new(ColorScale::precipitation());
        let sel = selection("2025");
        let ticket = updater.begin(&sel).expect("ticket");
        let mut regions = regions();
        let mut view = RecordingView::default();
        let out = updater.complete(&ticket, Ok(values(950.0)), &sel, &mut regions, &mut view);
        assert_eq!(out, MapUpdate::Applied);
        assert_eq!(view.styles[&RegionKey(0)].fill, Some(Color::from_hex(0x5FEB9C)));
        assert_eq!(view.styles[&RegionKey(1)].fill, Some(Color::from_hex(0x990808)));
    }

    #[test]
    fn backend_error_leaves_styles_untouched() {
        let mut updater = MapColorUpdater::new(ColorScale::precipitation());
        let sel = selection("2025");
        let mut regions = regions();
        let mut view = RecordingView::default();
        let first = updater.begin(&sel).expect("ticket");
        updater.complete(&first, Ok(values(150.0)), &sel, &mut regions, &mut view);
        let before = regions.clone();
        let calls_before = view.calls.len();

        let second = updater.begin(&sel).expect("ticket");
        let err = ApiError::Backend {
            endpoint: Endpoint::Years,
            message: "no data".into(),
        };
        let out = updater.complete(&second, Err(err), &sel, &mut regions, &mut view);
        assert!(matches!(out, MapUpdate::Failed(ApiError::Backend { .. })));
        assert_eq!(regions, before);
        assert_eq!(view.calls.len(), calls_before);
    }

    #[test]
    fn older_response_after_newer_request_is_discarded() {
        let mut updater = MapColorUpdater::new(ColorScale::precipitation());
        let mut regions = regions();
        let mut view = RecordingView::default();

        let old = updater.begin(&selection("2025")).expect("ticket");
        let sel = selection("2030");
        let new = updater.begin(&sel).expect("ticket");

        assert_eq!(
            updater.complete(&new, Ok(values(1500.0)), &sel, &mut regions, &mut view),
            MapUpdate::Applied
        );
        assert_eq!(
            updater.complete(&old, Ok(values(50.0)), &sel, &mut regions, &mut view),
            MapUpdate::Stale
        );
        assert_eq!(view.styles[&RegionKey(0)].fill, Some(Color::from_hex(0x3580F7)));
        assert_eq!(
            view.count(|c| matches!(c, ViewCall::SetRegionStyle(..))),
            2
        );
    }
}
