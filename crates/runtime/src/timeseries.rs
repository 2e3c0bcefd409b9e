use api::{ApiError, Backend, RequestTracker, Ticket, fetch_time_series};
use formats::TimeSeries;
use log::{debug, error, warn};

use crate::chart_panel::{ChartPanel, ChartSpec};
use crate::selection::{SelectionState, SeriesQuery};
use crate::view::{ChartHandle, ViewAdapter};

#[derive(Debug, Clone, PartialEq)]
pub enum SeriesUpdate {
    Rendered(ChartHandle),
    /// Parsed fine but had no rows; the previous chart stays.
    Empty,
    /// Superseded by a newer request, or the panel was closed meanwhile.
    Stale,
    Failed(ApiError),
}

/// Loads the selected region's series and renders it into the chart panel.
#[derive(Debug)]
pub struct TimeSeriesController {
    unit: String,
    requests: RequestTracker<SeriesQuery>,
}

impl TimeSeriesController {
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            requests: RequestTracker::new(),
        }
    }

    /// `None` until a region has been clicked and scenario and variable are set.
    pub fn begin(&mut self, selection: &SelectionState) -> Option<Ticket<SeriesQuery>> {
        let Some(query) = selection.series_query() else {
            debug!("time series skipped: no region selected");
            return None;
        };
        Some(self.requests.issue(query))
    }

    pub async fn fetch<B: Backend>(
        backend: &B,
        query: &SeriesQuery,
    ) -> Result<TimeSeries, ApiError> {
        fetch_time_series(backend, &query.scenario, &query.variable, &query.region).await
    }

    pub fn complete<V: ViewAdapter>(
        &self,
        ticket: &Ticket<SeriesQuery>,
        result: Result<TimeSeries, ApiError>,
        selection: &SelectionState,
        panel: &mut ChartPanel,
        view: &mut V,
    ) -> SeriesUpdate {
        if !self
            .requests
            .accepts(ticket, selection.series_query().as_ref())
        {
            debug!("discarding stale time series for {}", ticket.snapshot.region);
            return SeriesUpdate::Stale;
        }
        if !panel.is_visible() {
            debug!("chart closed; dropping time series for {}", ticket.snapshot.region);
            return SeriesUpdate::Stale;
        }
        let series = match result {
            Ok(series) => series,
            Err(err) => {
                error!("error loading time series: {err}");
                return SeriesUpdate::Failed(err);
            }
        };
        if series.is_empty() {
            warn!("no time series rows for {}", ticket.snapshot.region);
            return SeriesUpdate::Empty;
        }
        let query = &ticket.snapshot;
        let spec = ChartSpec::for_series(
            &series,
            &query.scenario,
            &query.variable,
            Some(&query.region),
            &self.unit,
        );
        SeriesUpdate::Rendered(panel.render(view, &spec))
    }
}
