use formats::TimeSeries;
use foundation::RegionId;
use serde::Serialize;

use crate::view::{ChartHandle, ViewAdapter};

/// One plotted line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    /// CSS color of the line.
    pub color: String,
    pub values: Vec<f64>,
}

/// Everything the view needs to draw the time-series chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub y_axis_title: String,
    /// X values (timestamps), shared by every series.
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    /// Median plus the 90% confidence bounds, always plotted together.
    pub fn for_series(
        series: &TimeSeries,
        scenario: &str,
        variable: &str,
        region: Option<&RegionId>,
        unit: &str,
    ) -> Self {
        let region = region.map(RegionId::as_str).unwrap_or("Unknown");
        Self {
            title: format!(
                "Escenario: {}  -  Subcuenca: {}",
                scenario.to_uppercase(),
                region
            ),
            y_axis_title: format!("{} ({unit})", variable.to_uppercase()),
            labels: series.timestamps.clone(),
            series: vec![
                ChartSeries {
                    label: "Mediano".to_string(),
                    color: "blue".to_string(),
                    values: series.medians.clone(),
                },
                ChartSeries {
                    label: "IC 90% Superior".to_string(),
                    color: "green".to_string(),
                    values: series.upper_bounds.clone(),
                },
                ChartSeries {
                    label: "IC 90% Inferior".to_string(),
                    color: "red".to_string(),
                    values: series.lower_bounds.clone(),
                },
            ],
        }
    }
}

/// Chart container visibility plus the single live chart instance.
///
/// Invariant: at most one chart exists; it is destroyed before a new one is
/// created and whenever the panel is hidden.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ChartPanel {
    visible: bool,
    live: Option<ChartHandle>,
}

impl ChartPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn live_chart(&self) -> Option<ChartHandle> {
        self.live
    }

    pub fn show<V: ViewAdapter>(&mut self, view: &mut V) {
        self.visible = true;
        view.show_panel();
    }

    /// Hides the container and releases the chart. A later `show` does not
    /// bring the chart back; only `render` does.
    pub fn hide<V: ViewAdapter>(&mut self, view: &mut V) {
        self.visible = false;
        view.hide_panel();
        if let Some(handle) = self.live.take() {
            view.destroy_chart(handle);
        }
    }

    pub fn render<V: ViewAdapter>(&mut self, view: &mut V, spec: &ChartSpec) -> ChartHandle {
        if let Some(previous) = self.live.take() {
            view.destroy_chart(previous);
        }
        let handle = view.create_chart(spec);
        self.live = Some(handle);
        handle
    }
}
