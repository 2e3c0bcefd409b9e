use api::Endpoint;
use foundation::RegionKey;
use layers::{RegionSet, RegionStyle};

use crate::chart_panel::ChartSpec;

/// The three option selectors of the page.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Selector {
    Year,
    Scenario,
    Variable,
}

impl Selector {
    /// Load order used at startup.
    pub const ALL: [Selector; 3] = [Selector::Year, Selector::Scenario, Selector::Variable];

    pub fn endpoint(self) -> Endpoint {
        match self {
            Selector::Year => Endpoint::Years,
            Selector::Scenario => Endpoint::Scenarios,
            Selector::Variable => Endpoint::Variables,
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Selector::Year => "years",
            Selector::Scenario => "scenarios",
            Selector::Variable => "variables",
        }
    }
}

/// Opaque handle to a live chart widget created by the view.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ChartHandle(pub u32);

/// Presentation surface the viewer drives.
///
/// Implementations own the widgets (map layers, select controls, chart
/// canvas); the viewer owns every decision about what they show.
pub trait ViewAdapter {
    /// Adds every region to the map with its current style and a click binding.
    fn attach_regions(&mut self, regions: &RegionSet);
    fn set_region_style(&mut self, key: RegionKey, style: &RegionStyle);
    /// Replaces the options of `selector` and selects `selected`.
    fn populate_options(&mut self, selector: Selector, options: &[String], selected: Option<&str>);
    fn show_region_popup(&mut self, key: RegionKey, html: &str);
    /// Replaces the legend control contents.
    fn render_legend(&mut self, html: &str);
    fn show_panel(&mut self);
    fn hide_panel(&mut self);
    /// Builds a fresh rendering surface and chart for `spec`.
    fn create_chart(&mut self, spec: &ChartSpec) -> ChartHandle;
    /// Releases the chart and removes its rendering surface.
    fn destroy_chart(&mut self, handle: ChartHandle);
}
