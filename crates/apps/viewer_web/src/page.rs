use runtime::{Selector, ViewerConfig};
use serde::{Deserialize, Serialize};

/// Ids of the page elements the viewer binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub map: String,
    pub year_selector: String,
    pub scenario_selector: String,
    pub variable_selector: String,
    pub chart_container: String,
    pub close_chart_button: String,
    pub chart_canvas: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            map: "map".to_string(),
            year_selector: "yearSelector".to_string(),
            scenario_selector: "scenarioSelector".to_string(),
            variable_selector: "variableSelector".to_string(),
            chart_container: "chart-container".to_string(),
            close_chart_button: "closeChartButton".to_string(),
            chart_canvas: "timeSeriesChart".to_string(),
        }
    }
}

impl ElementIds {
    pub fn selector(&self, selector: Selector) -> &str {
        match selector {
            Selector::Year => &self.year_selector,
            Selector::Scenario => &self.scenario_selector,
            Selector::Variable => &self.variable_selector,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub elements: ElementIds,
    /// Initial map center, `[lat, lng]`.
    pub center: [f64; 2],
    pub zoom: f64,
    pub tile_url: String,
    pub tile_attribution: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            elements: ElementIds::default(),
            center: [-9.19, -75.0152],
            zoom: 6.0,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            tile_attribution: "&copy; OpenStreetMap contributors".to_string(),
        }
    }
}

/// Everything `start_viewer` accepts; every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub viewer: ViewerConfig,
    pub page: PageConfig,
}

impl Settings {
    pub fn from_json(payload: Option<&str>) -> Result<Self, serde_json::Error> {
        match payload {
            Some(text) if !text.trim().is_empty() => serde_json::from_str(text),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Settings;
    use pretty_assertions::assert_eq;
    use runtime::Selector;

    #[test]
    fn missing_or_blank_payload_uses_defaults() {
        assert_eq!(Settings::from_json(None).expect("defaults"), Settings::default());
        assert_eq!(Settings::from_json(Some("  ")).expect("defaults"), Settings::default());
        let s = Settings::default();
        assert_eq!(s.page.center, [-9.19, -75.0152]);
        assert_eq!(s.page.elements.selector(Selector::Scenario), "scenarioSelector");
        assert_eq!(s.viewer.region_id_property, "SC_ID");
    }

    #[test]
    fn nested_overrides_keep_siblings() {
        let s = Settings::from_json(Some(
            r#"{"viewer": {"api": {"base_url": "/api"}}, "page": {"zoom": 7, "elements": {"map": "atlas"}}}"#,
        ))
        .expect("settings");
        assert_eq!(s.viewer.api.base_url, "/api");
        assert_eq!(s.viewer.defaults.year, "2025");
        assert_eq!(s.page.zoom, 7.0);
        assert_eq!(s.page.elements.map, "atlas");
        assert_eq!(s.page.elements.chart_canvas, "timeSeriesChart");
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(Settings::from_json(Some("{")).is_err());
    }
}
