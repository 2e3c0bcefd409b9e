use api::ApiConfig;
use serde::{Deserialize, Serialize};

use crate::view::Selector;

/// Preferred selector values, used when the backend offers them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionDefaults {
    pub year: String,
    pub scenario: String,
    pub variable: String,
}

impl Default for SelectionDefaults {
    fn default() -> Self {
        Self {
            year: "2025".to_string(),
            scenario: "ssp585".to_string(),
            variable: "pr".to_string(),
        }
    }
}

impl SelectionDefaults {
    pub fn for_selector(&self, selector: Selector) -> &str {
        match selector {
            Selector::Year => &self.year,
            Selector::Scenario => &self.scenario,
            Selector::Variable => &self.variable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub api: ApiConfig,
    pub defaults: SelectionDefaults,
    /// GeoJSON property holding the region identifier.
    pub region_id_property: String,
    /// Unit suffix for the legend title and chart axis.
    pub unit: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            defaults: SelectionDefaults::default(),
            region_id_property: "SC_ID".to_string(),
            unit: "mm".to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::ViewerConfig;
    use crate::view::Selector;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = ViewerConfig::from_json_str(r#"{"api": {"base_url": "https://x.test"},
                                                  "defaults": {"year": "2055"}}"#)
            .expect("config");
        assert_eq!(cfg.api.base_url, "https://x.test");
        assert_eq!(cfg.defaults.for_selector(Selector::Year), "2055");
        assert_eq!(cfg.defaults.for_selector(Selector::Scenario), "ssp585");
        assert_eq!(cfg.region_id_property, "SC_ID");
        assert_eq!(cfg.unit, "mm");
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(ViewerConfig::from_json_str("{}").expect("config"), ViewerConfig::default());
    }
}
