//! Backend endpoint table.
//!
//! All routes are plain `GET`s relative to [`ApiConfig::base_url`].

use foundation::RegionId;
use serde::{Deserialize, Serialize};
use urlencoding::encode;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Subcatchments,
    Years,
    Scenarios,
    Variables,
    MapData {
        scenario: String,
        variable: String,
        year: String,
    },
    TimeSeries {
        scenario: String,
        variable: String,
        region: RegionId,
    },
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Subcatchments => "/subcatchments".to_string(),
            Endpoint::Years => "/years".to_string(),
            Endpoint::Scenarios => "/scenarios".to_string(),
            Endpoint::Variables => "/variables".to_string(),
            Endpoint::MapData {
                scenario,
                variable,
                year,
            } => format!(
                "/mapdata/{}/{}/{}",
                encode(scenario),
                encode(variable),
                encode(year)
            ),
            Endpoint::TimeSeries {
                scenario,
                variable,
                region,
            } => format!(
                "/timeseries/{}/{}/{}",
                encode(scenario),
                encode(variable),
                encode(region.as_str())
            ),
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Empty means same-origin relative paths.
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn url(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint.path())
    }
}
