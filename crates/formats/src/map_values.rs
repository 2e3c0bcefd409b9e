use std::collections::HashMap;

use foundation::RegionId;
use serde_json::Value;

/// Per-region values for one (scenario, variable, year) triple.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapValues {
    values: HashMap<RegionId, f64>,
}

/// Decoded `/mapdata/...` body: either values or a backend-reported error.
#[derive(Debug, Clone, PartialEq)]
pub enum MapPayload {
    Values(MapValues),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapValuesError {
    Json(String),
    NotAnObject,
}

impl std::fmt::Display for MapValuesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapValuesError::Json(e) => write!(f, "JSON parse error: {e}"),
            MapValuesError::NotAnObject => write!(f, "expected a JSON object keyed by region id"),
        }
    }
}

impl std::error::Error for MapValuesError {}

impl MapValues {
    pub fn get(&self, id: &RegionId) -> Option<f64> {
        self.values.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(RegionId, f64)> for MapValues {
    fn from_iter<I: IntoIterator<Item = (RegionId, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl MapPayload {
    pub fn from_json_str(payload: &str) -> Result<Self, MapValuesError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| MapValuesError::Json(e.to_string()))?;
        let obj = value.as_object().ok_or(MapValuesError::NotAnObject)?;

        if let Some(err) = obj.get("error") {
            let message = match err {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return Ok(MapPayload::Error(message));
        }

        // Entries that are neither numbers nor numeric strings count as absent.
        let values = obj
            .iter()
            .filter_map(|(id, v)| {
                let n = match v {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => s.trim().parse::<f64>().ok(),
                    _ => None,
                }?;
                Some((RegionId::new(id.clone()), n))
            })
            .collect();
        Ok(MapPayload::Values(values))
    }
}
