use formats::{MapPayload, MapValues, OptionList, SubcatchmentCollection, TimeSeries};
use foundation::RegionId;

use crate::endpoint::Endpoint;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport to the data backend.
///
/// Implementations only move bytes: any received response is `Ok`, whatever
/// its status; `Err` is reserved for requests that produced no response.
/// Futures need not be `Send` (the browser client is single-threaded).
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn get(&self, endpoint: &Endpoint) -> Result<HttpResponse, ApiError>;
}

async fn get_success<B: Backend>(backend: &B, endpoint: &Endpoint) -> Result<String, ApiError> {
    let resp = backend.get(endpoint).await?;
    if !resp.is_success() {
        return Err(ApiError::Status {
            endpoint: endpoint.clone(),
            status: resp.status,
        });
    }
    Ok(resp.body)
}

/// `/years`, `/scenarios` or `/variables`.
pub async fn fetch_options<B: Backend>(
    backend: &B,
    endpoint: &Endpoint,
) -> Result<OptionList, ApiError> {
    let body = get_success(backend, endpoint).await?;
    OptionList::from_json_str(&body).map_err(|e| ApiError::Parse {
        endpoint: endpoint.clone(),
        message: e.to_string(),
    })
}

pub async fn fetch_subcatchments<B: Backend>(
    backend: &B,
    id_property: &str,
) -> Result<SubcatchmentCollection, ApiError> {
    let endpoint = Endpoint::Subcatchments;
    let body = get_success(backend, &endpoint).await?;
    SubcatchmentCollection::from_geojson_str(&body, id_property).map_err(|e| ApiError::Parse {
        endpoint,
        message: e.to_string(),
    })
}

/// Per-region values; an `{"error": ...}` body is reported whatever the status.
pub async fn fetch_map_values<B: Backend>(
    backend: &B,
    scenario: &str,
    variable: &str,
    year: &str,
) -> Result<MapValues, ApiError> {
    let endpoint = Endpoint::MapData {
        scenario: scenario.to_string(),
        variable: variable.to_string(),
        year: year.to_string(),
    };
    let resp = backend.get(&endpoint).await?;
    match MapPayload::from_json_str(&resp.body) {
        Ok(MapPayload::Error(message)) => Err(ApiError::Backend { endpoint, message }),
        _ if !resp.is_success() => Err(ApiError::Status {
            endpoint,
            status: resp.status,
        }),
        Ok(MapPayload::Values(values)) => Ok(values),
        Err(e) => Err(ApiError::Parse {
            endpoint,
            message: e.to_string(),
        }),
    }
}

pub async fn fetch_time_series<B: Backend>(
    backend: &B,
    scenario: &str,
    variable: &str,
    region: &RegionId,
) -> Result<TimeSeries, ApiError> {
    let endpoint = Endpoint::TimeSeries {
        scenario: scenario.to_string(),
        variable: variable.to_string(),
        region: region.clone(),
    };
    let body = get_success(backend, &endpoint).await?;
    Ok(TimeSeries::from_csv(&body))
}
