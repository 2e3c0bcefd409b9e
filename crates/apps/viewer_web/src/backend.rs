use api::{ApiConfig, ApiError, Backend, Endpoint, HttpResponse};
use gloo_net::http::Request;

/// `fetch`-backed transport; any HTTP answer is handed up with its status.
#[derive(Debug, Clone)]
pub struct GlooBackend {
    config: ApiConfig,
}

impl GlooBackend {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }
}

impl Backend for GlooBackend {
    async fn get(&self, endpoint: &Endpoint) -> Result<HttpResponse, ApiError> {
        let transport = |e: gloo_net::Error| ApiError::Transport {
            endpoint: endpoint.clone(),
            message: e.to_string(),
        };
        let resp = Request::get(&self.config.url(endpoint))
            .send()
            .await
            .map_err(transport)?;
        let status = resp.status();
        let body = resp.text().await.map_err(transport)?;
        Ok(HttpResponse::new(status, body))
    }
}
