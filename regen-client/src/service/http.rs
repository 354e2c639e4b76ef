//! HTTP implementation of the code service
//!
//! Talks JSON to the REGEN backend:
//! - `POST /api/generate`
//! - `POST /api/execute`
//! - `GET /api/languages`
//! - `GET /` (health)

use super::*;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::debug;

const GENERATE_PATH: &str = "/api/generate";
const EXECUTE_PATH: &str = "/api/execute";
const LANGUAGES_PATH: &str = "/api/languages";
const HEALTH_PATH: &str = "/";

/// HTTP/JSON code service
pub struct HttpCodeService {
    client: Client,
    config: ServiceConfig,
}

impl HttpCodeService {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder().build().map_err(|e| {
            Error::config_invalid("http_client", "failed to create HTTP client").set_source(e)
        })?;

        Ok(Self { client, config })
    }

    /// Create with default local settings
    pub fn local() -> Result<Self> {
        Self::new(ServiceConfig::default())
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn prepare(&self, mut req: RequestBuilder, secs: u64) -> RequestBuilder {
        req = req.timeout(Duration::from_secs(secs));
        for (key, value) in &self.config.headers {
            req = req.header(key, value);
        }
        req
    }

    async fn post_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        secs: u64,
    ) -> std::result::Result<serde_json::Value, ServiceError> {
        let url = self.config.url(path);
        debug!(%url, timeout_secs = secs, "POST");

        let req = self.prepare(self.client.post(&url).json(body), secs);
        let response = req.send().await.map_err(|e| transport_error(path, secs, e))?;
        read_reply(path, secs, response).await
    }

    async fn get_json(&self, path: &str, secs: u64) -> std::result::Result<serde_json::Value, ServiceError> {
        let url = self.config.url(path);
        debug!(%url, timeout_secs = secs, "GET");

        let req = self.prepare(self.client.get(&url), secs);
        let response = req.send().await.map_err(|e| transport_error(path, secs, e))?;
        read_reply(path, secs, response).await
    }
}

impl CodeService for HttpCodeService {
    fn name(&self) -> &str {
        "http"
    }

    async fn generate(&self, request: &GenerateRequest) -> std::result::Result<serde_json::Value, ServiceError> {
        self.post_json(GENERATE_PATH, request, self.config.generate_timeout_secs)
            .await
    }

    async fn execute(&self, request: &ExecuteRequest) -> std::result::Result<serde_json::Value, ServiceError> {
        self.post_json(EXECUTE_PATH, request, self.config.execute_timeout_secs)
            .await
    }

    async fn languages(&self) -> std::result::Result<serde_json::Value, ServiceError> {
        self.get_json(LANGUAGES_PATH, self.config.aux_timeout_secs).await
    }

    async fn health(&self) -> std::result::Result<bool, ServiceError> {
        let url = self.config.url(HEALTH_PATH);
        let secs = self.config.aux_timeout_secs;
        let response = self
            .prepare(self.client.get(&url), secs)
            .send()
            .await
            .map_err(|e| transport_error(HEALTH_PATH, secs, e))?;

        Ok(response.status().is_success())
    }
}

/// Anything that fails before a status line arrives
fn transport_error(endpoint: &str, secs: u64, err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        ServiceError::Timeout {
            endpoint: endpoint.to_string(),
            secs,
        }
    } else {
        ServiceError::Unreachable(err.to_string())
    }
}

/// The status line arrived but the body could not be read
fn body_error(endpoint: &str, secs: u64, status: StatusCode, err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return transport_error(endpoint, secs, err);
    }
    ServiceError::Api {
        status: status.as_u16(),
        reason: format!(
            "{} (reply body unreadable: {})",
            status.canonical_reason().unwrap_or("HTTP"),
            err
        ),
        body: String::new(),
    }
}

async fn read_reply(
    endpoint: &str,
    secs: u64,
    response: Response,
) -> std::result::Result<serde_json::Value, ServiceError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| body_error(endpoint, secs, status, e))?;

    debug!(endpoint, status = status.as_u16(), bytes = text.len(), "reply received");

    if !status.is_success() {
        return Err(ServiceError::Api {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body: text,
        });
    }

    // A plain-text body is treated as a bare string payload
    Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
}
