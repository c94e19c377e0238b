use reqwest::Client;
use thiserror::Error;

use super::data::RawRecord;
use crate::config::CatalogConfig;

/// Everything that can go wrong while fetching a catalog resource
///
/// Variants carry plain strings so the error can travel inside cloneable
/// UI messages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("malformed response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

/// Result of a single catalog fetch
pub type FetchResult = Result<Vec<RawRecord>, FetchError>;

/// HTTP client for the remote catalog service
///
/// Cloning is cheap, the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    /// Build a client for the configured service
    pub fn new(config: &CatalogConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| FetchError::Transport {
                url: config.base_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL of a resource
    pub fn endpoint(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource.trim_start_matches('/'))
    }

    /// Fetch a resource and return its records in service order
    ///
    /// One GET, no retries. The caller decides what a failure means.
    pub async fn fetch(&self, resource: &str) -> FetchResult {
        let url = self.endpoint(resource);
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| request_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| request_error(&url, e))?;

        parse_records(&url, &body)
    }
}

fn request_error(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }
}

/// The body must be a JSON array, records themselves are decoded later
fn parse_records(url: &str, body: &[u8]) -> FetchResult {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    match value {
        serde_json::Value::Array(records) => Ok(records),
        other => Err(FetchError::Decode {
            url: url.to_string(),
            reason: format!("expected a JSON array, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
