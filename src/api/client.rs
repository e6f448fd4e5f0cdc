//! HTTP client for the county census endpoint

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::config::CensusConfig;
use crate::error::{CensusError, Result};
use crate::models::RawCountyRecord;

/// Characters of the body kept for logging and status errors
pub const PREVIEW_CHARS: usize = 200;

/// JSON envelope returned by the endpoint
#[derive(Debug, Deserialize)]
struct Envelope {
    data: Vec<RawCountyRecord>,
}

/// Decoded response of one fetch
#[derive(Debug, Clone)]
pub struct CensusResponse {
    /// HTTP status code
    pub status: u16,
    /// Rows of the `data` array, uncleaned
    pub rows: Vec<RawCountyRecord>,
    /// Leading characters of the raw body
    pub preview: String,
    /// When the response was received
    pub fetched_at: DateTime<Utc>,
}

/// First `max_chars` characters of a body, cut on a char boundary
#[must_use]
pub fn body_preview(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}

/// Client for the census endpoint
#[derive(Debug, Clone)]
pub struct CensusClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CensusClient {
    /// Create a client for the configured endpoint and key
    pub fn new(config: &CensusConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("census-vuln/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_http_client(
            http,
            config.api_url.clone(),
            config.api_key.clone(),
        ))
    }

    /// Create a client around an existing `reqwest::Client`
    #[must_use]
    pub fn with_http_client(http: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every county row in one request
    pub async fn fetch(&self) -> Result<CensusResponse> {
        log::info!("Requesting county data from {}", self.base_url);

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        log::info!("Census API responded with status {}", status.as_u16());

        let body = response.text().await?;
        let preview = body_preview(&body, PREVIEW_CHARS);
        log::debug!("Response preview: {preview}");

        if !status.is_success() {
            return Err(CensusError::Status {
                status: status.as_u16(),
                body: preview,
            });
        }

        let envelope: Envelope = serde_json::from_str(&body)?;
        log::info!("Received {} county rows", envelope.data.len());

        Ok(CensusResponse {
            status: status.as_u16(),
            rows: envelope.data,
            preview,
            fetched_at: Utc::now(),
        })
    }
}
