//! Carrier client.
//!
//! The proxy talks to the carrier through [`CarrierClient`] so handlers can
//! be exercised against a canned client in tests. [`HttpCarrierClient`] is
//! the real one: one `POST` per lookup, credentials from config.
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::CarrierConfig;

#[derive(Debug, Error)]
pub enum CarrierError {
    #[error("transport: {0}")]
    Transport(String),
    #[error("carrier answered HTTP {0}")]
    Status(u16),
    #[error("response is not JSON: {0}")]
    InvalidJson(String),
    #[error("response has no statusFlag")]
    InvalidStructure,
    #[error("client setup: {0}")]
    Setup(String),
}

impl From<reqwest::Error> for CarrierError {
    fn from(e: reqwest::Error) -> Self {
        CarrierError::Transport(e.to_string())
    }
}

#[async_trait]
pub trait CarrierClient: Send + Sync {
    /// Look up a sanitized tracking number. Returns the carrier's JSON body,
    /// guaranteed to be an object with a `statusFlag` key.
    async fn track(&self, tracking_number: &str) -> Result<Value, CarrierError>;
}

/// Request body of the carrier's `getTrackDetails` call
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TrackShipmentRequest<'a> {
    trk_type: &'static str,
    strcnno: &'a str,
    addtnl_dtl: &'static str,
}

pub struct HttpCarrierClient {
    client: reqwest::Client,
    url: String,
}

impl HttpCarrierClient {
    pub fn new(config: &CarrierConfig) -> Result<Self, CarrierError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.access_token {
            let value = HeaderValue::from_str(token)
                .map_err(|e| CarrierError::Setup(format!("access token: {}", e)))?;
            headers.insert("x-access-token", value);
        } else {
            tracing::warn!("CARRIER_ACCESS_TOKEN is not set; carrier calls go out unauthenticated");
        }
        if let Some(cookie) = &config.cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| CarrierError::Setup(format!("cookie: {}", e)))?;
            headers.insert(COOKIE, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| CarrierError::Setup(e.to_string()))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl CarrierClient for HttpCarrierClient {
    async fn track(&self, tracking_number: &str) -> Result<Value, CarrierError> {
        let response = self
            .client
            .post(&self.url)
            .json(&TrackShipmentRequest {
                trk_type: "cnno",
                strcnno: tracking_number,
                addtnl_dtl: "Y",
            })
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "carrier responded");
        if !status.is_success() {
            return Err(CarrierError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        // length only: the body carries customer names and addresses
        tracing::debug!(bytes = text.len(), "carrier body received");

        parse_body(&text)
    }
}

/// Parse a carrier body and check it has the one field everything keys on.
pub fn parse_body(text: &str) -> Result<Value, CarrierError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| CarrierError::InvalidJson(e.to_string()))?;
    if value.get("statusFlag").is_none() {
        return Err(CarrierError::InvalidStructure);
    }
    Ok(value)
}
