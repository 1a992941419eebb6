use std::time::Duration;

use serde::Deserialize;

use crate::domain::{MarketPrice, PriceWindow};

/// Public aWATTar endpoint serving EPEX spot day-ahead prices.
pub const DEFAULT_BASE_URL: &str = "https://api.awattar.at";

#[derive(thiserror::Error, Debug)]
pub enum MarketDataError {
    #[error("market data request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("market data service responded with HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("failed to decode market data: {0}")]
    Decode(#[source] serde_json::Error),
}

impl MarketDataError {
    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status(_) => "status",
            Self::Decode(_) => "decode",
        }
    }
}

#[derive(Deserialize)]
struct MarketDataResponse {
    data: Vec<MarketPrice>,
}

/// Client for the `/v1/marketdata` endpoint.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct MarketDataClient {
    http: reqwest::Client,
    base_url: String,
}

impl MarketDataClient {
    /// Build a client against `base_url`. With `timeout` unset a slow upstream
    /// holds the request open until it answers.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, MarketDataError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(MarketDataError::Transport)?;

        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1/marketdata", self.base_url)
    }

    /// Fetch the hourly prices covering `window`, in the order the service
    /// returns them. Exactly one request is made; there is no retry.
    pub async fn fetch_prices(&self, window: PriceWindow) -> Result<Vec<MarketPrice>, MarketDataError> {
        let response = self
            .http
            .get(self.endpoint())
            .query(&[("start", window.start_ms), ("end", window.end_ms)])
            .send()
            .await
            .map_err(MarketDataError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::Status(status));
        }

        let body = response.bytes().await.map_err(MarketDataError::Transport)?;
        let decoded: MarketDataResponse = serde_json::from_slice(&body).map_err(MarketDataError::Decode)?;

        tracing::debug!(%window, records = decoded.data.len(), "fetched market prices");
        Ok(decoded.data)
    }
}
