//! Open-Meteo historical weather API client
//!
//! This module fetches daily temperature history from the Open-Meteo archive
//! API. The response body is kept verbatim; it is only checked to be JSON.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::{WeatherArtifact, WeatherQuery, DATE_FORMAT};

/// Base URL for the Open-Meteo archive API
pub const OPEN_METEO_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Default bound on a single archive request, body included
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Daily metrics requested for every query
const DAILY_METRICS: &str = "temperature_2m_max,temperature_2m_min,temperature_2m_mean,apparent_temperature_max,apparent_temperature_min,apparent_temperature_mean";

/// Errors that can occur when fetching archive data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The request did not complete within the timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The API answered with a non-success status
    #[error("Archive API returned status {0}")]
    Status(StatusCode),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[source] reqwest::Error),

    /// The response body is not JSON
    #[error("Failed to parse JSON response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Client for fetching historical weather from the Open-Meteo archive API
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ArchiveClient {
    /// Create a new ArchiveClient against the given archive endpoint
    ///
    /// # Arguments
    /// * `base_url` - Full URL of the archive endpoint
    /// * `timeout` - Bound on the whole request, body included
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(WeatherError::RequestFailed)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the daily archive for a validated query
    ///
    /// Makes exactly one attempt; retrying is left to the caller.
    ///
    /// # Returns
    /// * `Ok(WeatherArtifact)` - The response body exactly as received
    /// * `Err(WeatherError)` - On timeout, non-success status, transport
    ///   failure or a body that is not JSON
    pub async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherArtifact, WeatherError> {
        let start_date = query.start_date.format(DATE_FORMAT).to_string();
        let end_date = query.end_date.format(DATE_FORMAT).to_string();
        let latitude = query.latitude.to_string();
        let longitude = query.longitude.to_string();

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("start_date", start_date.as_str()),
                ("end_date", end_date.as_str()),
                ("daily", DAILY_METRICS),
                ("timezone", query.timezone.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "archive API returned an error status");
            return Err(WeatherError::Status(status));
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        // Only checked, the stored artifact keeps the bytes as received.
        if let Err(e) = serde_json::from_slice::<serde_json::Value>(&body) {
            tracing::warn!(error = %e, "archive API returned a body that is not JSON");
            return Err(WeatherError::Malformed(e));
        }

        Ok(WeatherArtifact {
            body: body.to_vec(),
        })
    }

    fn classify(&self, error: reqwest::Error) -> WeatherError {
        if error.is_timeout() {
            tracing::warn!(timeout = ?self.timeout, "archive API request timed out");
            WeatherError::Timeout(self.timeout)
        } else {
            tracing::warn!(error = %error, "archive API request failed");
            WeatherError::RequestFailed(error)
        }
    }
}
