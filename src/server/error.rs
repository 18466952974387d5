//! Error responses of the HTTP API
//!
//! Every failure leaves the service as a JSON body `{"error": "..."}` with a
//! status code chosen by [`ApiError::status`].

use serde::Serialize;
use thiserror::Error;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::Reply;

use crate::data::{ValidationError, WeatherError};
use crate::storage::StorageError;

/// Failures surfaced to API clients
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body failed validation
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The requested file does not exist
    #[error("File not found")]
    NotFound,

    /// The archive API did not answer in time
    #[error("Timed out fetching data from Open-Meteo API")]
    UpstreamTimeout,

    /// The archive API failed or returned something unusable
    #[error("Failed to fetch data from Open-Meteo API")]
    UpstreamFetch,

    /// Anything else; details are logged, not returned
    #[error("Internal server error")]
    Internal,
}

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::UpstreamFetch => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Maps a storage failure that has no client-facing meaning
    pub fn storage_fault(error: StorageError) -> Self {
        tracing::error!(error = %error, "storage operation failed");
        ApiError::Internal
    }
}

impl From<WeatherError> for ApiError {
    fn from(error: WeatherError) -> Self {
        match error {
            WeatherError::Timeout(_) => ApiError::UpstreamTimeout,
            _ => ApiError::UpstreamFetch,
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound(_) => ApiError::NotFound,
            other => ApiError::storage_fault(other),
        }
    }
}

/// Builds a JSON error response with an arbitrary status
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ErrorBody {
        error: message.into(),
    };
    warp::reply::with_status(warp::reply::json(&body), status).into_response()
}

impl Reply for ApiError {
    fn into_response(self) -> Response {
        error_response(self.status(), self.to_string())
    }
}
