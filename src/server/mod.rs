//! HTTP facade for Weather Vault
//!
//! Wires the archive client, the bucket gateway and the content cache into
//! four warp routes:
//!
//! - `GET /`
//! - `POST /store-weather-data`
//! - `GET /list-weather-files`
//! - `GET /weather-file-content/{file_name}`

pub mod error;
mod handlers;

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use crate::cache::ContentCache;
use crate::data::ArchiveClient;
use crate::storage::WeatherBucket;

pub use error::{ApiError, ErrorBody};

/// Largest accepted request body, in bytes
const MAX_BODY_BYTES: u64 = 16 * 1024;

/// Everything a request handler needs, built once at startup
#[derive(Debug)]
pub struct AppContext {
    /// Client for the Open-Meteo archive API
    pub archive: ArchiveClient,
    /// Bucket holding stored weather files
    pub bucket: WeatherBucket,
    /// Parsed contents of recently read files
    pub cache: ContentCache,
}

impl AppContext {
    pub fn new(archive: ArchiveClient, bucket: WeatherBucket, cache: ContentCache) -> Self {
        Self {
            archive,
            bucket,
            cache,
        }
    }
}

/// Builds the complete route tree, including JSON error handling
pub fn routes(
    ctx: Arc<AppContext>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let with_ctx = warp::any().map(move || ctx.clone());

    let index = warp::path::end().and(warp::get()).then(handlers::index);

    let store = warp::path("store-weather-data")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_ctx.clone())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .then(handlers::store_weather_data);

    let list = warp::path("list-weather-files")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_ctx.clone())
        .then(handlers::list_weather_files);

    let content = warp::path!("weather-file-content" / String)
        .and(warp::get())
        .and(with_ctx)
        .then(handlers::weather_file_content);

    index
        .or(store)
        .or(list)
        .or(content)
        .recover(handle_rejection)
        .with(warp::trace::request())
}

/// Turns warp rejections into JSON error responses
async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, format!("Invalid JSON body: {}", e))
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Content-Type must be application/json".to_string(),
        )
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large".to_string())
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Content-Length required".to_string())
    } else {
        tracing::error!(rejection = ?err, "unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
    };

    Ok(error::error_response(status, message))
}

/// Serves the API on `addr` until `shutdown` completes
///
/// # Errors
/// Returns an error if the address cannot be bound.
pub async fn serve(
    ctx: Arc<AppContext>,
    addr: SocketAddr,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), warp::Error> {
    let (bound, server) = warp::serve(routes(ctx)).try_bind_with_graceful_shutdown(addr, shutdown)?;
    tracing::info!(%bound, "weather vault listening");
    server.await;
    tracing::info!("server stopped");
    Ok(())
}
