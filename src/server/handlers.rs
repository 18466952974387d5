//! Request handlers for the weather file API

use std::sync::Arc;

use percent_encoding::percent_decode_str;
use serde::Serialize;
use serde_json::{json, Value};
use warp::reply::Response;
use warp::Reply;

use super::error::ApiError;
use super::AppContext;
use crate::data::{FileKey, WeatherArtifact, WeatherRequest};
use crate::storage::WeatherBucket;

/// Body of a successful store
#[derive(Debug, Serialize)]
struct StoreResponse {
    message: &'static str,
    file_name: FileKey,
}

pub async fn index() -> Response {
    warp::reply::json(&json!({
        "message": "Weather Vault: POST /store-weather-data, GET /list-weather-files, GET /weather-file-content/{file_name}"
    }))
    .into_response()
}

pub async fn store_weather_data(ctx: Arc<AppContext>, request: WeatherRequest) -> Response {
    match store(&ctx, request).await {
        Ok(stored) => warp::reply::json(&stored).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn store(ctx: &AppContext, request: WeatherRequest) -> Result<StoreResponse, ApiError> {
    let query = request.validate().map_err(|e| {
        tracing::info!(reason = %e, "rejected store request");
        e
    })?;

    let artifact = ctx.archive.fetch(&query).await?;

    let key = query.file_key();
    ctx.bucket
        .put(key.as_str(), artifact.body, WeatherArtifact::CONTENT_TYPE)
        .await
        .map_err(ApiError::storage_fault)?;

    tracing::info!(file_name = %key, bucket = ctx.bucket.name(), "weather data stored");
    Ok(StoreResponse {
        message: "Data stored successfully",
        file_name: key,
    })
}

pub async fn list_weather_files(ctx: Arc<AppContext>) -> Response {
    match ctx.bucket.list().await {
        Ok(names) => warp::reply::json(&names).into_response(),
        Err(e) => ApiError::storage_fault(e).into_response(),
    }
}

pub async fn weather_file_content(raw_name: String, ctx: Arc<AppContext>) -> Response {
    // warp hands over the segment still percent-encoded
    let file_name = match percent_decode_str(&raw_name).decode_utf8() {
        Ok(name) => name.into_owned(),
        Err(e) => {
            tracing::warn!(raw_name, error = %e, "file name is not valid UTF-8");
            return ApiError::NotFound.into_response();
        }
    };

    let result = ctx
        .cache
        .get_or_load(&file_name, || load_file(&ctx.bucket, &file_name))
        .await;

    match result {
        Ok(content) => warp::reply::json(&*content).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Reads and parses a stored file, used on cache misses
async fn load_file(bucket: &WeatherBucket, file_name: &str) -> Result<Value, ApiError> {
    if !bucket.exists(file_name).await.map_err(ApiError::storage_fault)? {
        tracing::warn!(file_name, "requested file does not exist");
        return Err(ApiError::NotFound);
    }

    let bytes = bucket.get(file_name).await?;
    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::error!(file_name, error = %e, "stored file is not valid JSON");
        ApiError::Internal
    })
}
