//! Storage module for weather artifacts
//!
//! This module provides the gateway to the bucket that holds stored weather
//! files. The bucket itself is any [`object_store::ObjectStore`]; which one is
//! chosen at startup (Google Cloud Storage, a local directory, or memory).

mod backend;
mod bucket;

use thiserror::Error;

pub use backend::StoreBackend;
pub use bucket::WeatherBucket;

/// Errors that can occur when talking to the bucket
#[derive(Debug, Error)]
pub enum StorageError {
    /// The named object does not exist
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Any other failure reported by the storage backend
    #[error("Storage backend error: {0}")]
    Backend(#[source] object_store::Error),

    /// Local filesystem setup failed
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<object_store::Error> for StorageError {
    fn from(error: object_store::Error) -> Self {
        match error {
            object_store::Error::NotFound { path, .. } => StorageError::NotFound(path),
            other => StorageError::Backend(other),
        }
    }
}
