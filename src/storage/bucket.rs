//! Bucket gateway for stored weather files
//!
//! Provides a `WeatherBucket` with put / list / exists / get over an injected
//! object store. The gateway holds no state of its own beyond the handle.

use std::sync::Arc;

use futures::TryStreamExt;
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};

use super::StorageError;

/// Handle to the bucket holding weather files
#[derive(Debug, Clone)]
pub struct WeatherBucket {
    /// Backend the objects live in
    store: Arc<dyn ObjectStore>,
    /// Bucket name, for logging
    name: String,
    /// Whether the backend can record object attributes such as content type
    record_attributes: bool,
}

impl WeatherBucket {
    /// Creates a gateway over an already constructed object store
    pub fn new(store: Arc<dyn ObjectStore>, name: impl Into<String>) -> Self {
        Self {
            store,
            name: name.into(),
            record_attributes: true,
        }
    }

    /// Stops recording content types on written objects.
    ///
    /// The local filesystem backend rejects writes that carry attributes.
    pub fn without_attributes(mut self) -> Self {
        self.record_attributes = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Writes an object, replacing any existing object with the same key
    ///
    /// # Arguments
    /// * `key` - Object name
    /// * `bytes` - Object content
    /// * `content_type` - MIME type recorded on the object
    pub async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &'static str) -> Result<(), StorageError> {
        let mut attributes = Attributes::new();
        if self.record_attributes {
            attributes.insert(Attribute::ContentType, content_type.into());
        }
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        self.store
            .put_opts(&Path::from(key), PutPayload::from(bytes), options)
            .await?;

        tracing::debug!(bucket = %self.name, key, "object written");
        Ok(())
    }

    /// Returns the name of every object in the bucket, in no particular order
    pub async fn list(&self) -> Result<Vec<String>, StorageError> {
        let keys = self
            .store
            .list(None)
            .map_ok(|meta| meta.location.to_string())
            .try_collect::<Vec<_>>()
            .await?;

        Ok(keys)
    }

    /// Checks whether an object exists
    pub async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        match self.store.head(&Path::from(key)).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::Backend(e)),
        }
    }

    /// Reads the full content of an object
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - The object content
    /// * `Err(StorageError::NotFound)` - If no object has this key
    /// * `Err(StorageError::Backend)` - On any other backend failure
    pub async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let result = self.store.get(&Path::from(key)).await?;
        let bytes = result.bytes().await?;
        Ok(bytes.to_vec())
    }
}
