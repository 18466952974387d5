//! Construction of the object store behind the bucket gateway

use std::path::PathBuf;
use std::sync::Arc;

use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;

use super::{StorageError, WeatherBucket};

/// Where stored weather files live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// A Google Cloud Storage bucket. Credentials come from the standard
    /// Google environment variables unless a service account file is given.
    Gcs { service_account: Option<PathBuf> },
    /// A directory on the local filesystem, created if missing
    Local { root: PathBuf },
    /// A process-local map, lost on exit
    Memory,
}

impl StoreBackend {
    /// Builds the bucket gateway for this backend
    ///
    /// # Arguments
    /// * `bucket` - Bucket name; only used by the GCS backend and in logs
    pub fn open(&self, bucket: &str) -> Result<WeatherBucket, StorageError> {
        match self {
            StoreBackend::Gcs { service_account } => {
                let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(bucket);
                if let Some(path) = service_account {
                    builder = builder.with_service_account_path(path.to_string_lossy());
                }
                let store = builder.build()?;
                tracing::info!(bucket, "using Google Cloud Storage bucket");
                Ok(WeatherBucket::new(Arc::new(store), bucket))
            }
            StoreBackend::Local { root } => {
                std::fs::create_dir_all(root)?;
                let store = LocalFileSystem::new_with_prefix(root)?;
                tracing::info!(bucket, root = %root.display(), "using local directory as bucket");
                Ok(WeatherBucket::new(Arc::new(store), bucket).without_attributes())
            }
            StoreBackend::Memory => {
                tracing::warn!(bucket, "using in-memory bucket, stored files are lost on exit");
                Ok(WeatherBucket::new(Arc::new(InMemory::new()), bucket))
            }
        }
    }
}
