//! Command-line and environment configuration for Weather Vault
//!
//! This module parses startup options using clap. Every option can also be
//! set through an environment variable, and `main` loads a `.env` file
//! before parsing so those variables may live there.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use thiserror::Error;

use crate::cache::DEFAULT_CAPACITY;
use crate::data::weather::{DEFAULT_TIMEOUT, OPEN_METEO_ARCHIVE_URL};
use crate::storage::StoreBackend;

/// Error types for startup configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The local backend was chosen without a directory
    #[error("--local-dir (LOCAL_STORE_DIR) is required when --store is 'local'")]
    MissingLocalDir,

    /// A zero timeout would fail every upstream request
    #[error("Upstream timeout must be at least 1 second")]
    ZeroTimeout,

    /// The cache must be able to hold at least one file
    #[error("Cache capacity must be at least 1")]
    ZeroCapacity,
}

/// Kinds of bucket backends selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Google Cloud Storage
    Gcs,
    /// A local directory
    Local,
    /// In-process memory
    Memory,
}

/// Weather Vault - archive Open-Meteo historical weather in a storage bucket
#[derive(Parser, Debug)]
#[command(name = "weather-vault")]
#[command(about = "HTTP service that stores Open-Meteo historical weather data in a bucket")]
#[command(version)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "BIND_ADDRESS", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Name of the bucket holding weather files
    #[arg(long, env = "BUCKET_NAME", default_value = "uniquebuket")]
    pub bucket: String,

    /// Storage backend for the bucket
    #[arg(long, env = "STORE_BACKEND", value_enum, default_value_t = StoreKind::Gcs)]
    pub store: StoreKind,

    /// Directory used as the bucket when --store is 'local'
    #[arg(long, env = "LOCAL_STORE_DIR", value_name = "DIR")]
    pub local_dir: Option<PathBuf>,

    /// Service account key file for Google Cloud Storage
    ///
    /// When unset, credentials are discovered from the usual Google
    /// environment variables.
    #[arg(long, env = "GOOGLE_SERVICE_ACCOUNT", value_name = "FILE")]
    pub service_account: Option<PathBuf>,

    /// Open-Meteo archive endpoint
    #[arg(long, env = "ARCHIVE_API_URL", default_value = OPEN_METEO_ARCHIVE_URL)]
    pub archive_url: String,

    /// Timeout for a single archive request, in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub upstream_timeout_secs: u64,

    /// Number of parsed files kept in memory
    #[arg(long, env = "CACHE_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
    pub cache_capacity: usize,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    /// Socket address the server binds
    pub addr: SocketAddr,
    /// Bucket name
    pub bucket: String,
    /// Backend the bucket lives in
    pub backend: StoreBackend,
    /// Archive API endpoint
    pub archive_url: String,
    /// Bound on each archive request
    pub upstream_timeout: Duration,
    /// Content cache capacity
    pub cache_capacity: usize,
    /// Fallback log filter
    pub log_level: String,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated settings
    /// * `Err(ConfigError)` if the options are inconsistent
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        if cli.upstream_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if cli.cache_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        let backend = match cli.store {
            StoreKind::Gcs => StoreBackend::Gcs {
                service_account: cli.service_account.clone(),
            },
            StoreKind::Local => StoreBackend::Local {
                root: cli.local_dir.clone().ok_or(ConfigError::MissingLocalDir)?,
            },
            StoreKind::Memory => StoreBackend::Memory,
        };

        Ok(StartupConfig {
            addr: SocketAddr::new(cli.host, cli.port),
            bucket: cli.bucket.clone(),
            backend,
            archive_url: cli.archive_url.clone(),
            upstream_timeout: Duration::from_secs(cli.upstream_timeout_secs),
            cache_capacity: cli.cache_capacity,
            log_level: cli.log_level.clone(),
        })
    }
}
