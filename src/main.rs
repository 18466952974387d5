//! Weather Vault - archive historical weather data in a storage bucket
//!
//! An HTTP service that fetches daily temperature history from the Open-Meteo
//! archive API, stores each response as a JSON file in a bucket, and serves
//! the stored files back.

use std::sync::Arc;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use weather_vault::cache::ContentCache;
use weather_vault::cli::{Cli, StartupConfig};
use weather_vault::data::ArchiveClient;
use weather_vault::server::{self, AppContext};

/// Resolves once Ctrl-C is received
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Variables from .env must be in place before clap reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        // Report like any other argument error: usage hint and exit code 2
        Err(e) => Cli::command().error(ErrorKind::ArgumentConflict, e).exit(),
    };

    weather_vault::init_tracing(&config.log_level);

    let archive = ArchiveClient::with_base_url(config.archive_url.clone(), config.upstream_timeout)?;
    let bucket = config.backend.open(&config.bucket)?;
    let cache = ContentCache::new(config.cache_capacity);

    tracing::info!(
        bucket = bucket.name(),
        archive_url = archive.base_url(),
        timeout = ?config.upstream_timeout,
        cache_capacity = cache.capacity(),
        "weather vault starting"
    );

    let ctx = Arc::new(AppContext::new(archive, bucket, cache));
    server::serve(ctx, config.addr, shutdown_signal()).await?;

    Ok(())
}
