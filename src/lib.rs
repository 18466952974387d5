//! Weather Vault Library
//!
//! Stores Open-Meteo historical weather responses in a storage bucket and
//! serves them back over HTTP. The binary in `main.rs` wires these modules
//! together; integration tests drive them directly.

pub mod cache;
pub mod cli;
pub mod data;
pub mod server;
pub mod storage;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` is used.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();
}
