pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod services;
pub mod slug;

pub use config::Config;
pub use db::Store;

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set. Calling this twice
/// returns an error from the subscriber registry; embedders that install
/// their own subscriber should simply skip this helper.
pub fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    Ok(())
}
