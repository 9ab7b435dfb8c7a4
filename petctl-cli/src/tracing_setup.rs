//! Tracing setup for the petctl binary
//!
//! Usage:
//!   petctl --debug serve                 # Debug logging to console
//!   RUST_LOG=petctl_server=debug petctl  # Fine-grained log control
//!
//! RUST_LOG wins over `--debug`, which wins over `log_level` in the config file.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets debug level if RUST_LOG is not set)
    pub debug: bool,
    /// Fallback filter from the config file
    pub default_level: Option<String>,
}

impl TracingConfig {
    fn fallback_filter(&self) -> String {
        if self.debug {
            "debug".to_string()
        } else {
            self.default_level
                .clone()
                .unwrap_or_else(|| "info".to_string())
        }
    }
}

/// Initialize console tracing
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.fallback_filter()))
        .map_err(|err| anyhow!("invalid log filter: {}", err))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
