//! HTTP server command for the petctl API

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use petctl_server::db::DEFAULT_MAX_CONNECTIONS;
use petctl_server::http::server::DEFAULT_REQUEST_TIMEOUT;
use petctl_server::{connect_postgres, run_server, AppState, MemoryStore, ServerConfig};

use crate::config::PetctlConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to [default: 127.0.0.1:3030]
    #[arg(long, short = 'b', env = "PETCTL_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Request timeout in seconds [default: 30]
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections [default: 5]
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Keep all data in process memory instead of PostgreSQL (lost on exit)
    #[arg(long)]
    pub memory: bool,
}

/// Merge flags over the config file, then built-in defaults
fn server_config(args: &ServeArgs, config: &PetctlConfig) -> ServerConfig {
    let defaults = ServerConfig::default();
    ServerConfig {
        bind_addr: args.bind.or(config.server.bind).unwrap_or(defaults.bind_addr),
        cors_permissive: args.cors_permissive || config.server.cors_permissive.unwrap_or(false),
        request_timeout: args
            .timeout
            .or(config.server.timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT),
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &PetctlConfig) -> Result<()> {
    let server_config = server_config(&args, config);

    let state = if args.memory {
        tracing::warn!("Using in-memory store; data will not survive a restart");
        AppState::new(MemoryStore::new())
    } else {
        let database_url = super::database_url(args.database_url, config)?;
        let max_connections = args
            .max_connections
            .or(config.database.max_connections)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        let store = connect_postgres(&database_url, max_connections)
            .await
            .context("Failed to prepare database")?;
        AppState::new(store)
    };

    tracing::info!("Starting petctl server on {}", server_config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(state, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
