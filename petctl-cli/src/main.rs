//! petctl - owners and pets CRUD service
//!
//! Subcommands:
//! - `serve`: run the HTTP API (PostgreSQL, or in-memory with `--memory`)
//! - `migrate`: create the owners/pets schema and exit

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use commands::migrate::{run_migrate, MigrateArgs};
use commands::serve::{run_serve, ServeArgs};
use config::PetctlConfig;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "petctl",
    author,
    version,
    about = "CRUD API for owners and their pets"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ~/.petctl/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Create the database schema if absent
    Migrate(MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must load before clap reads `env = ...` arguments
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = PetctlConfig::load(cli.config.as_deref())?;

    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        default_level: config.log_level.clone(),
    })?;

    match cli.command {
        Commands::Serve(args) => run_serve(args, &config).await,
        Commands::Migrate(args) => run_migrate(args, &config).await,
    }
}
