//! Create the owners/pets schema without starting the server

use anyhow::{Context, Result};
use clap::Parser;

use petctl_server::db::{create_pool, migrations};

use crate::config::PetctlConfig;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

pub async fn run_migrate(args: MigrateArgs, config: &PetctlConfig) -> Result<()> {
    let database_url = super::database_url(args.database_url, config)?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    println!("Schema is up to date");
    Ok(())
}
