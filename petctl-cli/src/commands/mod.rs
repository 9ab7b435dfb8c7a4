//! Subcommand implementations

pub mod migrate;
pub mod serve;

use anyhow::{Context, Result};

use crate::config::PetctlConfig;

/// Database URL from the flag/env value, falling back to the config file
pub(crate) fn database_url(arg: Option<String>, config: &PetctlConfig) -> Result<String> {
    arg.or_else(|| config.database.url.clone()).context(
        "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, .env, or ~/.petctl/config.toml",
    )
}
