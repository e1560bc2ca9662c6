//! Configuration layering for CLI commands

use anyhow::{Context, Result};
use deposit_attest::ClientConfig;
use std::path::Path;

fn layered(path: Option<&Path>, host: Option<String>) -> Result<ClientConfig> {
    let config = match path {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ClientConfig::default(),
    };

    let mut config = config
        .apply_env()
        .context("Invalid environment configuration")?;
    if let Some(host) = host {
        config.host = host;
    }
    Ok(config)
}

/// Config for commands that request addresses; credentials are required
pub fn load(path: Option<&Path>, host: Option<String>) -> Result<ClientConfig> {
    let config = layered(path, host)?;
    config.validate().context("Incomplete configuration")?;
    Ok(config)
}

/// Config for key lookups, which need no credentials
pub fn load_unauthenticated(path: Option<&Path>, host: Option<String>) -> Result<ClientConfig> {
    layered(path, host)
}
