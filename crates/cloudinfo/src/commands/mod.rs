//! CLI command implementations

pub mod config;
pub mod images;
pub mod states;
pub mod version;

use anyhow::{Context, Result};
use cloudinfo_core::{HierarchicalConfigLoader, RuntimeConfig};
use cloudinfo_images::CatalogClient;

use crate::cli::CatalogArgs;

/// Load the runtime config and apply command-line overrides on top
pub fn resolve_config(overrides: &CatalogArgs) -> Result<RuntimeConfig> {
    let loader = HierarchicalConfigLoader::new().context("Failed to locate config directory")?;
    let config = loader
        .load_runtime_config()
        .context("Failed to load runtime config")?;
    Ok(apply_overrides(config, overrides))
}

fn apply_overrides(mut config: RuntimeConfig, overrides: &CatalogArgs) -> RuntimeConfig {
    if let Some(endpoint) = &overrides.endpoint {
        config.catalog.endpoint = endpoint.clone();
    }
    if let Some(api_version) = &overrides.api_version {
        config.catalog.api_version = api_version.clone();
    }
    if let Some(timeout) = overrides.timeout {
        config.network.http_timeout_secs = timeout;
    }
    config
}

/// Catalog client using the configured transport settings
pub fn catalog_client(config: &RuntimeConfig) -> Result<CatalogClient> {
    let mut builder = CatalogClient::builder().with_user_agent(config.network.user_agent.clone());
    if let Some(timeout) = config.network.timeout() {
        builder = builder.with_timeout(timeout);
    }
    builder.build().context("Failed to create HTTP client")
}
