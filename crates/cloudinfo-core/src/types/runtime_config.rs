//! Runtime configuration types
//!
//! These types define where catalog queries go and how the HTTP transport
//! behaves. They are resolved once by the caller and injected into each
//! query; the query engine itself reads no process-wide settings.

use cloudinfo_images::{SearchParams, DEFAULT_API_VERSION, DEFAULT_ENDPOINT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// Catalog service location
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Network and HTTP configuration
    #[serde(default)]
    pub network: NetworkConfig,
}

impl RuntimeConfig {
    /// Search parameters for `cloud`/`region` pointed at the configured
    /// catalog; state and filters are left to the caller.
    pub fn search_params(&self, cloud: impl Into<String>, region: impl Into<String>) -> SearchParams {
        SearchParams::new(cloud, region)
            .with_endpoint(self.catalog.endpoint.clone())
            .with_api_version(self.catalog.api_version.clone())
    }
}

/// Catalog service location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CatalogConfig {
    /// Base URL of the catalog service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API version path segment
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_version: default_api_version(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

/// Network and HTTP configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfig {
    /// Whole-request timeout in seconds, 0 to disable
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// User agent string for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl NetworkConfig {
    /// Request timeout, `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.http_timeout_secs > 0).then(|| Duration::from_secs(self.http_timeout_secs))
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: default_http_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_http_timeout() -> u64 {
    30
}
fn default_user_agent() -> String {
    format!(
        "cloudinfo/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
