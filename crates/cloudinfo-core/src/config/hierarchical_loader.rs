//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. User config (~/.cloudinfo/config.yaml)
//! 3. Environment variables (CLOUDINFO_* prefix)
//! 4. CLI flags (handled by caller)

use crate::error::{Error, Result};
use crate::types::{CatalogConfig, NetworkConfig, RuntimeConfig};
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::debug;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

/// Name of the user config file inside the config directory
const CONFIG_FILE: &str = "config.yaml";

/// Runtime config as read from the user file; absent sections keep the
/// layer below
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RuntimeConfigFile {
    catalog: Option<CatalogConfig>,
    network: Option<NetworkConfig>,
}

/// Configuration hierarchy loader
pub struct HierarchicalConfigLoader {
    /// Base directory for configuration files
    config_dir: Utf8PathBuf,
}

impl HierarchicalConfigLoader {
    /// Create a new hierarchical config loader
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self { config_dir })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    /// Get the standard config directory (~/.cloudinfo)
    ///
    /// HOME wins over the platform lookup so containers with a remapped
    /// home behave like the shell does.
    fn get_config_dir() -> Result<Utf8PathBuf> {
        let home = env::var("HOME")
            .ok()
            .map(std::path::PathBuf::from)
            .or_else(dirs::home_dir)
            .ok_or_else(|| Error::invalid_config("Could not determine home directory"))?;

        let home = Utf8PathBuf::from_path_buf(home)
            .map_err(|p| Error::invalid_config(format!("Home directory is not UTF-8: {:?}", p)))?;

        Ok(home.join(".cloudinfo"))
    }

    /// Load runtime configuration with hierarchical precedence
    pub fn load_runtime_config(&self) -> Result<RuntimeConfig> {
        // Start with embedded defaults
        let mut config = Self::load_embedded_config::<RuntimeConfig>("runtime-defaults.yaml")?;

        // Load from user config if it exists
        let config_path = self.config_path();
        if config_path.exists() {
            debug!("Loading runtime config from {}", config_path);
            let file_config = self.load_yaml_file::<RuntimeConfigFile>(&config_path)?;
            config = Self::merge_runtime_config(config, file_config);
        }

        // Apply environment variable overrides
        config = self.apply_env_overrides(config)?;

        Ok(config)
    }

    /// Load an embedded configuration file
    fn load_embedded_config<T: DeserializeOwned>(filename: &str) -> Result<T> {
        let embedded_file = EmbeddedConfigs::get(filename).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", filename))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", filename))
        })?;

        let config: T = serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                filename, e
            ))
        })?;

        Ok(config)
    }

    /// Load a YAML file and parse it
    fn load_yaml_file<T: DeserializeOwned>(&self, path: &Utf8Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        let config: T = serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))?;
        Ok(config)
    }

    /// Merge the user file over a base config, section by section
    fn merge_runtime_config(base: RuntimeConfig, overlay: RuntimeConfigFile) -> RuntimeConfig {
        RuntimeConfig {
            catalog: overlay.catalog.unwrap_or(base.catalog),
            network: overlay.network.unwrap_or(base.network),
        }
    }

    /// Apply environment variable overrides to runtime config
    fn apply_env_overrides(&self, mut config: RuntimeConfig) -> Result<RuntimeConfig> {
        // Catalog location
        if let Ok(val) = env::var("CLOUDINFO_ENDPOINT") {
            config.catalog.endpoint = val;
        }

        if let Ok(val) = env::var("CLOUDINFO_API_VERSION") {
            config.catalog.api_version = val;
        }

        // Network
        if let Ok(val) = env::var("CLOUDINFO_HTTP_TIMEOUT_SECS") {
            config.network.http_timeout_secs = val.parse().map_err(|_| {
                Error::invalid_config("CLOUDINFO_HTTP_TIMEOUT_SECS must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("CLOUDINFO_USER_AGENT") {
            config.network.user_agent = val;
        }

        Ok(config)
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Path of the user config file
    pub fn config_path(&self) -> Utf8PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    const ENV_VARS: [&str; 4] = [
        "CLOUDINFO_ENDPOINT",
        "CLOUDINFO_API_VERSION",
        "CLOUDINFO_HTTP_TIMEOUT_SECS",
        "CLOUDINFO_USER_AGENT",
    ];

    fn create_temp_loader() -> (HierarchicalConfigLoader, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_dir =
            Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).expect("Invalid UTF-8 path");
        let loader = HierarchicalConfigLoader::with_dir(config_dir);
        (loader, temp_dir)
    }

    fn clear_env() {
        for var in ENV_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_load_runtime_config_defaults() {
        clear_env();
        let (loader, _temp) = create_temp_loader();
        let config = loader.load_runtime_config().unwrap();
        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(
            config.catalog.endpoint,
            "https://susepubliccloudinfo.suse.com"
        );
        assert_eq!(config.network.http_timeout_secs, 30);
    }

    #[test]
    #[serial]
    fn test_load_runtime_config_from_file() {
        clear_env();
        let (loader, _temp) = create_temp_loader();

        let config_content = r#"
catalog:
  endpoint: "http://mirror.example.com/cloudinfo"
network:
  http-timeout-secs: 5
"#;
        fs::write(loader.config_path(), config_content).unwrap();

        let config = loader.load_runtime_config().unwrap();
        assert_eq!(config.catalog.endpoint, "http://mirror.example.com/cloudinfo");
        assert_eq!(config.catalog.api_version, "v1");
        assert_eq!(config.network.http_timeout_secs, 5);
    }

    #[test]
    #[serial]
    fn test_invalid_file_is_reported_with_path() {
        clear_env();
        let (loader, _temp) = create_temp_loader();
        fs::write(loader.config_path(), "network: [not, a, map]\n").unwrap();

        let err = loader.load_runtime_config().unwrap_err();
        match err {
            Error::InvalidConfig { message } => assert!(message.contains("config.yaml")),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        let (loader, _temp) = create_temp_loader();
        fs::write(
            loader.config_path(),
            "catalog:\n  endpoint: http://from-file.local\n",
        )
        .unwrap();

        env::set_var("CLOUDINFO_ENDPOINT", "http://from-env.local");
        env::set_var("CLOUDINFO_API_VERSION", "v2");
        env::set_var("CLOUDINFO_HTTP_TIMEOUT_SECS", "0");
        env::set_var("CLOUDINFO_USER_AGENT", "env-agent");

        let config = loader.load_runtime_config().unwrap();
        assert_eq!(config.catalog.endpoint, "http://from-env.local");
        assert_eq!(config.catalog.api_version, "v2");
        assert_eq!(config.network.timeout(), None);
        assert_eq!(config.network.user_agent, "env-agent");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_env_timeout() {
        clear_env();
        let (loader, _temp) = create_temp_loader();
        env::set_var("CLOUDINFO_HTTP_TIMEOUT_SECS", "soon");

        let result = loader.load_runtime_config();
        clear_env();

        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_merge_runtime_config() {
        let base = RuntimeConfig::default();
        let network = NetworkConfig {
            http_timeout_secs: 999,
            ..Default::default()
        };
        let overlay = RuntimeConfigFile {
            catalog: Some(CatalogConfig {
                api_version: "v9".to_string(),
                ..Default::default()
            }),
            network: Some(network),
        };

        let merged = HierarchicalConfigLoader::merge_runtime_config(base, overlay);
        assert_eq!(merged.network.http_timeout_secs, 999);
        assert_eq!(merged.catalog.api_version, "v9");
    }

    #[test]
    fn test_merge_keeps_base_sections_missing_from_file() {
        // Base values that differ from the built-in defaults
        let mut base = RuntimeConfig::default();
        base.catalog.endpoint = "http://embedded.local".to_string();
        base.network.http_timeout_secs = 7;
        base.network.user_agent = "embedded-agent".to_string();

        let overlay: RuntimeConfigFile =
            serde_yaml_ng::from_str("catalog:\n  api-version: v2\n").unwrap();
        let merged = HierarchicalConfigLoader::merge_runtime_config(base.clone(), overlay);

        // Present section replaces the base one, missing keys use defaults
        assert_eq!(merged.catalog.api_version, "v2");
        assert_eq!(merged.catalog.endpoint, CatalogConfig::default().endpoint);
        // Absent section is kept from the base
        assert_eq!(merged.network, base.network);
    }

    #[test]
    #[serial]
    fn test_file_without_section_keeps_embedded_section() {
        clear_env();
        let (loader, _temp) = create_temp_loader();
        fs::write(loader.config_path(), "catalog:\n  api-version: v2\n").unwrap();

        let embedded =
            HierarchicalConfigLoader::load_embedded_config::<RuntimeConfig>("runtime-defaults.yaml")
                .unwrap();
        let config = loader.load_runtime_config().unwrap();

        assert_eq!(config.catalog.api_version, "v2");
        assert_eq!(config.network, embedded.network);
    }

    #[test]
    fn test_config_path() {
        let (loader, temp) = create_temp_loader();
        assert_eq!(
            loader.config_path().as_std_path(),
            temp.path().join("config.yaml")
        );
    }
}
