//! Config command

use anyhow::Result;
use cloudinfo_core::HierarchicalConfigLoader;

use crate::cli::{CatalogArgs, ConfigCommands, ConfigShowArgs};
use crate::output;

pub fn run(cmd: ConfigCommands, overrides: &CatalogArgs) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => show(args, overrides),
    }
}

fn show(args: ConfigShowArgs, overrides: &CatalogArgs) -> Result<()> {
    let config = super::resolve_config(overrides)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    output::header("Catalog");
    output::kv("Endpoint", &config.catalog.endpoint);
    output::kv("API version", &config.catalog.api_version);

    output::header("Network");
    let timeout = match config.network.timeout() {
        Some(timeout) => format!("{}s", timeout.as_secs()),
        None => "disabled".to_string(),
    };
    output::kv("Timeout", &timeout);
    output::kv("User agent", &config.network.user_agent);

    if let Ok(loader) = HierarchicalConfigLoader::new() {
        let path = loader.config_path();
        let status = if path.exists() { "" } else { " (not present)" };
        output::header("Sources");
        output::kv("Config file", &format!("{}{}", path, status));
    }

    Ok(())
}
