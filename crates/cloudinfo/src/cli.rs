//! CLI argument parsing with clap

use clap::{Args, Parser, Subcommand};
use cloudinfo_images::{validate_name_regex, validate_state, ImageState};

/// cloudinfo - Look up published public cloud images
#[derive(Parser, Debug)]
#[command(name = "cloudinfo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the configured catalog service
#[derive(Args, Debug, Default)]
pub struct CatalogArgs {
    /// Base URL of the catalog service
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Catalog API version
    #[arg(long, global = true)]
    pub api_version: Option<String>,

    /// Request timeout in seconds (0 disables)
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List images published for a cloud and region
    Images(ImagesArgs),

    /// List the image states the catalog publishes
    States(StatesArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Show version information
    Version(VersionArgs),
}

// Images command
#[derive(Args, Debug)]
pub struct ImagesArgs {
    /// Cloud framework (e.g. amazon, microsoft, google)
    #[arg(long, value_parser = non_empty)]
    pub cloud: String,

    /// Region code (e.g. eu-central-1)
    #[arg(long, value_parser = non_empty)]
    pub region: String,

    /// Image lifecycle state
    #[arg(long, default_value = "active", value_parser = parse_state)]
    pub state: ImageState,

    /// Only keep images whose name matches this regular expression
    #[arg(long, value_parser = parse_name_regex)]
    pub name_regex: Option<String>,

    /// Oldest images first (default is most recent first)
    #[arg(long)]
    pub sort_ascending: bool,

    /// Output as JSON
    #[arg(long, conflicts_with = "ids_only")]
    pub json: bool,

    /// Print only image IDs, one per line
    #[arg(long)]
    pub ids_only: bool,
}

// States command
#[derive(Args, Debug)]
pub struct StatesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Config commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show resolved configuration
    Show(ConfigShowArgs),
}

#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

fn non_empty(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        Err("value must not be empty".to_string())
    } else {
        Ok(value.to_string())
    }
}

fn parse_state(value: &str) -> Result<ImageState, String> {
    validate_state(value).map_err(|e| e.to_string())
}

fn parse_name_regex(value: &str) -> Result<String, String> {
    validate_name_regex(value)
        .map(|_| value.to_string())
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("cloudinfo").chain(args.iter().copied()))
    }

    #[test]
    fn test_images_defaults() {
        let cli = parse(&["images", "--cloud", "amazon", "--region", "eu-central-1"]).unwrap();
        match cli.command {
            Commands::Images(args) => {
                assert_eq!(args.cloud, "amazon");
                assert_eq!(args.region, "eu-central-1");
                assert_eq!(args.state, ImageState::Active);
                assert!(args.name_regex.is_none());
                assert!(!args.sort_ascending);
            }
            other => panic!("Expected images command, got {:?}", other),
        }
    }

    #[test]
    fn test_images_all_flags() {
        let cli = parse(&[
            "images",
            "--cloud",
            "amazon",
            "--region",
            "eu-central-1",
            "--state",
            "deprecated",
            "--name-regex",
            "suse-sles-.*-sapcal.*-hvm-ssd-x86_64",
            "--sort-ascending",
            "--ids-only",
            "--endpoint",
            "http://localhost:8080",
            "--timeout",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.catalog.endpoint.as_deref(), Some("http://localhost:8080"));
        assert_eq!(cli.catalog.timeout, Some(5));
        match cli.command {
            Commands::Images(args) => {
                assert_eq!(args.state, ImageState::Deprecated);
                assert_eq!(
                    args.name_regex.as_deref(),
                    Some("suse-sles-.*-sapcal.*-hvm-ssd-x86_64")
                );
                assert!(args.sort_ascending);
                assert!(args.ids_only);
            }
            other => panic!("Expected images command, got {:?}", other),
        }
    }

    #[test]
    fn test_images_rejects_invalid_input() {
        let images = |extra: &[&'static str]| {
            let mut args = vec!["images", "--cloud", "amazon", "--region", "eu-central-1"];
            args.extend_from_slice(extra);
            parse(&args)
        };

        let err = images(&["--state", "retired"]).unwrap_err();
        assert!(err.to_string().contains("Invalid image state"));

        assert!(images(&["--name-regex", "sles-("]).is_err());
        assert!(images(&["--json", "--ids-only"]).is_err());

        assert!(parse(&["images", "--cloud", "", "--region", "eu-central-1"]).is_err());
        assert!(parse(&["images", "--region", "eu-central-1"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["config", "show", "--api-version", "v2", "-vv"]).unwrap();
        assert_eq!(cli.catalog.api_version.as_deref(), Some("v2"));
        assert_eq!(cli.verbose, 2);
    }
}
