//! Version command

use crate::cli::VersionArgs;
use anyhow::Result;
use serde::Serialize;

/// Build and component versions
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    /// CLI version
    pub version: String,

    /// Catalog client library version
    pub catalog_client: String,

    /// Git commit SHA (short)
    pub commit: Option<String>,

    /// Build date
    pub build_date: Option<String>,

    /// Target triple
    pub target: Option<String>,
}

impl VersionInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            catalog_client: cloudinfo_images::VERSION.to_string(),
            commit: option_env!("GIT_SHA").map(String::from),
            build_date: option_env!("BUILD_DATE").map(String::from),
            target: option_env!("TARGET").map(String::from),
        }
    }

    /// One-line summary, e.g. `cloudinfo 0.4.0 (abc1234)`
    pub fn summary(&self) -> String {
        match &self.commit {
            Some(commit) => format!("cloudinfo {} ({})", self.version, commit),
            None => format!("cloudinfo {}", self.version),
        }
    }
}

pub fn run(args: VersionArgs) -> Result<()> {
    let info = VersionInfo::current();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("{}", info.summary());
        println!("Catalog client: {}", info.catalog_client);
        if let Some(date) = &info.build_date {
            println!("Build date:     {}", date);
        }
        if let Some(target) = &info.target {
            println!("Target:         {}", target);
        }
    }

    Ok(())
}
