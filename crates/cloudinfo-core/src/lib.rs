//! # cloudinfo-core
//!
//! Core library for the cloudinfo CLI providing:
//! - Runtime configuration with layered precedence (embedded defaults,
//!   user file, environment)
//! - The core error type

pub mod config;
pub mod error;
pub mod types;

pub use config::HierarchicalConfigLoader;
pub use error::{Error, Result};
pub use types::{CatalogConfig, NetworkConfig, RuntimeConfig};
