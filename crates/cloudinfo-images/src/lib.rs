//! Public cloud image catalog client
//!
//! This crate provides functionality for:
//! - Building catalog URLs for a cloud, region, and lifecycle state
//! - Fetching and decoding the catalog document
//! - Filtering images by a name pattern
//! - Ordering images by publication date
//!
//! # Example
//!
//! ```no_run
//! use cloudinfo_images::{CatalogClient, SearchParams};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = CatalogClient::new()?;
//!     let params = SearchParams::new("amazon", "eu-central-1")
//!         .with_name_regex("suse-sles-15-sp1-byos.*-hvm-ssd-x86_64");
//!
//!     for image in client.get_images(&params).await? {
//!         println!("{} {}", image.id, image.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod filter;
pub mod params;
pub mod types;

pub use client::{get_images, validate_state, CatalogClient, CatalogClientBuilder};
pub use error::{ImageError, Result};
pub use filter::{validate_name_regex, SortOrder};
pub use params::{SearchParams, DEFAULT_API_VERSION, DEFAULT_ENDPOINT};
pub use types::{Image, ImageState};

/// Version of the cloudinfo-images crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
