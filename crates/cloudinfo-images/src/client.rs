//! Catalog client: one GET per query, then decode, filter and sort

use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

use crate::error::{ImageError, Result};
use crate::filter::{filter_by_name, sort_by_published, validate_name_regex};
use crate::params::SearchParams;
use crate::types::{CatalogReply, Image, ImageState};

/// Client for the public cloud image catalog.
///
/// Holds only the HTTP transport; it carries no per-query state, so one
/// client can serve any number of concurrent queries.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
}

impl CatalogClient {
    /// Create a client with the default transport settings
    pub fn new() -> reqwest::Result<Self> {
        Self::builder().build()
    }

    /// Start configuring a client
    pub fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::default()
    }

    /// Use a caller supplied HTTP client (proxies, custom TLS, timeouts)
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch the catalog document for `params` and return the matching
    /// images, sorted by publication date.
    ///
    /// Performs exactly one GET. The state is validated before any network
    /// access, and an empty result is a successful answer.
    pub async fn get_images(&self, params: &SearchParams) -> Result<Vec<Image>> {
        let url = params.catalog_url()?;
        let name_filter = validate_name_regex(&params.name_regex)?;

        debug!("Fetching image catalog from: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ImageError::fetch(url.as_str(), e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ImageError::unexpected_status(url.as_str(), status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ImageError::fetch(url.as_str(), e))?;

        let reply: CatalogReply =
            serde_json::from_slice(&body).map_err(|e| ImageError::decode(url.as_str(), e))?;

        debug!("Catalog {} lists {} images", url, reply.images.len());

        let mut images = filter_by_name(reply.images, name_filter.as_ref());
        sort_by_published(&mut images, params.sort_order());

        debug!("{} images match the query", images.len());
        Ok(images)
    }
}

/// Builder for [`CatalogClient`]
#[derive(Debug, Clone)]
pub struct CatalogClientBuilder {
    timeout: Option<Duration>,
    user_agent: String,
}

impl Default for CatalogClientBuilder {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: default_user_agent(),
        }
    }
}

impl CatalogClientBuilder {
    /// Bound the whole request, connect through body
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> reqwest::Result<CatalogClient> {
        let mut builder = reqwest::Client::builder().user_agent(self.user_agent);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(CatalogClient {
            client: builder.build()?,
        })
    }
}

fn default_user_agent() -> String {
    format!("cloudinfo-images/{}", env!("CARGO_PKG_VERSION"))
}

/// Query the catalog with a default client.
///
/// Convenience for one-off lookups; build a [`CatalogClient`] to control
/// timeouts or reuse connections.
pub async fn get_images(params: &SearchParams) -> Result<Vec<Image>> {
    // A bad state must fail before the transport is even built
    params.image_state()?;

    let client = CatalogClient::new().map_err(|e| {
        let url = params
            .catalog_url()
            .map(|u| u.to_string())
            .unwrap_or_default();
        ImageError::fetch(url, e)
    })?;
    client.get_images(params).await
}

/// Check that `state` is one the catalog publishes.
///
/// Usable on its own for early feedback, before any query is attempted.
pub fn validate_state(state: &str) -> Result<ImageState> {
    state.parse()
}
