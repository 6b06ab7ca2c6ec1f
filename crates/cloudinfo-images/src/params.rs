//! Search parameters and catalog URL construction

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use url::Url;

use crate::error::{ImageError, Result};
use crate::filter::SortOrder;
use crate::types::ImageState;

/// Public instance of the SUSE public cloud information service
pub const DEFAULT_ENDPOINT: &str = "https://susepubliccloudinfo.suse.com";

/// Catalog API version queried when none is given
pub const DEFAULT_API_VERSION: &str = "v1";

/// Criteria for one catalog query.
///
/// Built fresh by the caller for each query; empty `endpoint` and
/// `api_version` fall back to [`DEFAULT_ENDPOINT`] and
/// [`DEFAULT_API_VERSION`]. `state` is kept as the raw string so that an
/// invalid value surfaces as `InvalidState` from the query itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SearchParams {
    /// Base URL of the catalog service
    pub endpoint: String,
    /// API version path segment
    pub api_version: String,
    /// Cloud framework, e.g. "amazon", "microsoft", "google"
    pub cloud: String,
    /// Region code, e.g. "eu-central-1"
    pub region: String,
    /// Lifecycle state to list
    pub state: String,
    /// Optional filter applied to image names
    pub name_regex: String,
    /// Oldest first instead of most recent first
    pub sort_ascending: bool,
}

impl SearchParams {
    /// Query the active images of `cloud` in `region` on the public service
    pub fn new(cloud: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            cloud: cloud.into(),
            region: region.into(),
            state: ImageState::default().to_string(),
            ..Default::default()
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    pub fn with_name_regex(mut self, name_regex: impl Into<String>) -> Self {
        self.name_regex = name_regex.into();
        self
    }

    pub fn with_sort_ascending(mut self, sort_ascending: bool) -> Self {
        self.sort_ascending = sort_ascending;
        self
    }

    /// Endpoint after applying the default
    pub fn resolved_endpoint(&self) -> &str {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            DEFAULT_ENDPOINT
        } else {
            endpoint
        }
    }

    /// API version after applying the default
    pub fn resolved_api_version(&self) -> &str {
        let version = self.api_version.trim().trim_matches('/');
        if version.is_empty() {
            DEFAULT_API_VERSION
        } else {
            version
        }
    }

    /// Validated lifecycle state
    pub fn image_state(&self) -> Result<ImageState> {
        self.state.parse()
    }

    pub fn sort_order(&self) -> SortOrder {
        SortOrder::from_ascending(self.sort_ascending)
    }

    /// Full URL of the catalog document for these parameters:
    /// `{endpoint}/{api_version}/{cloud}/{region}/images/{state}.json`.
    ///
    /// Any path already on the endpoint is kept as a prefix, and trailing
    /// slashes on it make no difference. Segments are percent-encoded, so a
    /// `/` inside `cloud` or `region` cannot add path levels.
    pub fn catalog_url(&self) -> Result<Url> {
        let state = self.image_state()?;
        let endpoint = self.resolved_endpoint();

        for (field, value) in [("cloud", &self.cloud), ("region", &self.region)] {
            if value.trim().is_empty() {
                return Err(ImageError::url_construction(
                    endpoint,
                    format!("{} must not be empty", field),
                ));
            }
        }

        // Repeated trailing slashes would otherwise leave empty segments
        let base = endpoint.trim_end_matches('/');
        let mut url =
            Url::parse(base).map_err(|e| ImageError::url_construction(endpoint, e.to_string()))?;

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ImageError::url_construction(endpoint, "endpoint cannot carry a path")
            })?;
            segments
                .pop_if_empty()
                .push(self.resolved_api_version())
                .push(&self.cloud)
                .push(&self.region)
                .push("images")
                .push(&format!("{}.json", state));
        }

        Ok(url)
    }

    /// Stable identifier of this query, for change detection by callers.
    ///
    /// Hex SHA-256 over the parameters with defaults applied, so a query
    /// spelled with and without the default endpoint hashes the same.
    pub fn query_id(&self) -> String {
        let sort = if self.sort_ascending { "asc" } else { "desc" };
        let fields = [
            self.resolved_endpoint().trim_end_matches('/'),
            self.resolved_api_version(),
            self.cloud.as_str(),
            self.region.as_str(),
            self.state.as_str(),
            self.name_regex.as_str(),
            sort,
        ];

        let mut hasher = Sha256::new();
        for field in fields {
            hasher.update(field.as_bytes());
            hasher.update([0u8]);
        }
        hex::encode(hasher.finalize())
    }
}
