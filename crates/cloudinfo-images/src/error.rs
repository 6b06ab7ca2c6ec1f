//! Error types for cloudinfo-images

use thiserror::Error;

use crate::types::ImageState;

/// Result type alias using cloudinfo-images's Error type
pub type Result<T> = std::result::Result<T, ImageError>;

/// Catalog query error types
///
/// None of these are retried by the engine; callers decide whether a
/// failed query is worth running again.
#[derive(Error, Debug)]
pub enum ImageError {
    /// Requested state is not one the catalog publishes
    #[error("Invalid image state: {state}. Valid states: {valid}", valid = ImageState::valid_list())]
    InvalidState { state: String },

    /// Name filter is not a valid regular expression
    #[error("Invalid name pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Endpoint and path segments could not form a URL
    #[error("Cannot build catalog URL from endpoint '{endpoint}': {reason}")]
    UrlConstruction { endpoint: String, reason: String },

    /// Transport failure reaching the catalog
    #[error("Error while accessing {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Catalog answered with something other than 200
    #[error("Unexpected HTTP status {status} while accessing {url}")]
    UnexpectedStatus { url: String, status: u16 },

    /// Response body is not the expected JSON document
    #[error("Error while decoding remote response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ImageError {
    /// Create an invalid state error
    pub fn invalid_state(state: impl Into<String>) -> Self {
        Self::InvalidState {
            state: state.into(),
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create a URL construction error
    pub fn url_construction(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UrlConstruction {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Create a fetch error
    pub fn fetch(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Fetch {
            url: url.into(),
            source,
        }
    }

    /// Create an unexpected status error
    pub fn unexpected_status(url: impl Into<String>, status: u16) -> Self {
        Self::UnexpectedStatus {
            url: url.into(),
            status,
        }
    }

    /// Create a decode error
    pub fn decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }

    /// URL the failed request targeted, when one was formed
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Fetch { url, .. }
            | Self::UnexpectedStatus { url, .. }
            | Self::Decode { url, .. } => Some(url),
            _ => None,
        }
    }

    /// HTTP status for `UnexpectedStatus`
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
