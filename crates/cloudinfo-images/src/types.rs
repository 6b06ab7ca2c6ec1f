//! Image records and lifecycle states as published by the catalog

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ImageError;

/// Lifecycle stage of a published image.
///
/// The catalog service keeps one document per state, so the state is part
/// of the request path rather than a filter applied locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageState {
    /// Current images, recommended for new deployments
    #[default]
    Active,
    /// Superseded but still fully supported
    Inactive,
    /// Scheduled for removal; a replacement is usually named
    Deprecated,
    /// Removed from the provider, kept in the catalog for reference
    Deleted,
}

impl ImageState {
    /// Every state the catalog recognizes
    pub const ALL: [ImageState; 4] = [
        ImageState::Active,
        ImageState::Inactive,
        ImageState::Deprecated,
        ImageState::Deleted,
    ];

    /// Wire form used in the catalog path and documents
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageState::Active => "active",
            ImageState::Inactive => "inactive",
            ImageState::Deprecated => "deprecated",
            ImageState::Deleted => "deleted",
        }
    }

    /// Comma separated list of valid states, for messages
    pub fn valid_list() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ImageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageState {
    type Err = ImageError;

    /// Exact, case-sensitive match against the wire form. Anything else is
    /// rejected; an unknown state is never mapped to a default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| ImageError::invalid_state(s))
    }
}

/// One published machine image snapshot, as listed in the catalog.
///
/// ```json
/// {
///   "name": "suse-sles-15-sp1-v20190624-hvm-ssd-x86_64",
///   "state": "active",
///   "replacementname": "",
///   "replacementid": "",
///   "publishedon": "20190624",
///   "deprecatedon": "",
///   "region": "eu-central-1",
///   "id": "ami-0352b14942c00b04b",
///   "deletedon": ""
/// }
/// ```
///
/// Every field falls back to an empty string when missing from the
/// document or set to `null`, and unknown fields are ignored. Nothing here is validated:
/// records are passed through as the service returns them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    /// Human readable image name
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,

    /// Lifecycle stage as reported by the service
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,

    /// Name of the successor image, empty when none
    #[serde(rename = "replacementname", deserialize_with = "null_as_default")]
    pub replacement_name: String,

    /// Provider ID of the successor image, empty when none
    #[serde(rename = "replacementid", deserialize_with = "null_as_default")]
    pub replacement_id: String,

    /// Publication date, `YYYYMMDD`
    #[serde(rename = "publishedon", deserialize_with = "null_as_default")]
    pub published_on: String,

    /// Deprecation date, `YYYYMMDD` or empty
    #[serde(rename = "deprecatedon", deserialize_with = "null_as_default")]
    pub deprecated_on: String,

    /// Cloud region code
    #[serde(deserialize_with = "null_as_default")]
    pub region: String,

    /// Provider specific image identifier (e.g. an AMI ID)
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,

    /// Deletion date, `YYYYMMDD` or empty
    #[serde(rename = "deletedon", deserialize_with = "null_as_default")]
    pub deleted_on: String,
}

impl Image {
    /// Publication date, if `published_on` is a well formed `YYYYMMDD`
    pub fn published_date(&self) -> Option<NaiveDate> {
        crate::filter::parse_date(&self.published_on)
    }

    /// Whether the catalog names a successor for this image
    pub fn has_replacement(&self) -> bool {
        !self.replacement_id.is_empty() || !self.replacement_name.is_empty()
    }
}

/// Top-level catalog document
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CatalogReply {
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
}

/// Read an explicit `null` as the type's default value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
