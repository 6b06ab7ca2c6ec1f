//! Name filtering and publication-date ordering of catalog records

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::trace;

use crate::error::{ImageError, Result};
use crate::types::Image;

/// Date format used by the catalog for all date fields
const DATE_FORMAT: &str = "%Y%m%d";

/// Ordering of results by publication date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first
    Ascending,
    /// Most recent first
    #[default]
    Descending,
}

impl SortOrder {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }
}

/// Compile a name filter.
///
/// An empty pattern means "no filter" and yields `None`.
pub fn validate_name_regex(pattern: &str) -> Result<Option<Regex>> {
    if pattern.is_empty() {
        return Ok(None);
    }

    Regex::new(pattern)
        .map(Some)
        .map_err(|e| ImageError::invalid_pattern(pattern, e))
}

/// Keep the images whose name contains a match for `regex`.
///
/// Matching is a search, not an anchored full match. With no regex every
/// image is kept.
pub fn filter_by_name(mut images: Vec<Image>, regex: Option<&Regex>) -> Vec<Image> {
    if let Some(regex) = regex {
        images.retain(|image| regex.is_match(&image.name));
        trace!("{} images left after name filter /{}/", images.len(), regex);
    }
    images
}

/// Parse a catalog date (`YYYYMMDD`), `None` unless it is exactly 8 digits
/// naming a real calendar day.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Publication date used as the sort key.
///
/// Unparsable or empty dates map to 1970-01-01 so they sort as the oldest
/// entries instead of failing the query.
pub fn parse_published(value: &str) -> NaiveDate {
    parse_date(value).unwrap_or_else(epoch)
}

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Stable sort by publication date; ties keep their current relative order.
pub fn sort_by_published(images: &mut [Image], order: SortOrder) {
    match order {
        SortOrder::Ascending => images.sort_by_key(|image| parse_published(&image.published_on)),
        SortOrder::Descending => {
            images.sort_by_key(|image| Reverse(parse_published(&image.published_on)))
        }
    }
}
