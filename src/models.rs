//! Data models for scraped reviews.
//!
//! This module defines the records produced by the review extractor and
//! consumed by the sampler and the JSON writer:
//! - [`Field`]: A best-effort text value that is either present or missing
//! - [`ReviewRecord`]: One customer review, with rating and body text
//!
//! The serialized field names (`Stars`, `Description`) match the JSON shape
//! downstream consumers already parse, hence the explicit `rename`s.

use serde::{Serialize, Serializer};
use std::fmt;

/// Placeholder emitted for any field that could not be read from the page.
pub const SENTINEL: &str = "N/A";

/// A single extracted text field.
///
/// Extraction is best-effort per field: when the expected element is absent
/// the field becomes [`Field::Missing`] instead of failing the whole review.
/// Missing fields serialize as [`SENTINEL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// Text read from the document (already normalized).
    Text(String),
    /// The element holding this field was not present.
    Missing,
}

impl Field {
    /// The value as written to output, with [`SENTINEL`] for missing fields.
    pub fn as_str(&self) -> &str {
        match self {
            Field::Text(s) => s,
            Field::Missing => SENTINEL,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }
}

impl From<Option<String>> for Field {
    fn from(value: Option<String>) -> Self {
        value.map_or(Field::Missing, Field::Text)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One customer review as scraped from a listing page.
///
/// Records carry no identity: two reviews with the same text are kept as two
/// records, and nothing is deduplicated across pages.
///
/// # JSON Shape
///
/// ```text
/// { "Stars": "4.0", "Description": "Works as advertised." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRecord {
    /// Star rating with the trailing "out of 5 stars" text removed.
    #[serde(rename = "Stars")]
    pub stars: Field,
    /// Review body text, trimmed.
    #[serde(rename = "Description")]
    pub description: Field,
}

impl ReviewRecord {
    pub fn new(stars: impl Into<Field>, description: impl Into<Field>) -> Self {
        Self {
            stars: stars.into(),
            description: description.into(),
        }
    }
}
