//! Destination catalogue entries.

use serde::{Deserialize, Serialize};

/// Opaque destination identifier assigned by the schedule service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationId(String);

impl DestinationId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DestinationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A photo attached to a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Image location.
    pub src: String,
    /// Alt text.
    pub description: String,
}

/// One destination from the read-only catalogue.
///
/// The service serves these snake_case and the client keeps them verbatim,
/// so a single shape covers both sides of the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Service-assigned identifier.
    pub id: DestinationId,
    /// Display name, used in route summaries and card headings.
    pub name: String,
    /// Free-form blurb; may be empty.
    pub description: String,
    /// Gallery photos; may be empty.
    pub pictures: Vec<Photo>,
}
