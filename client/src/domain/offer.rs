//! Offer catalogue entries, grouped per point kind.

use serde::{Deserialize, Serialize};

use crate::domain::point::PointKind;

/// Opaque offer identifier assigned by the schedule service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferId(String);

impl OfferId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OfferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single optional extra offered for a point kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    /// Service-assigned identifier, unique within its group.
    pub id: OfferId,
    /// Display title.
    pub title: String,
    /// Price in whole currency units.
    pub price: u32,
}

/// All offers available for one point kind.
///
/// Like destinations these arrive snake_case and stay that way; the group
/// for a kind may legitimately carry no offers at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferGroup {
    /// The kind this group's offers attach to.
    #[serde(rename = "type")]
    pub kind: PointKind,
    /// Offers selectable for points of this kind.
    pub offers: Vec<Offer>,
}
