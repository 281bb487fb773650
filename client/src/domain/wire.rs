//! Service-side shapes for points.
//!
//! The schedule service speaks snake_case and calls the destination
//! reference `destination`; the client keeps camelCase shapes with a
//! `destination_id` field. Points are the only type that differs between
//! the two sides, so only they get explicit wire twins here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::destination::DestinationId;
use crate::domain::offer::OfferId;
use crate::domain::point::{Point, PointDraft, PointId, PointKind};

/// A point as the schedule service sends and receives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointWire {
    /// Service-assigned identifier.
    pub id: PointId,
    /// Category of the leg.
    #[serde(rename = "type")]
    pub kind: PointKind,
    /// Reference into the destination catalogue.
    pub destination: DestinationId,
    /// Scheduled start.
    pub date_from: DateTime<Utc>,
    /// Scheduled end.
    pub date_to: DateTime<Utc>,
    /// Price excluding offers.
    pub base_price: u32,
    /// Selected offer references.
    pub offers: Vec<OfferId>,
    /// Favourite flag.
    pub is_favorite: bool,
}

/// A new point as posted to the schedule service, without an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointDraftWire {
    /// Category of the leg.
    #[serde(rename = "type")]
    pub kind: PointKind,
    /// Reference into the destination catalogue.
    pub destination: DestinationId,
    /// Scheduled start.
    pub date_from: DateTime<Utc>,
    /// Scheduled end.
    pub date_to: DateTime<Utc>,
    /// Price excluding offers.
    pub base_price: u32,
    /// Selected offer references.
    pub offers: Vec<OfferId>,
    /// Initial favourite flag.
    pub is_favorite: bool,
}

impl PointDraftWire {
    /// Attach the identifier the service minted for this draft.
    pub fn into_point_wire(self, id: PointId) -> PointWire {
        PointWire {
            id,
            kind: self.kind,
            destination: self.destination,
            date_from: self.date_from,
            date_to: self.date_to,
            base_price: self.base_price,
            offers: self.offers,
            is_favorite: self.is_favorite,
        }
    }
}

impl From<PointWire> for Point {
    fn from(wire: PointWire) -> Self {
        Self {
            id: wire.id,
            kind: wire.kind,
            destination_id: wire.destination,
            start_date_time: wire.date_from,
            end_date_time: wire.date_to,
            base_price: wire.base_price,
            offer_ids: wire.offers,
            is_favorite: wire.is_favorite,
        }
    }
}

impl From<Point> for PointWire {
    fn from(point: Point) -> Self {
        Self {
            id: point.id,
            kind: point.kind,
            destination: point.destination_id,
            date_from: point.start_date_time,
            date_to: point.end_date_time,
            base_price: point.base_price,
            offers: point.offer_ids,
            is_favorite: point.is_favorite,
        }
    }
}

impl From<PointDraft> for PointDraftWire {
    fn from(draft: PointDraft) -> Self {
        Self {
            kind: draft.kind,
            destination: draft.destination_id,
            date_from: draft.start_date_time,
            date_to: draft.end_date_time,
            base_price: draft.base_price,
            offers: draft.offer_ids,
            is_favorite: draft.is_favorite,
        }
    }
}
