//! Generated trip catalogue types.
//!
//! This module defines the output types from catalogue generation. These
//! types are independent of the client's domain types to avoid circular
//! dependencies; point kinds travel as wire labels rather than enums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One gallery photo attached to a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoSeed {
    /// Image URL.
    pub src: String,
    /// Alt text for the image.
    pub description: String,
}

/// A generated destination record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationSeed {
    /// Unique identifier for the destination.
    pub id: Uuid,
    /// City name.
    pub name: String,
    /// Short flavour text; may be empty.
    pub description: String,
    /// Gallery photos.
    pub photos: Vec<PhotoSeed>,
}

/// One purchasable extra attached to a point kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferSeed {
    /// Unique identifier for the offer.
    pub id: Uuid,
    /// Offer title as shown to the user.
    pub title: String,
    /// Price in whole currency units.
    pub price: u32,
}

/// The offers available for one point kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferGroupSeed {
    /// Wire label of the point kind these offers attach to.
    pub kind: String,
    /// Offers in catalogue order.
    pub offers: Vec<OfferSeed>,
}

/// A generated schedule point.
///
/// # Example
///
/// ```
/// use example_data::PointSeed;
/// use uuid::Uuid;
///
/// let point = PointSeed {
///     id: Uuid::nil(),
///     kind: "taxi".to_owned(),
///     destination_id: Uuid::nil(),
///     date_from: "2026-03-18T10:00:00Z".parse().expect("valid timestamp"),
///     date_to: "2026-03-18T11:00:00Z".parse().expect("valid timestamp"),
///     base_price: 120,
///     offer_ids: vec![],
///     is_favorite: false,
/// };
///
/// assert_eq!(point.kind, "taxi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointSeed {
    /// Unique identifier for the point.
    pub id: Uuid,
    /// Wire label of the point kind.
    pub kind: String,
    /// Destination this point visits.
    pub destination_id: Uuid,
    /// Scheduled start.
    pub date_from: DateTime<Utc>,
    /// Scheduled end; never earlier than `date_from`.
    pub date_to: DateTime<Utc>,
    /// Price excluding offers, in whole currency units.
    pub base_price: u32,
    /// Selected offers from the matching offer group.
    pub offer_ids: Vec<Uuid>,
    /// Favourite flag.
    pub is_favorite: bool,
}

/// A complete generated catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripCatalogueSeed {
    /// Every destination points may reference.
    pub destinations: Vec<DestinationSeed>,
    /// One offer group per point kind.
    pub offer_groups: Vec<OfferGroupSeed>,
    /// Generated schedule points.
    pub points: Vec<PointSeed>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_seed_serializes_to_camel_case() {
        let point = PointSeed {
            id: Uuid::nil(),
            kind: "flight".to_owned(),
            destination_id: Uuid::nil(),
            date_from: "2026-03-18T10:00:00Z".parse().expect("valid timestamp"),
            date_to: "2026-03-19T10:00:00Z".parse().expect("valid timestamp"),
            base_price: 600,
            offer_ids: vec![Uuid::nil()],
            is_favorite: true,
        };
        let json = serde_json::to_string(&point).expect("serialize");
        assert!(json.contains("destinationId"));
        assert!(json.contains("dateFrom"));
        assert!(json.contains("dateTo"));
        assert!(json.contains("basePrice"));
        assert!(json.contains("offerIds"));
        assert!(json.contains("isFavorite"));
    }

    #[test]
    fn catalogue_round_trips_through_json() {
        let catalogue = TripCatalogueSeed {
            destinations: vec![DestinationSeed {
                id: Uuid::nil(),
                name: "Geneva".to_owned(),
                description: String::new(),
                photos: vec![PhotoSeed {
                    src: "https://loremflickr.com/248/152?random=1".to_owned(),
                    description: "Lake at dawn".to_owned(),
                }],
            }],
            offer_groups: vec![OfferGroupSeed {
                kind: "taxi".to_owned(),
                offers: vec![OfferSeed {
                    id: Uuid::nil(),
                    title: "Choose the radio station".to_owned(),
                    price: 30,
                }],
            }],
            points: vec![],
        };

        let json = serde_json::to_string(&catalogue).expect("serialize");
        assert!(json.contains("offerGroups"));
        let decoded: TripCatalogueSeed = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, catalogue);
    }
}
