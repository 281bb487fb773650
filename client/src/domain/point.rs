//! Trip points: the schedule's mutable unit.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::destination::DestinationId;
use crate::domain::offer::OfferId;

/// Opaque point identifier assigned by the schedule service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(String);

impl PointId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Category of a trip point, fixed by the schedule service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointKind {
    /// Taxi ride.
    Taxi,
    /// Bus ride.
    Bus,
    /// Train ride.
    Train,
    /// Ship passage.
    Ship,
    /// Self-drive leg.
    Drive,
    /// Flight.
    Flight,
    /// Hotel check-in.
    CheckIn,
    /// Sightseeing stop.
    Sightseeing,
    /// Restaurant visit.
    Restaurant,
}

impl PointKind {
    /// Every kind in the canonical editor order.
    pub const ALL: [Self; 9] = [
        Self::Taxi,
        Self::Bus,
        Self::Train,
        Self::Ship,
        Self::Drive,
        Self::Flight,
        Self::CheckIn,
        Self::Sightseeing,
        Self::Restaurant,
    ];

    /// The kebab-case label used on the wire and in the UI.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Taxi => "taxi",
            Self::Bus => "bus",
            Self::Train => "train",
            Self::Ship => "ship",
            Self::Drive => "drive",
            Self::Flight => "flight",
            Self::CheckIn => "check-in",
            Self::Sightseeing => "sightseeing",
            Self::Restaurant => "restaurant",
        }
    }

    /// Parse a wire label; unknown labels yield `None`.
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl std::fmt::Display for PointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scheduled trip leg, in client form.
///
/// Client form is what presenters and views consume; the snake_case service
/// shape lives in [`crate::domain::wire`] and never crosses the model
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    /// Service-assigned identifier.
    pub id: PointId,
    /// Category of the leg.
    #[serde(rename = "type")]
    pub kind: PointKind,
    /// Reference into the destination catalogue.
    pub destination_id: DestinationId,
    /// Scheduled start.
    pub start_date_time: DateTime<Utc>,
    /// Scheduled end; expected, but not required, to be at or after the start.
    pub end_date_time: DateTime<Utc>,
    /// Price excluding offers, in whole currency units.
    pub base_price: u32,
    /// Selected offers, each belonging to this kind's offer group.
    pub offer_ids: Vec<OfferId>,
    /// Favourite flag, the only field toggled in place by the list UI.
    pub is_favorite: bool,
}

impl Point {
    /// Scheduled duration of the leg.
    pub fn duration(&self) -> TimeDelta {
        self.end_date_time - self.start_date_time
    }
}

/// A point being created, before the service assigns its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointDraft {
    /// Category of the leg.
    #[serde(rename = "type")]
    pub kind: PointKind,
    /// Reference into the destination catalogue.
    pub destination_id: DestinationId,
    /// Scheduled start.
    pub start_date_time: DateTime<Utc>,
    /// Scheduled end.
    pub end_date_time: DateTime<Utc>,
    /// Price excluding offers, in whole currency units.
    pub base_price: u32,
    /// Selected offers for the chosen kind.
    pub offer_ids: Vec<OfferId>,
    /// Initial favourite flag.
    pub is_favorite: bool,
}
