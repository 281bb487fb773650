//! Filter and sort criteria applied to the point collection.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::domain::point::Point;

/// Time-window filters offered by the filter control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterKind {
    /// Every point regardless of schedule.
    #[default]
    Everything,
    /// Points that have not started yet.
    Future,
    /// Points currently underway, boundaries included.
    Present,
    /// Points already finished.
    Past,
}

impl FilterKind {
    /// Every filter in display order.
    pub const ALL: [Self; 4] = [Self::Everything, Self::Future, Self::Present, Self::Past];

    /// The query-parameter label.
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Everything => "everything",
            Self::Future => "future",
            Self::Present => "present",
            Self::Past => "past",
        }
    }

    /// Parse a query-parameter label; unknown labels yield `None`.
    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_param() == value)
    }

    /// Whether `point` falls inside this filter's window at `now`.
    ///
    /// A point starting or ending exactly at `now` counts as present, so
    /// the three dated windows partition any collection.
    pub fn matches(self, point: &Point, now: DateTime<Utc>) -> bool {
        match self {
            Self::Everything => true,
            Self::Future => point.start_date_time > now,
            Self::Past => point.end_date_time < now,
            Self::Present => point.start_date_time <= now && point.end_date_time >= now,
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_param())
    }
}

/// Orderings offered by the sort control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Chronological by start date, the default.
    #[default]
    Day,
    /// Reserved control; applies no ordering.
    Event,
    /// Longest duration first.
    Time,
    /// Cheapest base price first.
    Price,
    /// Reserved control; applies no ordering.
    Offers,
}

impl SortKey {
    /// Every key in display order.
    pub const ALL: [Self; 5] = [
        Self::Day,
        Self::Event,
        Self::Time,
        Self::Price,
        Self::Offers,
    ];

    /// The query-parameter label.
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Event => "event",
            Self::Time => "time",
            Self::Price => "price",
            Self::Offers => "offers",
        }
    }

    /// Parse a query-parameter label; unknown labels yield `None`.
    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_param() == value)
    }

    /// Compare two points under this key.
    ///
    /// The reserved keys return [`Ordering::Equal`] for every pair, which
    /// leaves a stable sort untouched.
    pub fn compare(self, a: &Point, b: &Point) -> Ordering {
        match self {
            Self::Day => a.start_date_time.cmp(&b.start_date_time),
            Self::Event | Self::Offers => Ordering::Equal,
            Self::Time => b.duration().cmp(&a.duration()),
            Self::Price => a.base_price.cmp(&b.base_price),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_param())
    }
}

/// A filter and sort selection, each falling back to its default when unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Criteria {
    /// Selected filter, if any.
    pub filter: Option<FilterKind>,
    /// Selected sort, if any.
    pub sort: Option<SortKey>,
}

impl Criteria {
    /// The effective filter.
    pub fn filter_kind(self) -> FilterKind {
        self.filter.unwrap_or_default()
    }

    /// The effective sort.
    pub fn sort_key(self) -> SortKey {
        self.sort.unwrap_or_default()
    }
}
