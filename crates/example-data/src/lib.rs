//! Deterministic trip catalogue generation for demonstration purposes.
//!
//! This crate produces believable, reproducible trip data for the client's
//! demo shell and integration tests. Its types are independent of the
//! client's domain types to avoid a dependency cycle.
//!
//! # Overview
//!
//! A generated catalogue contains:
//!
//! - Destinations with names, flavour text, and photo galleries
//! - Per-kind offer groups with canned titles and random prices
//! - Schedule points referencing only generated destinations and offers
//!
//! # Example
//!
//! ```
//! use example_data::generate_trip_catalogue;
//!
//! let reference = "2026-03-18T12:00:00Z".parse().expect("valid timestamp");
//! let catalogue = generate_trip_catalogue(42, reference, 3);
//!
//! assert_eq!(catalogue.points.len(), 3);
//! ```

mod generator;
mod seed;

pub use generator::generate_trip_catalogue;
pub use seed::{
    DestinationSeed, OfferGroupSeed, OfferSeed, PhotoSeed, PointSeed, TripCatalogueSeed,
};
