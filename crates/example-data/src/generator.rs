//! Deterministic trip catalogue generation.
//!
//! This module provides the core generation function that produces a
//! reproducible catalogue of destinations, offers, and schedule points.
//! The same seed and reference time always produce identical output.

use chrono::{DateTime, TimeDelta, Utc};
use fake::Fake;
use fake::faker::address::raw::CityName;
use fake::faker::lorem::raw::Sentence;
use fake::locales::EN;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::seed::{
    DestinationSeed, OfferGroupSeed, OfferSeed, PhotoSeed, PointSeed, TripCatalogueSeed,
};

/// Every point kind label the client understands, paired with its canned
/// offer titles. Sightseeing carries no offers.
const KIND_OFFER_TITLES: [(&str, &[&str]); 9] = [
    ("taxi", &["Upgrade to a business class", "Choose the radio station"]),
    ("bus", &["Choose seats", "Add luggage"]),
    ("train", &["Book a meal", "Switch to comfort class"]),
    ("ship", &["Add breakfast", "Upgrade the cabin"]),
    ("drive", &["Rent a child seat", "Add full insurance"]),
    (
        "flight",
        &["Add luggage", "Switch to comfort class", "Add meal", "Choose seats"],
    ),
    ("check-in", &["Add breakfast", "Late checkout"]),
    ("sightseeing", &[]),
    ("restaurant", &["Book a window table", "Live music"]),
];

/// Number of destinations in a generated catalogue.
const DESTINATION_COUNT: usize = 6;

/// Maximum number of photos per destination.
const MAX_PHOTOS: usize = 5;

/// Probability of a destination having no description (1 in 5).
const EMPTY_DESCRIPTION_NUMERATOR: u32 = 1;

/// Probability denominator for empty descriptions.
const EMPTY_DESCRIPTION_DENOMINATOR: u32 = 5;

/// Minimum offer price in whole currency units.
const OFFER_PRICE_MIN: u32 = 5;

/// Maximum offer price in whole currency units.
const OFFER_PRICE_MAX: u32 = 200;

/// Minimum point base price in whole currency units.
const BASE_PRICE_MIN: u32 = 20;

/// Maximum point base price in whole currency units.
const BASE_PRICE_MAX: u32 = 1_200;

/// How far a point may start before or after the reference time, in minutes.
const START_OFFSET_MINUTES: i64 = 7_200;

/// Minimum point duration in minutes.
const DURATION_MIN_MINUTES: i64 = 20;

/// Maximum point duration in minutes (two days).
const DURATION_MAX_MINUTES: i64 = 2_880;

/// Probability of a point being a favourite (3 in 10).
const FAVORITE_NUMERATOR: u32 = 3;

/// Probability denominator for favourite selection.
const FAVORITE_DENOMINATOR: u32 = 10;

/// Generates a deterministic trip catalogue.
///
/// The `seed` value initialises the RNG and `reference_time` anchors every
/// point's schedule window, so identical inputs always produce an identical
/// catalogue. The generated catalogue has:
///
/// - Unique UUIDs (deterministically generated)
/// - One offer group per point kind the client understands
/// - Points referencing only generated destinations and offers
/// - Points spread around the reference time, ending after they start
///
/// # Example
///
/// ```
/// use example_data::generate_trip_catalogue;
///
/// let reference = "2026-03-18T12:00:00Z".parse().expect("valid timestamp");
/// let catalogue = generate_trip_catalogue(42, reference, 5);
///
/// assert_eq!(catalogue.points.len(), 5);
/// // Same inputs produce an identical catalogue.
/// assert_eq!(catalogue, generate_trip_catalogue(42, reference, 5));
/// ```
#[must_use]
pub fn generate_trip_catalogue(
    seed: u64,
    reference_time: DateTime<Utc>,
    point_count: usize,
) -> TripCatalogueSeed {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let destinations: Vec<DestinationSeed> = (0..DESTINATION_COUNT)
        .map(|_| generate_destination(&mut rng))
        .collect();

    let offer_groups: Vec<OfferGroupSeed> = KIND_OFFER_TITLES
        .iter()
        .map(|(kind, titles)| generate_offer_group(&mut rng, kind, titles))
        .collect();

    let points = (0..point_count)
        .map(|_| generate_point(&mut rng, reference_time, &destinations, &offer_groups))
        .collect();

    TripCatalogueSeed {
        destinations,
        offer_groups,
        points,
    }
}

/// Generates a single destination with the provided RNG.
fn generate_destination(rng: &mut ChaCha8Rng) -> DestinationSeed {
    let id = Uuid::from_u128(rng.random());
    let name: String = CityName(EN).fake_with_rng(rng);

    // Some destinations have no flavour text, matching real catalogues.
    let description: String =
        if rng.random_ratio(EMPTY_DESCRIPTION_NUMERATOR, EMPTY_DESCRIPTION_DENOMINATOR) {
            String::new()
        } else {
            Sentence(EN, 4..10).fake_with_rng(rng)
        };

    let photo_count = rng.random_range(0..=MAX_PHOTOS);
    let photos = (0..photo_count).map(|_| generate_photo(rng)).collect();

    DestinationSeed {
        id,
        name,
        description,
        photos,
    }
}

/// Generates a single gallery photo with the provided RNG.
fn generate_photo(rng: &mut ChaCha8Rng) -> PhotoSeed {
    let marker: u32 = rng.random_range(1..=1_000);
    PhotoSeed {
        src: format!("https://loremflickr.com/248/152?random={marker}"),
        description: Sentence(EN, 3..8).fake_with_rng(rng),
    }
}

/// Generates the offer group for one point kind.
///
/// Every canned title becomes an offer with a deterministic identifier and
/// a random price; kinds without canned titles get an empty group.
fn generate_offer_group(
    rng: &mut ChaCha8Rng,
    kind: &str,
    titles: &[&str],
) -> OfferGroupSeed {
    let offers = titles
        .iter()
        .map(|title| OfferSeed {
            id: Uuid::from_u128(rng.random()),
            title: (*title).to_owned(),
            price: rng.random_range(OFFER_PRICE_MIN..=OFFER_PRICE_MAX),
        })
        .collect();

    OfferGroupSeed {
        kind: kind.to_owned(),
        offers,
    }
}

/// Generates a single schedule point with the provided RNG.
///
/// The point references a generated destination and selects its offers from
/// the group matching its kind, keeping the catalogue internally consistent.
fn generate_point(
    rng: &mut ChaCha8Rng,
    reference_time: DateTime<Utc>,
    destinations: &[DestinationSeed],
    offer_groups: &[OfferGroupSeed],
) -> PointSeed {
    let kind = KIND_OFFER_TITLES
        .choose(rng)
        .map(|(label, _)| *label)
        .unwrap_or("taxi");

    let destination_id = destinations
        .choose(rng)
        .map(|destination| destination.id)
        .unwrap_or_default();

    let offer_ids = offer_groups
        .iter()
        .find(|group| group.kind == kind)
        .map(|group| select_offer_subset(rng, &group.offers))
        .unwrap_or_default();

    let start_offset =
        TimeDelta::minutes(rng.random_range(-START_OFFSET_MINUTES..=START_OFFSET_MINUTES));
    let duration =
        TimeDelta::minutes(rng.random_range(DURATION_MIN_MINUTES..=DURATION_MAX_MINUTES));
    let date_from = reference_time + start_offset;

    PointSeed {
        id: Uuid::from_u128(rng.random()),
        kind: kind.to_owned(),
        destination_id,
        date_from,
        date_to: date_from + duration,
        base_price: rng.random_range(BASE_PRICE_MIN..=BASE_PRICE_MAX),
        offer_ids,
        is_favorite: rng.random_ratio(FAVORITE_NUMERATOR, FAVORITE_DENOMINATOR),
    }
}

/// Selects a deterministic subset of a group's offers, possibly empty.
fn select_offer_subset(rng: &mut ChaCha8Rng, offers: &[OfferSeed]) -> Vec<Uuid> {
    if offers.is_empty() {
        return Vec::new();
    }

    let count = rng.random_range(0..=offers.len());
    let mut ids: Vec<Uuid> = offers.iter().map(|offer| offer.id).collect();
    ids.shuffle(rng);
    ids.truncate(count);
    ids
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::{fixture, rstest};

    use super::*;

    fn reference_time() -> DateTime<Utc> {
        "2026-03-18T12:00:00Z".parse().expect("valid timestamp")
    }

    #[fixture]
    fn catalogue() -> TripCatalogueSeed {
        generate_trip_catalogue(42, reference_time(), 20)
    }

    #[rstest]
    fn generates_the_requested_point_count(catalogue: TripCatalogueSeed) {
        assert_eq!(catalogue.points.len(), 20);
        assert_eq!(catalogue.destinations.len(), DESTINATION_COUNT);
    }

    #[rstest]
    fn generation_is_deterministic(catalogue: TripCatalogueSeed) {
        assert_eq!(catalogue, generate_trip_catalogue(42, reference_time(), 20));
    }

    #[rstest]
    fn different_seeds_produce_different_catalogues(catalogue: TripCatalogueSeed) {
        let other = generate_trip_catalogue(7, reference_time(), 20);

        assert_ne!(
            catalogue.points.first().map(|point| point.id),
            other.points.first().map(|point| point.id)
        );
    }

    #[rstest]
    fn every_kind_gets_an_offer_group(catalogue: TripCatalogueSeed) {
        let kinds: Vec<_> = catalogue
            .offer_groups
            .iter()
            .map(|group| group.kind.as_str())
            .collect();
        let expected: Vec<_> = KIND_OFFER_TITLES.iter().map(|(kind, _)| *kind).collect();

        assert_eq!(kinds, expected);
    }

    #[rstest]
    fn points_reference_generated_destinations(catalogue: TripCatalogueSeed) {
        let ids: HashSet<_> = catalogue
            .destinations
            .iter()
            .map(|destination| destination.id)
            .collect();

        assert!(
            catalogue
                .points
                .iter()
                .all(|point| ids.contains(&point.destination_id))
        );
    }

    #[rstest]
    fn point_offers_come_from_the_matching_group(catalogue: TripCatalogueSeed) {
        for point in &catalogue.points {
            let group = catalogue
                .offer_groups
                .iter()
                .find(|group| group.kind == point.kind)
                .expect("every point kind should have a group");
            let ids: HashSet<_> = group.offers.iter().map(|offer| offer.id).collect();

            assert!(
                point.offer_ids.iter().all(|id| ids.contains(id)),
                "point {} selects offers outside its group",
                point.id
            );
        }
    }

    #[rstest]
    fn points_end_after_they_start(catalogue: TripCatalogueSeed) {
        assert!(
            catalogue
                .points
                .iter()
                .all(|point| point.date_to > point.date_from)
        );
    }

    #[rstest]
    fn sightseeing_has_no_offers(catalogue: TripCatalogueSeed) {
        let group = catalogue
            .offer_groups
            .iter()
            .find(|group| group.kind == "sightseeing")
            .expect("sightseeing group should exist");

        assert!(group.offers.is_empty());
    }

    #[rstest]
    fn offer_prices_stay_in_bounds(catalogue: TripCatalogueSeed) {
        assert!(
            catalogue
                .offer_groups
                .iter()
                .flat_map(|group| &group.offers)
                .all(|offer| (OFFER_PRICE_MIN..=OFFER_PRICE_MAX).contains(&offer.price))
        );
    }
}
