//! Client-side trip planning core.
//!
//! The crate keeps a single authoritative in-memory store of scheduled trip
//! points plus the reference data they lean on (destinations and per-kind
//! offer groups), loaded from and mutated through a remote schedule service.
//! Presenters keep independent UI fragments consistent with that store and
//! with the URL query string; rendering surfaces, the schedule transport, and
//! the navigation backend are ports with adapters under [`outbound`].

pub mod domain;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
