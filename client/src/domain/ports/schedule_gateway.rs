//! Driven port for the remote schedule service.
//!
//! The domain owns the wire shapes and the error contract so the model can
//! stay adapter-agnostic; HTTP specifics live behind this boundary.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::destination::Destination;
use crate::domain::offer::OfferGroup;
use crate::domain::point::PointId;
use crate::domain::wire::{PointDraftWire, PointWire};

define_port_error! {
    /// Errors surfaced while calling the schedule service.
    pub enum ScheduleGatewayError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "schedule transport failed: {message}",
        /// The call exceeded its deadline.
        Timeout { message: String } =>
            "schedule request timed out: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "schedule response decode failed: {message}",
        /// The service does not hold the addressed entity.
        NotFound { message: String } =>
            "schedule entity not found: {message}",
        /// The service refused the request as sent.
        Rejected { message: String } =>
            "schedule request rejected: {message}",
    }
}

/// Port for reading and mutating the remote schedule.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleGateway: Send + Sync {
    /// Fetch every scheduled point.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use client::domain::ports::{FixtureScheduleGateway, ScheduleGateway};
    ///
    /// let gateway = FixtureScheduleGateway;
    /// let points = gateway.points().await?;
    /// assert!(points.is_empty());
    /// # Ok::<(), client::domain::ports::ScheduleGatewayError>(())
    /// ```
    async fn points(&self) -> Result<Vec<PointWire>, ScheduleGatewayError>;

    /// Fetch the destination catalogue.
    async fn destinations(&self) -> Result<Vec<Destination>, ScheduleGatewayError>;

    /// Fetch the per-kind offer catalogue.
    async fn offer_groups(&self) -> Result<Vec<OfferGroup>, ScheduleGatewayError>;

    /// Replace an existing point and return the stored version.
    async fn update_point(&self, point: &PointWire) -> Result<PointWire, ScheduleGatewayError>;

    /// Create a point from a draft and return it with its minted id.
    async fn add_point(&self, draft: &PointDraftWire) -> Result<PointWire, ScheduleGatewayError>;

    /// Delete a point.
    async fn delete_point(&self, id: &PointId) -> Result<(), ScheduleGatewayError>;
}

/// Fixture implementation serving an empty schedule.
///
/// Reads return empty collections, updates echo their argument, and adds
/// mint the id `fixture-point`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureScheduleGateway;

#[async_trait]
impl ScheduleGateway for FixtureScheduleGateway {
    async fn points(&self) -> Result<Vec<PointWire>, ScheduleGatewayError> {
        Ok(Vec::new())
    }

    async fn destinations(&self) -> Result<Vec<Destination>, ScheduleGatewayError> {
        Ok(Vec::new())
    }

    async fn offer_groups(&self) -> Result<Vec<OfferGroup>, ScheduleGatewayError> {
        Ok(Vec::new())
    }

    async fn update_point(&self, point: &PointWire) -> Result<PointWire, ScheduleGatewayError> {
        Ok(point.clone())
    }

    async fn add_point(&self, draft: &PointDraftWire) -> Result<PointWire, ScheduleGatewayError> {
        Ok(draft.clone().into_point_wire(PointId::new("fixture-point")))
    }

    async fn delete_point(&self, _id: &PointId) -> Result<(), ScheduleGatewayError> {
        Ok(())
    }
}
