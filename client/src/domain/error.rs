//! Domain-level error type shared by the model, stores, and presenters.
//!
//! These errors are surface agnostic. The demo shell reports them through
//! `color-eyre`; a real rendering surface would map them to its own envelope.

use crate::domain::destination::DestinationId;
use crate::domain::offer::OfferId;
use crate::domain::point::{PointId, PointKind};
use crate::domain::ports::{NavigatorError, ScheduleGatewayError, ViewError};

/// Errors surfaced by the trip-planning domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The initial load failed; nothing was committed.
    #[error("loading trip data failed: {source}")]
    Load {
        /// Gateway failure that aborted the load.
        source: ScheduleGatewayError,
    },
    /// A point mutation failed after its busy/idle bracket closed.
    #[error("point mutation failed: {source}")]
    Mutation {
        /// Gateway failure behind the mutation.
        source: ScheduleGatewayError,
    },
    /// A point references a destination the catalogue does not hold.
    #[error("point references unknown destination {id}")]
    UnknownDestination {
        /// The dangling destination reference.
        id: DestinationId,
    },
    /// A point references an offer missing from its kind's offer group.
    #[error("point references unknown offer {id} for kind {kind}")]
    UnknownOffer {
        /// The dangling offer reference.
        id: OfferId,
        /// Kind whose offer group was consulted.
        kind: PointKind,
    },
    /// A mutation targeted a point the model does not hold.
    #[error("unknown point {id}")]
    UnknownPoint {
        /// The missing point id.
        id: PointId,
    },
    /// The navigation backend rejected a query-string read or write.
    #[error("navigation failed: {source}")]
    Navigation {
        /// Navigator failure behind the operation.
        source: NavigatorError,
    },
    /// A rendering surface rejected a pushed view-state.
    #[error("view rendering failed: {source}")]
    Render {
        /// View failure behind the update.
        source: ViewError,
    },
    /// Invariant violation inside the domain.
    #[error("internal error: {message}")]
    Internal {
        /// What went wrong.
        message: String,
    },
}

impl Error {
    /// Wrap a gateway failure that aborted the initial load.
    pub fn load(source: ScheduleGatewayError) -> Self {
        Self::Load { source }
    }

    /// Wrap a gateway failure behind a point mutation.
    pub fn mutation(source: ScheduleGatewayError) -> Self {
        Self::Mutation { source }
    }

    /// A point referenced a destination missing from the catalogue.
    pub fn unknown_destination(id: DestinationId) -> Self {
        Self::UnknownDestination { id }
    }

    /// A point referenced an offer missing from its kind's group.
    pub fn unknown_offer(id: OfferId, kind: PointKind) -> Self {
        Self::UnknownOffer { id, kind }
    }

    /// A mutation targeted a point the model does not hold.
    pub fn unknown_point(id: PointId) -> Self {
        Self::UnknownPoint { id }
    }

    /// Invariant violation inside the domain.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<NavigatorError> for Error {
    fn from(source: NavigatorError) -> Self {
        Self::Navigation { source }
    }
}

impl From<ViewError> for Error {
    fn from(source: ViewError) -> Self {
        Self::Render { source }
    }
}
