//! In-memory schedule gateway for offline runs and tests.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{ScheduleGateway, ScheduleGatewayError};
use crate::domain::wire::{PointDraftWire, PointWire};
use crate::domain::{Destination, OfferGroup, PointId};

#[derive(Debug, Default)]
struct MemoryState {
    points: Vec<PointWire>,
    destinations: Vec<Destination>,
    offer_groups: Vec<OfferGroup>,
}

/// Gateway holding the whole schedule in process memory.
///
/// Mutations behave like the remote service: updates and deletes of unknown
/// points are refused, and adds mint fresh ids.
pub struct MemoryScheduleGateway {
    state: Mutex<MemoryState>,
}

impl MemoryScheduleGateway {
    /// Build a gateway over fixed collections.
    pub fn new(
        points: Vec<PointWire>,
        destinations: Vec<Destination>,
        offer_groups: Vec<OfferGroup>,
    ) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                points,
                destinations,
                offer_groups,
            }),
        }
    }

    /// Build a gateway from a generated trip catalogue.
    ///
    /// # Errors
    ///
    /// Returns a decode error when the catalogue carries a point kind label
    /// the client does not recognise.
    #[cfg(feature = "example-data")]
    pub fn from_catalogue(
        catalogue: &example_data::TripCatalogueSeed,
    ) -> Result<Self, ScheduleGatewayError> {
        let destinations = catalogue
            .destinations
            .iter()
            .map(seed::destination)
            .collect();
        let offer_groups = catalogue
            .offer_groups
            .iter()
            .map(seed::offer_group)
            .collect::<Result<Vec<_>, _>>()?;
        let points = catalogue
            .points
            .iter()
            .map(seed::point)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(points, destinations, offer_groups))
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, MemoryState>, ScheduleGatewayError> {
        self.state
            .lock()
            .map_err(|_| ScheduleGatewayError::rejected("gateway state lock poisoned"))
    }
}

#[async_trait]
impl ScheduleGateway for MemoryScheduleGateway {
    async fn points(&self) -> Result<Vec<PointWire>, ScheduleGatewayError> {
        Ok(self.lock_state()?.points.clone())
    }

    async fn destinations(&self) -> Result<Vec<Destination>, ScheduleGatewayError> {
        Ok(self.lock_state()?.destinations.clone())
    }

    async fn offer_groups(&self) -> Result<Vec<OfferGroup>, ScheduleGatewayError> {
        Ok(self.lock_state()?.offer_groups.clone())
    }

    async fn update_point(&self, point: &PointWire) -> Result<PointWire, ScheduleGatewayError> {
        let mut state = self.lock_state()?;
        let slot = state
            .points
            .iter_mut()
            .find(|held| held.id == point.id)
            .ok_or_else(|| {
                ScheduleGatewayError::not_found(format!("point {} does not exist", point.id))
            })?;
        *slot = point.clone();
        Ok(point.clone())
    }

    async fn add_point(&self, draft: &PointDraftWire) -> Result<PointWire, ScheduleGatewayError> {
        let minted = draft
            .clone()
            .into_point_wire(PointId::new(Uuid::new_v4().to_string()));
        let mut state = self.lock_state()?;
        state.points.push(minted.clone());
        Ok(minted)
    }

    async fn delete_point(&self, id: &PointId) -> Result<(), ScheduleGatewayError> {
        let mut state = self.lock_state()?;
        if !state.points.iter().any(|held| &held.id == id) {
            return Err(ScheduleGatewayError::not_found(format!(
                "point {id} does not exist"
            )));
        }
        state.points.retain(|held| &held.id != id);
        Ok(())
    }
}

#[cfg(feature = "example-data")]
mod seed {
    //! Conversions from generated catalogue seeds into client shapes.

    use crate::domain::{
        Destination, DestinationId, Offer, OfferGroup, OfferId, Photo, PointId, PointKind,
    };

    use super::{PointWire, ScheduleGatewayError};

    pub(super) fn destination(seed: &example_data::DestinationSeed) -> Destination {
        Destination {
            id: DestinationId::new(seed.id.to_string()),
            name: seed.name.clone(),
            description: seed.description.clone(),
            pictures: seed
                .photos
                .iter()
                .map(|photo| Photo {
                    src: photo.src.clone(),
                    description: photo.description.clone(),
                })
                .collect(),
        }
    }

    pub(super) fn offer_group(
        seed: &example_data::OfferGroupSeed,
    ) -> Result<OfferGroup, ScheduleGatewayError> {
        Ok(OfferGroup {
            kind: kind(&seed.kind)?,
            offers: seed
                .offers
                .iter()
                .map(|offer| Offer {
                    id: OfferId::new(offer.id.to_string()),
                    title: offer.title.clone(),
                    price: offer.price,
                })
                .collect(),
        })
    }

    pub(super) fn point(seed: &example_data::PointSeed) -> Result<PointWire, ScheduleGatewayError> {
        Ok(PointWire {
            id: PointId::new(seed.id.to_string()),
            kind: kind(&seed.kind)?,
            destination: DestinationId::new(seed.destination_id.to_string()),
            date_from: seed.date_from,
            date_to: seed.date_to,
            base_price: seed.base_price,
            offers: seed
                .offer_ids
                .iter()
                .map(|id| OfferId::new(id.to_string()))
                .collect(),
            is_favorite: seed.is_favorite,
        })
    }

    fn kind(label: &str) -> Result<PointKind, ScheduleGatewayError> {
        PointKind::from_wire(label).ok_or_else(|| {
            ScheduleGatewayError::decode(format!("unknown point kind label: {label}"))
        })
    }
}
