//! The trip model: owns the point schedule and its reference catalogues.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use mockable::Clock;
use tokio::sync::Semaphore;

use crate::domain::criteria::Criteria;
use crate::domain::destination::{Destination, DestinationId};
use crate::domain::error::Error;
use crate::domain::event::{Listener, ModelEvent, ModelEventKind, Notifier};
use crate::domain::offer::OfferGroup;
use crate::domain::point::{Point, PointDraft, PointId, PointKind};
use crate::domain::ports::ScheduleGateway;
use crate::domain::wire::{PointDraftWire, PointWire};

#[derive(Debug, Default)]
struct Collections {
    points: Vec<Point>,
    destinations: Vec<Destination>,
    offer_groups: Vec<OfferGroup>,
}

/// Single source of truth for trip data on the client.
///
/// The model starts empty; [`TripModel::load`] fills all three collections
/// from the gateway in one shot. Reads are filtered and sorted on the way
/// out, so the stored order stays exactly as the service sent it. Mutations
/// run one at a time behind a busy/idle notification bracket.
pub struct TripModel {
    gateway: Arc<dyn ScheduleGateway>,
    clock: Arc<dyn Clock>,
    state: Mutex<Collections>,
    notifier: Notifier<ModelEvent>,
    busy: AtomicBool,
    mutation_gate: Semaphore,
}

impl TripModel {
    /// Build an empty model over a gateway and a clock.
    pub fn new(gateway: Arc<dyn ScheduleGateway>, clock: Arc<dyn Clock>) -> Self {
        Self {
            gateway,
            clock,
            state: Mutex::new(Collections::default()),
            notifier: Notifier::new(),
            busy: AtomicBool::new(false),
            mutation_gate: Semaphore::new(1),
        }
    }

    /// Register a listener for one kind of model event.
    pub fn subscribe(
        &self,
        kind: ModelEventKind,
        listener: Listener<ModelEvent>,
    ) -> Result<(), Error> {
        self.notifier.subscribe(kind, listener)
    }

    /// Fetch points, destinations, and offer groups, then commit all three.
    ///
    /// The three fetches run concurrently and the commit is all-or-nothing:
    /// a failure on any endpoint leaves the previous collections untouched.
    /// Success emits [`ModelEvent::Load`]; any failure, including a failing
    /// load listener, emits [`ModelEvent::Error`] before propagating.
    pub async fn load(&self) -> Result<(), Error> {
        match self.fetch_and_commit().await {
            Ok(()) => Ok(()),
            Err(error) => {
                // The load failure outranks any error-listener failure.
                let _ = self.notifier.notify(&ModelEvent::Error {
                    message: error.to_string(),
                });
                Err(error)
            }
        }
    }

    async fn fetch_and_commit(&self) -> Result<(), Error> {
        let (points, destinations, offer_groups) = tokio::try_join!(
            self.gateway.points(),
            self.gateway.destinations(),
            self.gateway.offer_groups(),
        )
        .map_err(Error::load)?;

        {
            let mut state = self.lock_state()?;
            state.points = points.into_iter().map(Point::from).collect();
            state.destinations = destinations;
            state.offer_groups = offer_groups;
        }

        self.notifier.notify(&ModelEvent::Load)
    }

    /// Points passing `criteria`, ordered by its sort key.
    ///
    /// Filtering evaluates against the clock's current instant. The sort is
    /// stable, so the reserved keys that compare everything equal preserve
    /// the service's ordering.
    pub fn points(&self, criteria: Criteria) -> Result<Vec<Point>, Error> {
        let now = self.clock.utc();
        let filter = criteria.filter_kind();
        let mut selected: Vec<Point> = {
            let state = self.lock_state()?;
            state
                .points
                .iter()
                .filter(|point| filter.matches(point, now))
                .cloned()
                .collect()
        };

        let sort = criteria.sort_key();
        selected.sort_by(|a, b| sort.compare(a, b));
        Ok(selected)
    }

    /// The full destination catalogue.
    pub fn destinations(&self) -> Result<Vec<Destination>, Error> {
        Ok(self.lock_state()?.destinations.clone())
    }

    /// The full per-kind offer catalogue.
    pub fn offer_groups(&self) -> Result<Vec<OfferGroup>, Error> {
        Ok(self.lock_state()?.offer_groups.clone())
    }

    /// Look up one destination by id.
    pub fn destination(&self, id: &DestinationId) -> Result<Option<Destination>, Error> {
        let state = self.lock_state()?;
        Ok(state
            .destinations
            .iter()
            .find(|destination| &destination.id == id)
            .cloned())
    }

    /// Look up the offer group for one point kind.
    pub fn offer_group(&self, kind: PointKind) -> Result<Option<OfferGroup>, Error> {
        let state = self.lock_state()?;
        Ok(state
            .offer_groups
            .iter()
            .find(|group| group.kind == kind)
            .cloned())
    }

    /// Look up one point by id, unfiltered.
    pub fn point(&self, id: &PointId) -> Result<Option<Point>, Error> {
        let state = self.lock_state()?;
        Ok(state.points.iter().find(|point| &point.id == id).cloned())
    }

    /// Whether a mutation bracket is currently open.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Push an edited point to the service and commit the stored version.
    ///
    /// The point must already exist in the model; an unknown id fails
    /// without touching the gateway.
    pub async fn update_point(&self, point: Point) -> Result<(), Error> {
        self.bracketed(self.perform_update(point)).await
    }

    /// Post a draft to the service and append the minted point.
    pub async fn add_point(&self, draft: PointDraft) -> Result<(), Error> {
        self.bracketed(self.perform_add(draft)).await
    }

    /// Delete a point on the service and drop it from the model.
    ///
    /// The point must already exist in the model; an unknown id fails
    /// without touching the gateway.
    pub async fn delete_point(&self, id: &PointId) -> Result<(), Error> {
        self.bracketed(self.perform_delete(id)).await
    }

    /// Run one mutation inside the busy/idle bracket.
    ///
    /// The gate serialises mutations: a second call waits for the first
    /// bracket to close rather than interleaving notifications. `Idle` is
    /// always emitted once `Busy` was, even when the operation fails, and
    /// an operation error takes precedence over an idle listener error.
    async fn bracketed<T>(&self, op: impl Future<Output = Result<T, Error>>) -> Result<T, Error> {
        let _permit = self
            .mutation_gate
            .acquire()
            .await
            .map_err(|_| Error::internal("mutation gate closed"))?;

        self.busy.store(true, Ordering::SeqCst);
        let begin = self.notifier.notify(&ModelEvent::Busy);

        let outcome = match begin {
            Ok(()) => op.await,
            Err(error) => Err(error),
        };

        self.busy.store(false, Ordering::SeqCst);
        let end = self.notifier.notify(&ModelEvent::Idle);

        match (outcome, end) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(error)) => Err(error),
            (Err(error), _) => Err(error),
        }
    }

    async fn perform_update(&self, point: Point) -> Result<(), Error> {
        let id = point.id.clone();
        {
            let state = self.lock_state()?;
            if !state.points.iter().any(|held| held.id == id) {
                return Err(Error::unknown_point(id));
            }
        }

        let wire = PointWire::from(point);
        let stored = self
            .gateway
            .update_point(&wire)
            .await
            .map_err(Error::mutation)?;
        let stored = Point::from(stored);

        let mut state = self.lock_state()?;
        let slot = state
            .points
            .iter_mut()
            .find(|held| held.id == id)
            .ok_or_else(|| Error::internal(format!("point {id} vanished during update")))?;
        *slot = stored;
        Ok(())
    }

    async fn perform_add(&self, draft: PointDraft) -> Result<(), Error> {
        let wire = PointDraftWire::from(draft);
        let stored = self
            .gateway
            .add_point(&wire)
            .await
            .map_err(Error::mutation)?;

        let mut state = self.lock_state()?;
        state.points.push(Point::from(stored));
        Ok(())
    }

    async fn perform_delete(&self, id: &PointId) -> Result<(), Error> {
        {
            let state = self.lock_state()?;
            if !state.points.iter().any(|held| &held.id == id) {
                return Err(Error::unknown_point(id.clone()));
            }
        }

        self.gateway
            .delete_point(id)
            .await
            .map_err(Error::mutation)?;

        let mut state = self.lock_state()?;
        state.points.retain(|held| &held.id != id);
        Ok(())
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, Collections>, Error> {
        self.state
            .lock()
            .map_err(|_| Error::internal("trip collections lock poisoned"))
    }
}

#[cfg(test)]
#[path = "trip_model_tests.rs"]
mod tests;
