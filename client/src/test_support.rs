//! Test utilities for the client crate.
//!
//! Shared doubles and builders for both unit tests (in `src/`) and
//! integration tests (in `tests/`). Only compiled for tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use tokio::sync::Semaphore;

use crate::domain::ports::{ScheduleGateway, ScheduleGatewayError, View, ViewError};
use crate::domain::wire::{PointDraftWire, PointWire};
use crate::domain::{
    Destination, DestinationId, ModelEvent, ModelEventKind, Offer, OfferGroup, OfferId, PointId,
    PointKind, TripModel,
};

/// Clock whose instant tests move by hand.
pub struct MutableClock {
    now: Mutex<DateTime<Utc>>,
}

impl MutableClock {
    /// A clock frozen at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock forward (or back, with a negative count).
    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.now.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// View that stores every pushed state.
pub struct RecordingView<S> {
    states: Mutex<Vec<S>>,
}

impl<S: Clone> RecordingView<S> {
    /// An empty recording view.
    pub fn new() -> Self {
        Self {
            states: Mutex::new(Vec::new()),
        }
    }

    /// Every state pushed so far, oldest first.
    pub fn states(&self) -> Vec<S> {
        match self.states.lock() {
            Ok(states) => states.clone(),
            Err(_) => panic!("view mutex"),
        }
    }

    /// The most recently pushed state.
    pub fn last(&self) -> Option<S> {
        self.states().pop()
    }
}

impl<S: Clone> Default for RecordingView<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Send> View<S> for RecordingView<S> {
    fn update(&self, state: &S) -> Result<(), ViewError> {
        match self.states.lock() {
            Ok(mut states) => states.push(state.clone()),
            Err(_) => panic!("view mutex"),
        }
        Ok(())
    }
}

/// View that refuses every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingView;

impl<S> View<S> for FailingView {
    fn update(&self, _state: &S) -> Result<(), ViewError> {
        Err(ViewError::render("failing view"))
    }
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(_) => panic!("{what} mutex"),
    }
}

/// Gateway whose read results are scripted per endpoint.
///
/// Reads replay their scripted result on every call. Mutations echo their
/// argument (adds mint `scripted-{n}` ids) unless a mutation failure is
/// scripted, and every call is recorded by name for interaction asserts.
pub struct ScriptedGateway {
    points: Mutex<Result<Vec<PointWire>, ScheduleGatewayError>>,
    destinations: Mutex<Result<Vec<Destination>, ScheduleGatewayError>>,
    offer_groups: Mutex<Result<Vec<OfferGroup>, ScheduleGatewayError>>,
    mutation_error: Mutex<Option<ScheduleGatewayError>>,
    calls: Mutex<Vec<&'static str>>,
    minted: AtomicU32,
}

impl ScriptedGateway {
    /// A gateway scripted to serve these collections.
    pub fn with_data(
        points: Vec<PointWire>,
        destinations: Vec<Destination>,
        offer_groups: Vec<OfferGroup>,
    ) -> Self {
        Self {
            points: Mutex::new(Ok(points)),
            destinations: Mutex::new(Ok(destinations)),
            offer_groups: Mutex::new(Ok(offer_groups)),
            mutation_error: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            minted: AtomicU32::new(0),
        }
    }

    /// Script the points endpoint to fail.
    pub fn fail_points(self, error: ScheduleGatewayError) -> Self {
        *lock(&self.points, "points") = Err(error);
        self
    }

    /// Script the destinations endpoint to fail.
    pub fn fail_destinations(self, error: ScheduleGatewayError) -> Self {
        *lock(&self.destinations, "destinations") = Err(error);
        self
    }

    /// Script the offers endpoint to fail.
    pub fn fail_offer_groups(self, error: ScheduleGatewayError) -> Self {
        *lock(&self.offer_groups, "offer groups") = Err(error);
        self
    }

    /// Script every mutation to fail.
    pub fn fail_mutations(self, error: ScheduleGatewayError) -> Self {
        *lock(&self.mutation_error, "mutation error") = Some(error);
        self
    }

    /// Names of every gateway call so far, in order.
    pub fn recorded_calls(&self) -> Vec<&'static str> {
        lock(&self.calls, "calls").clone()
    }

    fn record(&self, name: &'static str) {
        lock(&self.calls, "calls").push(name);
    }

    fn mutation_gate(&self) -> Result<(), ScheduleGatewayError> {
        match lock(&self.mutation_error, "mutation error").as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ScheduleGateway for ScriptedGateway {
    async fn points(&self) -> Result<Vec<PointWire>, ScheduleGatewayError> {
        self.record("points");
        lock(&self.points, "points").clone()
    }

    async fn destinations(&self) -> Result<Vec<Destination>, ScheduleGatewayError> {
        self.record("destinations");
        lock(&self.destinations, "destinations").clone()
    }

    async fn offer_groups(&self) -> Result<Vec<OfferGroup>, ScheduleGatewayError> {
        self.record("offer_groups");
        lock(&self.offer_groups, "offer groups").clone()
    }

    async fn update_point(&self, point: &PointWire) -> Result<PointWire, ScheduleGatewayError> {
        self.record("update_point");
        self.mutation_gate()?;
        Ok(point.clone())
    }

    async fn add_point(&self, draft: &PointDraftWire) -> Result<PointWire, ScheduleGatewayError> {
        self.record("add_point");
        self.mutation_gate()?;
        let n = self.minted.fetch_add(1, Ordering::SeqCst);
        Ok(draft
            .clone()
            .into_point_wire(PointId::new(format!("scripted-{n}"))))
    }

    async fn delete_point(&self, _id: &PointId) -> Result<(), ScheduleGatewayError> {
        self.record("delete_point");
        self.mutation_gate()
    }
}

/// Gateway that holds every mutation until released.
///
/// Reads pass straight through to the wrapped gateway; each mutation first
/// waits for one permit from [`BlockingGateway::release_one`]. Lets tests
/// hold a mutation bracket open while asserting what happens meanwhile.
pub struct BlockingGateway {
    inner: Arc<dyn ScheduleGateway>,
    gate: Semaphore,
}

impl BlockingGateway {
    /// Wrap a gateway with all mutations held.
    pub fn new(inner: Arc<dyn ScheduleGateway>) -> Self {
        Self {
            inner,
            gate: Semaphore::new(0),
        }
    }

    /// Let one held mutation proceed.
    pub fn release_one(&self) {
        self.gate.add_permits(1);
    }

    async fn wait_for_release(&self) -> Result<(), ScheduleGatewayError> {
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| ScheduleGatewayError::rejected("release gate closed"))?;
        permit.forget();
        Ok(())
    }
}

#[async_trait]
impl ScheduleGateway for BlockingGateway {
    async fn points(&self) -> Result<Vec<PointWire>, ScheduleGatewayError> {
        self.inner.points().await
    }

    async fn destinations(&self) -> Result<Vec<Destination>, ScheduleGatewayError> {
        self.inner.destinations().await
    }

    async fn offer_groups(&self) -> Result<Vec<OfferGroup>, ScheduleGatewayError> {
        self.inner.offer_groups().await
    }

    async fn update_point(&self, point: &PointWire) -> Result<PointWire, ScheduleGatewayError> {
        self.wait_for_release().await?;
        self.inner.update_point(point).await
    }

    async fn add_point(&self, draft: &PointDraftWire) -> Result<PointWire, ScheduleGatewayError> {
        self.wait_for_release().await?;
        self.inner.add_point(draft).await
    }

    async fn delete_point(&self, id: &PointId) -> Result<(), ScheduleGatewayError> {
        self.wait_for_release().await?;
        self.inner.delete_point(id).await
    }
}

/// Subscribe a recording listener for each kind and return the shared log.
pub fn record_events(
    model: &TripModel,
    kinds: &[ModelEventKind],
) -> Arc<Mutex<Vec<ModelEvent>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    for kind in kinds {
        let sink = Arc::clone(&log);
        model
            .subscribe(
                *kind,
                Arc::new(move |event: &ModelEvent| {
                    lock(&sink, "event log").push(event.clone());
                    Ok(())
                }),
            )
            .expect("subscribe");
    }
    log
}

/// A taxi point on the wire, priced at 100 with no offers.
pub fn point_wire(id: &str, destination: &str, start: &str, end: &str) -> PointWire {
    PointWire {
        id: PointId::new(id),
        kind: PointKind::Taxi,
        destination: DestinationId::new(destination),
        date_from: start.parse().expect("start timestamp"),
        date_to: end.parse().expect("end timestamp"),
        base_price: 100,
        offers: Vec::new(),
        is_favorite: false,
    }
}

/// A destination with no description or photos.
pub fn sample_destination(id: &str, name: &str) -> Destination {
    Destination {
        id: DestinationId::new(id),
        name: name.to_owned(),
        description: String::new(),
        pictures: Vec::new(),
    }
}

/// An offer with the given title and price.
pub fn sample_offer(id: &str, title: &str, price: u32) -> Offer {
    Offer {
        id: OfferId::new(id),
        title: title.to_owned(),
        price,
    }
}

/// An offer group for one kind.
pub fn sample_offer_group(kind: PointKind, offers: Vec<Offer>) -> OfferGroup {
    OfferGroup { kind, offers }
}
