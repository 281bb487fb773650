//! Presenter for the point list.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::error::Error;
use crate::domain::point::{Point, PointId, PointKind};
use crate::domain::ports::View;
use crate::domain::presenter::{Interest, Presenter};
use crate::domain::trip_model::TripModel;
use crate::domain::url_params::{UrlParams, UrlParamsStore};

/// One selected offer as shown on a point card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedOfferState {
    /// Offer title.
    pub title: String,
    /// Offer price in whole currency units.
    pub price: u32,
}

/// One point as shown in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointCardState {
    /// Point identifier, used to address actions back at the model.
    pub id: PointId,
    /// Category of the leg.
    pub kind: PointKind,
    /// Resolved destination name.
    pub destination: String,
    /// Scheduled start.
    pub start_date_time: DateTime<Utc>,
    /// Scheduled end.
    pub end_date_time: DateTime<Utc>,
    /// Rendered duration, for example `01D 02H 30M`.
    pub duration: String,
    /// Price excluding offers.
    pub base_price: u32,
    /// Resolved selected offers.
    pub offers: Vec<SelectedOfferState>,
    /// Favourite flag.
    pub is_favorite: bool,
}

/// View-state for the point list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewState {
    /// Whether a mutation bracket is open; surfaces grey themselves out.
    pub is_busy: bool,
    /// Cards for every point passing the URL criteria, in sorted order.
    pub items: Vec<PointCardState>,
}

/// Keeps the point list in step with the model and the URL.
pub struct ListPresenter {
    model: Arc<TripModel>,
    presenter: Arc<Presenter<ListViewState>>,
}

impl std::fmt::Debug for ListPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListPresenter").finish_non_exhaustive()
    }
}

impl ListPresenter {
    /// Wire the list up and render its initial state.
    ///
    /// Fails when a point references a destination or offer missing from
    /// the catalogues; the collections are expected to be internally
    /// consistent after a load.
    pub fn mount(
        model: Arc<TripModel>,
        url_params: Arc<UrlParamsStore>,
        view: Arc<dyn View<ListViewState>>,
    ) -> Result<Self, Error> {
        let presenter = Presenter::mount(
            Arc::clone(&model),
            url_params,
            view,
            Interest::ALL,
            Box::new(compute),
        )?;
        Ok(Self { model, presenter })
    }

    /// Re-render on demand.
    pub fn refresh(&self) -> Result<(), Error> {
        self.presenter.update_view()
    }

    /// Flip a point's favourite flag and push the edit to the service.
    pub async fn toggle_favorite(&self, id: &PointId) -> Result<(), Error> {
        let mut point = self
            .model
            .point(id)?
            .ok_or_else(|| Error::unknown_point(id.clone()))?;
        point.is_favorite = !point.is_favorite;
        self.model.update_point(point).await
    }

    /// Delete a point through the model.
    pub async fn request_delete(&self, id: &PointId) -> Result<(), Error> {
        self.model.delete_point(id).await
    }
}

fn compute(model: &TripModel, params: &UrlParams) -> Result<ListViewState, Error> {
    let points = model.points(params.criteria())?;
    let items = points
        .into_iter()
        .map(|point| card(model, point))
        .collect::<Result<Vec<_>, Error>>()?;
    Ok(ListViewState {
        is_busy: model.is_busy(),
        items,
    })
}

fn card(model: &TripModel, point: Point) -> Result<PointCardState, Error> {
    let destination = model
        .destination(&point.destination_id)?
        .ok_or_else(|| Error::unknown_destination(point.destination_id.clone()))?;

    let group = model.offer_group(point.kind)?;
    let offers = point
        .offer_ids
        .iter()
        .map(|id| {
            let offer = group
                .as_ref()
                .and_then(|group| group.offers.iter().find(|offer| &offer.id == id))
                .ok_or_else(|| Error::unknown_offer(id.clone(), point.kind))?;
            Ok(SelectedOfferState {
                title: offer.title.clone(),
                price: offer.price,
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(PointCardState {
        duration: format_duration(point.duration()),
        id: point.id,
        kind: point.kind,
        destination: destination.name,
        start_date_time: point.start_date_time,
        end_date_time: point.end_date_time,
        base_price: point.base_price,
        offers,
        is_favorite: point.is_favorite,
    })
}

/// Render a duration in the card format, dropping leading zero units.
///
/// Durations under an hour render as `{m}M`, under a day as `{h}H {m}M`,
/// and anything longer as `{d}D {h}H {m}M`, each unit zero-padded to two
/// digits. Negative durations clamp to `00M`.
fn format_duration(duration: TimeDelta) -> String {
    let clamped = duration.max(TimeDelta::zero());
    let days = clamped.num_days();
    let hours = clamped.num_hours() - days * 24;
    let minutes = clamped.num_minutes() - clamped.num_hours() * 60;

    if days > 0 {
        format!("{days:02}D {hours:02}H {minutes:02}M")
    } else if hours > 0 {
        format!("{hours:02}H {minutes:02}M")
    } else {
        format!("{minutes:02}M")
    }
}
