//! Domain model and presenters for the trip-planning client.
//!
//! The model ([`TripModel`]) owns the point schedule and its reference data
//! and emits [`ModelEvent`] notifications; [`UrlParamsStore`] owns the
//! whitelisted query parameters and emits [`NavigationEvent`] notifications;
//! [`Presenter`] ties a rendering surface to both. Everything past the
//! [`ports`] boundary is adapter territory.

pub mod ports;
pub mod wire;

mod brief_presenter;
mod criteria;
mod destination;
mod editor_presenter;
mod error;
mod event;
mod filter_presenter;
mod list_presenter;
mod offer;
mod point;
mod presenter;
mod sort_presenter;
mod trip_model;
mod url_params;

pub use self::brief_presenter::{BriefPresenter, BriefViewState};
pub use self::criteria::{Criteria, FilterKind, SortKey};
pub use self::destination::{Destination, DestinationId, Photo};
pub use self::editor_presenter::{EditorPresenter, EditorViewState};
pub use self::error::Error;
pub use self::event::{
    Listener, ModelEvent, ModelEventKind, NavigationEvent, NavigationEventKind, Notification,
    Notifier,
};
pub use self::filter_presenter::{FilterOptionState, FilterPresenter, FilterViewState};
pub use self::list_presenter::{ListPresenter, ListViewState, PointCardState, SelectedOfferState};
pub use self::offer::{Offer, OfferGroup, OfferId};
pub use self::point::{Point, PointDraft, PointId, PointKind};
pub use self::presenter::{Compute, Interest, Presenter};
pub use self::sort_presenter::{SortOptionState, SortPresenter, SortViewState};
pub use self::trip_model::TripModel;
pub use self::url_params::{UrlParams, UrlParamsStore};
