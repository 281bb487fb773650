//! Presenter for the point editor.

use std::sync::Arc;

use crate::domain::destination::Destination;
use crate::domain::error::Error;
use crate::domain::offer::OfferGroup;
use crate::domain::point::{Point, PointDraft, PointId, PointKind};
use crate::domain::ports::View;
use crate::domain::presenter::{Interest, Presenter};
use crate::domain::trip_model::TripModel;
use crate::domain::url_params::{UrlParams, UrlParamsStore};

/// View-state for the point editor.
///
/// The editor shows pickers over the full catalogues; which point is being
/// edited, if any, is the surface's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorViewState {
    /// Whether a mutation bracket is open; the form disables itself.
    pub is_busy: bool,
    /// Every point kind, in canonical order.
    pub kinds: Vec<PointKind>,
    /// The full destination catalogue.
    pub destinations: Vec<Destination>,
    /// The full per-kind offer catalogue.
    pub offer_groups: Vec<OfferGroup>,
}

/// Keeps the editor form in step with the model.
pub struct EditorPresenter {
    model: Arc<TripModel>,
    presenter: Arc<Presenter<EditorViewState>>,
}

impl EditorPresenter {
    /// Wire the editor up and render its initial state.
    pub fn mount(
        model: Arc<TripModel>,
        url_params: Arc<UrlParamsStore>,
        view: Arc<dyn View<EditorViewState>>,
    ) -> Result<Self, Error> {
        let presenter = Presenter::mount(
            Arc::clone(&model),
            url_params,
            view,
            Interest {
                model: true,
                navigation: false,
            },
            Box::new(compute),
        )?;
        Ok(Self { model, presenter })
    }

    /// Re-render on demand.
    pub fn refresh(&self) -> Result<(), Error> {
        self.presenter.update_view()
    }

    /// Submit a new point through the model.
    pub async fn submit_new(&self, draft: PointDraft) -> Result<(), Error> {
        self.model.add_point(draft).await
    }

    /// Submit an edited point through the model.
    pub async fn submit_update(&self, point: Point) -> Result<(), Error> {
        self.model.update_point(point).await
    }

    /// Delete the edited point through the model.
    pub async fn request_delete(&self, id: &PointId) -> Result<(), Error> {
        self.model.delete_point(id).await
    }
}

fn compute(model: &TripModel, _params: &UrlParams) -> Result<EditorViewState, Error> {
    Ok(EditorViewState {
        is_busy: model.is_busy(),
        kinds: PointKind::ALL.to_vec(),
        destinations: model.destinations()?,
        offer_groups: model.offer_groups()?,
    })
}
