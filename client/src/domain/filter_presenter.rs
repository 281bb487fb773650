//! Presenter for the filter control.

use std::sync::Arc;

use crate::domain::criteria::{Criteria, FilterKind};
use crate::domain::error::Error;
use crate::domain::ports::View;
use crate::domain::presenter::{Interest, Presenter};
use crate::domain::trip_model::TripModel;
use crate::domain::url_params::{UrlParams, UrlParamsStore};

/// One selectable filter option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptionState {
    /// The filter this option applies.
    pub value: FilterKind,
    /// Whether the URL currently selects this filter.
    pub is_selected: bool,
    /// Whether the filter matches no points right now.
    pub is_disabled: bool,
}

/// View-state for the filter control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterViewState {
    /// Options in display order.
    pub options: Vec<FilterOptionState>,
}

/// Keeps the filter control in step with the model and the URL.
///
/// Re-renders on both streams: model events move points between windows
/// and navigation events move the selection.
pub struct FilterPresenter {
    url_params: Arc<UrlParamsStore>,
    presenter: Arc<Presenter<FilterViewState>>,
}

impl FilterPresenter {
    /// Wire the control up and render its initial state.
    pub fn mount(
        model: Arc<TripModel>,
        url_params: Arc<UrlParamsStore>,
        view: Arc<dyn View<FilterViewState>>,
    ) -> Result<Self, Error> {
        let presenter = Presenter::mount(
            model,
            Arc::clone(&url_params),
            view,
            Interest::ALL,
            Box::new(compute),
        )?;
        Ok(Self {
            url_params,
            presenter,
        })
    }

    /// Re-render on demand.
    pub fn refresh(&self) -> Result<(), Error> {
        self.presenter.update_view()
    }

    /// Select a filter, writing it to the URL.
    ///
    /// The sort key is left untouched.
    pub fn select_filter(&self, filter: FilterKind) -> Result<(), Error> {
        self.url_params.set_params(UrlParams {
            filter: Some(filter),
            sort: None,
        })
    }
}

fn compute(model: &TripModel, params: &UrlParams) -> Result<FilterViewState, Error> {
    let selected = params.filter.unwrap_or_default();
    let options = FilterKind::ALL
        .into_iter()
        .map(|value| {
            let window = Criteria {
                filter: Some(value),
                sort: None,
            };
            Ok(FilterOptionState {
                value,
                is_selected: value == selected,
                is_disabled: model.points(window)?.is_empty(),
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;
    Ok(FilterViewState { options })
}
