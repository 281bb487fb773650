//! Presenter for the sort control.

use std::sync::Arc;

use crate::domain::criteria::SortKey;
use crate::domain::error::Error;
use crate::domain::ports::View;
use crate::domain::presenter::{Interest, Presenter};
use crate::domain::trip_model::TripModel;
use crate::domain::url_params::{UrlParams, UrlParamsStore};

/// One selectable sort option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOptionState {
    /// The key this option applies.
    pub value: SortKey,
    /// Whether the URL currently selects this key.
    pub is_selected: bool,
    /// Whether the key is reserved and cannot be selected.
    pub is_disabled: bool,
}

/// View-state for the sort control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortViewState {
    /// Options in display order.
    pub options: Vec<SortOptionState>,
}

/// Keeps the sort control in step with the URL.
///
/// Sort options never depend on the point collection, so this presenter
/// only re-renders on navigation changes.
pub struct SortPresenter {
    url_params: Arc<UrlParamsStore>,
    presenter: Arc<Presenter<SortViewState>>,
}

impl SortPresenter {
    /// Wire the control up and render its initial state.
    pub fn mount(
        model: Arc<TripModel>,
        url_params: Arc<UrlParamsStore>,
        view: Arc<dyn View<SortViewState>>,
    ) -> Result<Self, Error> {
        let presenter = Presenter::mount(
            model,
            Arc::clone(&url_params),
            view,
            Interest {
                model: false,
                navigation: true,
            },
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

    /// Select a sort key, writing it to the URL.
    ///
    /// The filter is left untouched. Reserved keys are accepted but order
    /// nothing.
    pub fn select_sort(&self, sort: SortKey) -> Result<(), Error> {
        self.url_params.set_params(UrlParams {
            filter: None,
            sort: Some(sort),
        })
    }
}

fn compute(_model: &TripModel, params: &UrlParams) -> Result<SortViewState, Error> {
    let selected = params.sort.unwrap_or_default();
    let options = SortKey::ALL
        .into_iter()
        .map(|value| SortOptionState {
            value,
            is_selected: value == selected,
            is_disabled: matches!(value, SortKey::Event | SortKey::Offers),
        })
        .collect();
    Ok(SortViewState { options })
}
