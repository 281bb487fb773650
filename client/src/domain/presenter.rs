//! Generic presenter tying a rendering surface to the shared state holders.
//!
//! A presenter owns no trip data. On every event it cares about it re-reads
//! the model and the URL parameters, recomputes its view-state through an
//! injected closure, and pushes the result to its [`View`]. Listener
//! registrations hold the presenter weakly, so dropping the last strong
//! reference retires it without unsubscribing.

use std::sync::{Arc, Weak};

use crate::domain::error::Error;
use crate::domain::event::{ModelEventKind, NavigationEventKind};
use crate::domain::ports::View;
use crate::domain::trip_model::TripModel;
use crate::domain::url_params::{UrlParams, UrlParamsStore};

/// Which notification streams trigger a re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interest {
    /// Re-render on model load and busy/idle events.
    pub model: bool,
    /// Re-render on query-string changes.
    pub navigation: bool,
}

impl Interest {
    /// Re-render on both streams.
    pub const ALL: Self = Self {
        model: true,
        navigation: true,
    };
}

/// View-state computation over the current model and parameters.
pub type Compute<S> = Box<dyn Fn(&TripModel, &UrlParams) -> Result<S, Error> + Send + Sync>;

/// Synchroniser between one view-state shape and the shared state holders.
pub struct Presenter<S> {
    model: Arc<TripModel>,
    url_params: Arc<UrlParamsStore>,
    view: Arc<dyn View<S>>,
    compute: Compute<S>,
}

impl<S> std::fmt::Debug for Presenter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Presenter").finish_non_exhaustive()
    }
}

impl<S: 'static> Presenter<S> {
    /// Wire a presenter up and render its initial state.
    ///
    /// Subscriptions are registered before the initial render, so events
    /// raced by the caller are never lost, and the initial render surfaces
    /// compute or view failures immediately.
    pub fn mount(
        model: Arc<TripModel>,
        url_params: Arc<UrlParamsStore>,
        view: Arc<dyn View<S>>,
        interest: Interest,
        compute: Compute<S>,
    ) -> Result<Arc<Self>, Error> {
        let presenter = Arc::new(Self {
            model,
            url_params,
            view,
            compute,
        });

        if interest.model {
            for kind in [
                ModelEventKind::Load,
                ModelEventKind::Busy,
                ModelEventKind::Idle,
            ] {
                let weak = Arc::downgrade(&presenter);
                presenter
                    .model
                    .subscribe(kind, Arc::new(move |_event| refresh(&weak)))?;
            }
        }
        if interest.navigation {
            let weak = Arc::downgrade(&presenter);
            presenter.url_params.subscribe(
                NavigationEventKind::Changed,
                Arc::new(move |_event| refresh(&weak)),
            )?;
        }

        presenter.update_view()?;
        Ok(presenter)
    }

    /// Recompute the view-state and push it to the surface.
    pub fn update_view(&self) -> Result<(), Error> {
        let params = self.url_params.params()?;
        let state = (self.compute)(&self.model, &params)?;
        self.view.update(&state)?;
        Ok(())
    }
}

fn refresh<S: 'static>(weak: &Weak<Presenter<S>>) -> Result<(), Error> {
    match weak.upgrade() {
        Some(presenter) => presenter.update_view(),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    //! Mount, re-render, and retirement coverage.

    use mockable::DefaultClock;

    use super::*;
    use crate::domain::criteria::FilterKind;
    use crate::domain::ports::{FixtureScheduleGateway, ViewError};
    use crate::outbound::MemoryNavigator;
    use crate::test_support::{FailingView, RecordingView};

    fn holders() -> (Arc<TripModel>, Arc<UrlParamsStore>) {
        let model = Arc::new(TripModel::new(
            Arc::new(FixtureScheduleGateway),
            Arc::new(DefaultClock),
        ));
        let store = Arc::new(UrlParamsStore::new(Arc::new(MemoryNavigator::new())));
        (model, store)
    }

    fn filter_compute() -> Compute<Option<FilterKind>> {
        Box::new(|_model, params| Ok(params.filter))
    }

    #[tokio::test]
    async fn mount_renders_once_immediately() {
        let (model, store) = holders();
        let view = Arc::new(RecordingView::new());

        Presenter::mount(
            model,
            store,
            Arc::clone(&view) as Arc<dyn View<Option<FilterKind>>>,
            Interest::ALL,
            filter_compute(),
        )
        .expect("mount succeeds");

        assert_eq!(view.states(), vec![None]);
    }

    #[tokio::test]
    async fn model_events_trigger_a_re_render() {
        let (model, store) = holders();
        let view = Arc::new(RecordingView::new());

        let _presenter = Presenter::mount(
            Arc::clone(&model),
            store,
            Arc::clone(&view) as Arc<dyn View<Option<FilterKind>>>,
            Interest::ALL,
            filter_compute(),
        )
        .expect("mount succeeds");

        model.load().await.expect("load succeeds");

        assert_eq!(view.states().len(), 2);
    }

    #[tokio::test]
    async fn navigation_events_trigger_a_re_render() {
        let (model, store) = holders();
        let view = Arc::new(RecordingView::new());

        let _presenter = Presenter::mount(
            model,
            Arc::clone(&store),
            Arc::clone(&view) as Arc<dyn View<Option<FilterKind>>>,
            Interest::ALL,
            filter_compute(),
        )
        .expect("mount succeeds");

        store
            .set_params(UrlParams {
                filter: Some(FilterKind::Past),
                sort: None,
            })
            .expect("set params");

        assert_eq!(view.states(), vec![None, Some(FilterKind::Past)]);
    }

    #[tokio::test]
    async fn dropped_presenters_stop_re_rendering() {
        let (model, store) = holders();
        let view = Arc::new(RecordingView::new());

        let presenter = Presenter::mount(
            model,
            Arc::clone(&store),
            Arc::clone(&view) as Arc<dyn View<Option<FilterKind>>>,
            Interest::ALL,
            filter_compute(),
        )
        .expect("mount succeeds");
        drop(presenter);

        store.sync_external().expect("sync succeeds");

        assert_eq!(view.states(), vec![None]);
    }

    #[tokio::test]
    async fn compute_failure_fails_the_mount() {
        let (model, store) = holders();
        let view = Arc::new(RecordingView::new());

        let error = Presenter::mount(
            model,
            store,
            Arc::clone(&view) as Arc<dyn View<Option<FilterKind>>>,
            Interest::ALL,
            Box::new(|_model, _params| Err(Error::internal("no state for you"))),
        )
        .expect_err("mount fails");

        assert_eq!(error, Error::internal("no state for you"));
        assert!(view.states().is_empty());
    }

    #[tokio::test]
    async fn view_failure_maps_to_render_error() {
        let (model, store) = holders();

        let error = Presenter::mount(
            model,
            store,
            Arc::new(FailingView) as Arc<dyn View<Option<FilterKind>>>,
            Interest::ALL,
            filter_compute(),
        )
        .expect_err("mount fails");

        assert_eq!(
            error,
            Error::Render {
                source: ViewError::render("failing view"),
            }
        );
    }
}
