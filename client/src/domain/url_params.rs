//! Whitelisted query parameters and the store that owns them.
//!
//! Only the `filter` and `sort` keys are recognised; anything else in the
//! query string is ignored on read and dropped on write. The store never
//! caches: every read goes back to the [`Navigator`] so external history
//! moves are picked up for free.

use std::sync::Arc;

use url::form_urlencoded;

use crate::domain::criteria::{Criteria, FilterKind, SortKey};
use crate::domain::error::Error;
use crate::domain::event::{Listener, NavigationEvent, NavigationEventKind, Notifier};
use crate::domain::ports::Navigator;

const FILTER_KEY: &str = "filter";
const SORT_KEY: &str = "sort";

/// The whitelisted query parameters, each optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UrlParams {
    /// Value of the `filter` key, when present and recognised.
    pub filter: Option<FilterKind>,
    /// Value of the `sort` key, when present and recognised.
    pub sort: Option<SortKey>,
}

impl UrlParams {
    /// View these parameters as point-selection criteria.
    pub fn criteria(self) -> Criteria {
        Criteria {
            filter: self.filter,
            sort: self.sort,
        }
    }

    /// Overlay `patch` on top of `self`; unset patch keys keep their value.
    fn merged(self, patch: Self) -> Self {
        Self {
            filter: patch.filter.or(self.filter),
            sort: patch.sort.or(self.sort),
        }
    }

    /// Parse a query string, keeping the last recognised value per key.
    fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                FILTER_KEY => {
                    if let Some(kind) = FilterKind::from_param(value.as_ref()) {
                        params.filter = Some(kind);
                    }
                }
                SORT_KEY => {
                    if let Some(sort) = SortKey::from_param(value.as_ref()) {
                        params.sort = Some(sort);
                    }
                }
                _ => {}
            }
        }
        params
    }

    /// Serialise the set keys, `filter` first.
    fn to_query(self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(filter) = self.filter {
            serializer.append_pair(FILTER_KEY, filter.as_param());
        }
        if let Some(sort) = self.sort {
            serializer.append_pair(SORT_KEY, sort.as_param());
        }
        serializer.finish()
    }
}

/// Store mediating between presenters and the navigation backend.
pub struct UrlParamsStore {
    navigator: Arc<dyn Navigator>,
    notifier: Notifier<NavigationEvent>,
}

impl UrlParamsStore {
    /// Build a store over a navigation backend.
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self {
            navigator,
            notifier: Notifier::new(),
        }
    }

    /// Register a listener for one kind of navigation event.
    pub fn subscribe(
        &self,
        kind: NavigationEventKind,
        listener: Listener<NavigationEvent>,
    ) -> Result<(), Error> {
        self.notifier.subscribe(kind, listener)
    }

    /// The current whitelisted parameters.
    pub fn params(&self) -> Result<UrlParams, Error> {
        let query = self.navigator.query()?;
        Ok(UrlParams::from_query(&query))
    }

    /// Merge `patch` over the current parameters and push a history entry.
    ///
    /// Emits [`NavigationEvent::Changed`] after the push.
    pub fn set_params(&self, patch: UrlParams) -> Result<(), Error> {
        let next = self.params()?.merged(patch);
        self.navigator.push_query(&next.to_query())?;
        self.notifier.notify(&NavigationEvent::Changed)
    }

    /// Announce a query-string change made outside the store.
    ///
    /// The navigation backend owns back/forward moves; callers invoke this
    /// afterwards so subscribed presenters re-read the parameters.
    pub fn sync_external(&self) -> Result<(), Error> {
        self.notifier.notify(&NavigationEvent::Changed)
    }
}

#[cfg(test)]
#[path = "url_params_tests.rs"]
mod tests;
