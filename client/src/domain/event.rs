//! Synchronous publish/subscribe primitive backing the model and URL store.
//!
//! Listeners subscribe by event kind and are invoked in registration order.
//! A listener failure aborts the dispatch and propagates to the `notify`
//! caller so failures are never swallowed.

use std::sync::{Arc, Mutex};

use crate::domain::Error;

/// Event types that expose a subscription kind.
pub trait Notification {
    /// Discriminant listeners subscribe by.
    type Kind: Copy + Eq + Send;

    /// The kind of this event instance.
    fn kind(&self) -> Self::Kind;
}

/// Callback invoked during dispatch.
pub type Listener<E> = Arc<dyn Fn(&E) -> Result<(), Error> + Send + Sync>;

/// Kind-keyed synchronous fan-out.
///
/// The registry lock is released before any listener runs, so listeners may
/// subscribe further listeners from within a dispatch. Registrations last for
/// the notifier's lifetime; there is no removal.
pub struct Notifier<E: Notification> {
    listeners: Mutex<Vec<(E::Kind, Listener<E>)>>,
}

impl<E: Notification> Default for Notifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Notification> Notifier<E> {
    /// An empty notifier.
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Register `listener` for every future event of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] when the listener registry is poisoned.
    pub fn subscribe(&self, kind: E::Kind, listener: Listener<E>) -> Result<(), Error> {
        let mut listeners = self
            .listeners
            .lock()
            .map_err(|_| Error::internal("listener registry poisoned"))?;
        listeners.push((kind, listener));
        Ok(())
    }

    /// Dispatch `event` to listeners of its kind, in registration order.
    ///
    /// # Errors
    ///
    /// Returns the first listener failure, aborting the remaining dispatch,
    /// or [`Error::Internal`] when the listener registry is poisoned.
    pub fn notify(&self, event: &E) -> Result<(), Error> {
        let matching: Vec<Listener<E>> = {
            let listeners = self
                .listeners
                .lock()
                .map_err(|_| Error::internal("listener registry poisoned"))?;
            listeners
                .iter()
                .filter(|(kind, _)| *kind == event.kind())
                .map(|(_, listener)| Arc::clone(listener))
                .collect()
        };
        for listener in matching {
            listener(event)?;
        }
        Ok(())
    }
}

/// Notifications emitted by the trip model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelEvent {
    /// The initial load committed all three collections.
    Load,
    /// A mutation bracket opened.
    Busy,
    /// A mutation bracket closed.
    Idle,
    /// The load path failed; carries the rendered failure message.
    Error {
        /// Human-readable failure description.
        message: String,
    },
}

/// Subscription kinds for [`ModelEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelEventKind {
    /// Matches [`ModelEvent::Load`].
    Load,
    /// Matches [`ModelEvent::Busy`].
    Busy,
    /// Matches [`ModelEvent::Idle`].
    Idle,
    /// Matches [`ModelEvent::Error`].
    Error,
}

impl Notification for ModelEvent {
    type Kind = ModelEventKind;

    fn kind(&self) -> ModelEventKind {
        match self {
            Self::Load => ModelEventKind::Load,
            Self::Busy => ModelEventKind::Busy,
            Self::Idle => ModelEventKind::Idle,
            Self::Error { .. } => ModelEventKind::Error,
        }
    }
}

/// Notifications emitted by the URL parameter store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    /// The query string changed, through the store or externally.
    Changed,
}

/// Subscription kinds for [`NavigationEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEventKind {
    /// Matches [`NavigationEvent::Changed`].
    Changed,
}

impl Notification for NavigationEvent {
    type Kind = NavigationEventKind;

    fn kind(&self) -> NavigationEventKind {
        match self {
            Self::Changed => NavigationEventKind::Changed,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Dispatch-order and failure-propagation coverage.

    use std::sync::Mutex;

    use super::*;

    fn recording_listener(
        log: &Arc<Mutex<Vec<&'static str>>>,
        tag: &'static str,
    ) -> Listener<ModelEvent> {
        let sink = Arc::clone(log);
        Arc::new(move |_event| {
            sink.lock().expect("log mutex").push(tag);
            Ok(())
        })
    }

    #[test]
    fn dispatches_to_matching_kind_in_registration_order() {
        let notifier = Notifier::<ModelEvent>::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        notifier
            .subscribe(ModelEventKind::Busy, recording_listener(&log, "first"))
            .expect("subscribe");
        notifier
            .subscribe(ModelEventKind::Idle, recording_listener(&log, "other-kind"))
            .expect("subscribe");
        notifier
            .subscribe(ModelEventKind::Busy, recording_listener(&log, "second"))
            .expect("subscribe");

        notifier.notify(&ModelEvent::Busy).expect("notify");

        assert_eq!(*log.lock().expect("log mutex"), vec!["first", "second"]);
    }

    #[test]
    fn first_listener_failure_aborts_dispatch_and_propagates() {
        let notifier = Notifier::<ModelEvent>::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        notifier
            .subscribe(
                ModelEventKind::Load,
                Arc::new(|_event| Err(Error::internal("listener exploded"))),
            )
            .expect("subscribe");
        notifier
            .subscribe(ModelEventKind::Load, recording_listener(&log, "never"))
            .expect("subscribe");

        let error = notifier
            .notify(&ModelEvent::Load)
            .expect_err("failure should propagate");

        assert_eq!(error, Error::internal("listener exploded"));
        assert!(log.lock().expect("log mutex").is_empty());
    }

    #[test]
    fn listeners_may_subscribe_during_dispatch() {
        let notifier = Arc::new(Notifier::<ModelEvent>::new());
        let log = Arc::new(Mutex::new(Vec::new()));

        let inner = Arc::clone(&notifier);
        let inner_log = Arc::clone(&log);
        notifier
            .subscribe(
                ModelEventKind::Idle,
                Arc::new(move |_event| {
                    inner.subscribe(ModelEventKind::Idle, recording_listener(&inner_log, "late"))
                }),
            )
            .expect("subscribe");

        notifier.notify(&ModelEvent::Idle).expect("first dispatch");
        assert!(log.lock().expect("log mutex").is_empty());

        notifier.notify(&ModelEvent::Idle).expect("second dispatch");
        assert_eq!(*log.lock().expect("log mutex"), vec!["late"]);
    }

    #[test]
    fn error_events_map_to_the_error_kind() {
        let event = ModelEvent::Error {
            message: "load failed".to_owned(),
        };
        assert_eq!(event.kind(), ModelEventKind::Error);
    }
}
