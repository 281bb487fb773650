//! Driving-side port for rendering surfaces.

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while pushing a view-state to a surface.
    pub enum ViewError {
        /// The surface could not apply the update.
        Render { message: String } =>
            "view render failed: {message}",
    }
}

/// A rendering surface for one view-state shape.
///
/// Presenters recompute their view-state and push it here; surfaces hold
/// no trip data of their own.
pub trait View<S>: Send + Sync {
    /// Apply a freshly computed view-state.
    fn update(&self, state: &S) -> Result<(), ViewError>;
}

/// Surface that discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl<S> View<S> for NullView {
    fn update(&self, _state: &S) -> Result<(), ViewError> {
        Ok(())
    }
}
