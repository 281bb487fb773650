//! Driven port for the navigation backend holding the query string.
//!
//! In a browser this is the History API; the demo shell substitutes an
//! in-memory history. Either way the domain only ever sees the raw query
//! string, never full URLs.

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while reading or writing the query string.
    pub enum NavigatorError {
        /// The navigation backend refused access.
        Access { message: String } =>
            "navigation access failed: {message}",
    }
}

/// Port for query-string reads and history pushes.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// The current query string, without a leading `?`.
    fn query(&self) -> Result<String, NavigatorError>;

    /// Push a new history entry carrying `query`.
    fn push_query(&self, query: &str) -> Result<(), NavigatorError>;
}
