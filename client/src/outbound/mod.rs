//! Outbound adapters implementing the domain's driven ports.
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no trip logic:
//!
//! - **http**: reqwest-backed schedule gateway against the remote service
//! - **memory**: in-process schedule gateway for offline runs and tests
//! - **navigation**: in-process history standing in for a browser's

mod http;
mod memory;
mod navigation;

pub use http::HttpScheduleGateway;
pub use memory::MemoryScheduleGateway;
pub use navigation::MemoryNavigator;
