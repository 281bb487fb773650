//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod navigator;
mod schedule_gateway;
mod view;

#[cfg(test)]
pub use navigator::MockNavigator;
pub use navigator::{Navigator, NavigatorError};
#[cfg(test)]
pub use schedule_gateway::MockScheduleGateway;
pub use schedule_gateway::{FixtureScheduleGateway, ScheduleGateway, ScheduleGatewayError};
pub use view::{NullView, View, ViewError};
