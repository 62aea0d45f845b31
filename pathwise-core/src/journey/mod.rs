//! Journey stage controller and its timer model.

#[cfg(feature = "async")]
pub mod driver;
pub mod event;
pub mod store;
pub mod timer;

#[cfg(feature = "async")]
pub use driver::JourneyDriver;
pub use event::JourneyEvent;
pub use store::{JourneySnapshot, JourneyState, JourneyStore, PendingSnapshot};
pub use timer::{DeferredAction, TimerTicket};
