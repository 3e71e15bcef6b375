//! Service event bus.
//!
//! State transitions of a service are published here for other subsystems
//! (embed caches, notifiers) to react to.

mod events;

pub use events::{ServiceEvent, ServiceEventBroadcaster};
