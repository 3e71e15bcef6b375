//! Service contract shared by every live-video source.
//!
//! [`ServiceCore`] owns the live-flag state machine and the scoped settings
//! accessors; concrete services implement [`LiveService`] on top of it.

mod base;
mod hooks;
mod live;

pub use base::{DEFAULT_LIVE_DURATION, ServiceCore, fields as field_keys};
pub use hooks::{FieldScope, LiveFilter, ReadFilter, ServiceHooks, ServiceScope, WriteFilter};
pub use live::{CheckOutcome, LiveService, PageRender};
