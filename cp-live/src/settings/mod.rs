//! Settings partitions and the configuration-form contract.
//!
//! Values live in one of two partitions: a global partition per service,
//! and a per-entity partition shared by every service (keys are prefixed
//! with the service id there).

mod context;
mod fields;
mod form;
mod store;

pub use context::{Context, field_prefix, is_truthy, storage_key};
pub use fields::{FieldDecl, FieldOption, FieldType, RenderScope, SettingsContract};
pub use form::{SettingsForm, SettingsSave};
pub use store::{InMemorySettingsStore, SettingsStore};
