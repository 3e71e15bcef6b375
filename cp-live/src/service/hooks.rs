//! Interception points for service reads and writes.
//!
//! Filters run in registration order, each receiving the previous output.

use std::fmt;
use std::sync::Arc;

use crate::settings::Context;

/// Arguments describing the field a read or write filter is applied to.
#[derive(Debug, Clone, Copy)]
pub struct FieldScope<'a> {
    pub service_id: &'a str,
    pub key: &'a str,
    pub context: Context,
}

/// Service a live-status filter is applied to.
#[derive(Debug, Clone, Copy)]
pub struct ServiceScope<'a> {
    pub service_id: &'a str,
    pub context: Context,
}

/// Post-read filter: `(value, field) -> value`.
pub type ReadFilter = Arc<dyn Fn(String, &FieldScope<'_>) -> String + Send + Sync>;
/// Pre-write filter: `(value, field) -> value`.
pub type WriteFilter = Arc<dyn Fn(String, &FieldScope<'_>) -> String + Send + Sync>;
/// Live-status filter: `(is_live, service) -> is_live`.
pub type LiveFilter = Arc<dyn Fn(bool, &ServiceScope<'_>) -> bool + Send + Sync>;

#[derive(Clone, Default)]
pub struct ServiceHooks {
    read: Vec<ReadFilter>,
    write: Vec<WriteFilter>,
    is_live: Vec<LiveFilter>,
}

impl ServiceHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_read<F>(mut self, filter: F) -> Self
    where
        F: Fn(String, &FieldScope<'_>) -> String + Send + Sync + 'static,
    {
        self.read.push(Arc::new(filter));
        self
    }

    pub fn on_write<F>(mut self, filter: F) -> Self
    where
        F: Fn(String, &FieldScope<'_>) -> String + Send + Sync + 'static,
    {
        self.write.push(Arc::new(filter));
        self
    }

    pub fn on_is_live<F>(mut self, filter: F) -> Self
    where
        F: Fn(bool, &ServiceScope<'_>) -> bool + Send + Sync + 'static,
    {
        self.is_live.push(Arc::new(filter));
        self
    }

    pub(crate) fn apply_read(&self, value: String, scope: &FieldScope<'_>) -> String {
        self.read.iter().fold(value, |value, filter| filter(value, scope))
    }

    pub(crate) fn apply_write(&self, value: String, scope: &FieldScope<'_>) -> String {
        self.write.iter().fold(value, |value, filter| filter(value, scope))
    }

    pub(crate) fn apply_is_live(&self, value: bool, scope: &ServiceScope<'_>) -> bool {
        self.is_live.iter().fold(value, |value, filter| filter(value, scope))
    }
}

impl fmt::Debug for ServiceHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceHooks")
            .field("read", &self.read.len())
            .field("write", &self.write.len())
            .field("is_live", &self.is_live.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_chain_in_registration_order() {
        let hooks = ServiceHooks::new()
            .on_read(|value, _| format!("{value}a"))
            .on_read(|value, scope| format!("{value}-{}", scope.key));
        let scope = FieldScope {
            service_id: "youtube",
            key: "video_url",
            context: Context::Global,
        };
        assert_eq!(hooks.apply_read("x".to_string(), &scope), "xa-video_url");
        assert_eq!(hooks.apply_write("x".to_string(), &scope), "x");
    }

    #[test]
    fn live_filter_sees_context() {
        let hooks = ServiceHooks::new().on_is_live(|live, scope| live || scope.context.is_global());
        let global = ServiceScope {
            service_id: "youtube",
            context: Context::Global,
        };
        let entity = ServiceScope {
            service_id: "youtube",
            context: Context::Entity(3),
        };
        assert!(hooks.apply_is_live(false, &global));
        assert!(!hooks.apply_is_live(false, &entity));
    }
}
