use std::fmt;

use serde::{Deserialize, Serialize};

/// Settings partition an accessor reads from or writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Context {
    /// Site-wide settings.
    #[default]
    Global,
    /// Settings attached to one content entity.
    Entity(u64),
}

impl Context {
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global)
    }
}

impl From<Option<u64>> for Context {
    fn from(entity: Option<u64>) -> Self {
        entity.map_or(Self::Global, Self::Entity)
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Entity(id) => write!(f, "{id}"),
        }
    }
}

/// Prefix applied to field keys in `context`.
///
/// Entities are shared between services, so keys there carry `{service_id}_`.
/// Each service already owns its global partition, so no prefix is needed.
pub fn field_prefix(service_id: &str, context: Context) -> String {
    match context {
        Context::Global => String::new(),
        Context::Entity(_) => format!("{service_id}_"),
    }
}

/// Key under which `field` is persisted for `service_id` in `context`.
pub fn storage_key(service_id: &str, context: Context, field: &str) -> String {
    format!("{}{field}", field_prefix(service_id, context))
}

/// Loose truthiness of a stored value: only the empty string and `"0"` are false.
pub fn is_truthy(value: &str) -> bool {
    !(value.is_empty() || value == "0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_keys_are_not_prefixed() {
        assert_eq!(storage_key("youtube", Context::Global, "channel_id"), "channel_id");
    }

    #[test]
    fn entity_keys_are_prefixed_with_service_id() {
        assert_eq!(
            storage_key("youtube", Context::Entity(42), "channel_id"),
            "youtube_channel_id"
        );
        assert_eq!(field_prefix("vimeo", Context::Entity(1)), "vimeo_");
    }

    #[test]
    fn context_display() {
        assert_eq!(Context::Global.to_string(), "global");
        assert_eq!(Context::Entity(42).to_string(), "42");
        assert_eq!(Context::from(Some(7)), Context::Entity(7));
        assert_eq!(Context::from(None), Context::Global);
    }

    #[test]
    fn truthiness() {
        assert!(is_truthy("1"));
        assert!(is_truthy("yes"));
        assert!(!is_truthy(""));
        assert!(!is_truthy("0"));
        assert!(is_truthy("false"));
        assert!(is_truthy(" 0"));
    }
}
