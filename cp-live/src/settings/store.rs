use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::Result;

/// Key/value persistence with a global and a per-entity partition.
///
/// Missing keys read as `None`. Implementations must be internally
/// synchronised.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get_service(&self, service_id: &str, key: &str) -> Result<Option<String>>;
    async fn set_service(&self, service_id: &str, key: &str, value: &str) -> Result<()>;

    async fn get_entity_meta(&self, entity_id: u64, key: &str) -> Result<Option<String>>;
    async fn set_entity_meta(&self, entity_id: u64, key: &str, value: &str) -> Result<()>;
}

/// Process-local store backed by hash maps.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    global: RwLock<HashMap<(String, String), String>>,
    entity: RwLock<HashMap<(u64, String), String>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of values across both partitions.
    pub fn len(&self) -> usize {
        self.global.read().len() + self.entity.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get_service(&self, service_id: &str, key: &str) -> Result<Option<String>> {
        Ok(self
            .global
            .read()
            .get(&(service_id.to_string(), key.to_string()))
            .cloned())
    }

    async fn set_service(&self, service_id: &str, key: &str, value: &str) -> Result<()> {
        self.global
            .write()
            .insert((service_id.to_string(), key.to_string()), value.to_string());
        Ok(())
    }

    async fn get_entity_meta(&self, entity_id: u64, key: &str) -> Result<Option<String>> {
        Ok(self
            .entity
            .read()
            .get(&(entity_id, key.to_string()))
            .cloned())
    }

    async fn set_entity_meta(&self, entity_id: u64, key: &str, value: &str) -> Result<()> {
        self.entity
            .write()
            .insert((entity_id, key.to_string()), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn partitions_are_independent() {
        let store = InMemorySettingsStore::new();
        store.set_service("youtube", "is_live", "1").await.unwrap();
        store.set_entity_meta(42, "youtube_is_live", "0").await.unwrap();

        assert_eq!(
            store.get_service("youtube", "is_live").await.unwrap().as_deref(),
            Some("1")
        );
        assert_eq!(store.get_service("vimeo", "is_live").await.unwrap(), None);
        assert_eq!(
            store.get_entity_meta(42, "youtube_is_live").await.unwrap().as_deref(),
            Some("0")
        );
        assert_eq!(store.get_entity_meta(43, "youtube_is_live").await.unwrap(), None);
        assert_eq!(store.len(), 2);
    }
}
