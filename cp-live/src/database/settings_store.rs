use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::Result;
use crate::settings::SettingsStore;

/// SQLite implementation of `SettingsStore`.
#[derive(Debug, Clone)]
pub struct SqliteSettingsStore {
    pool: SqlitePool,
}

impl SqliteSettingsStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn entity_key(entity_id: u64) -> Result<i64> {
    i64::try_from(entity_id)
        .map_err(|_| crate::Error::validation(format!("entity id {entity_id} out of range")))
}

#[async_trait]
impl SettingsStore for SqliteSettingsStore {
    async fn get_service(&self, service_id: &str, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>(
            "SELECT value FROM service_settings WHERE service_id = ? AND key = ?",
        )
        .bind(service_id)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(value)
    }

    async fn set_service(&self, service_id: &str, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO service_settings (service_id, key, value) VALUES (?, ?, ?)
            ON CONFLICT(service_id, key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(service_id)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_entity_meta(&self, entity_id: u64, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>(
            "SELECT value FROM entity_meta WHERE entity_id = ? AND key = ?",
        )
        .bind(entity_key(entity_id)?)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(value)
    }

    async fn set_entity_meta(&self, entity_id: u64, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO entity_meta (entity_id, key, value) VALUES (?, ?, ?)
            ON CONFLICT(entity_id, key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(entity_key(entity_id)?)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory_pool;

    #[tokio::test]
    async fn upserts_both_partitions() {
        let store = SqliteSettingsStore::new(memory_pool().await);

        assert_eq!(store.get_service("youtube", "is_live").await.unwrap(), None);
        store.set_service("youtube", "is_live", "1").await.unwrap();
        store.set_service("youtube", "is_live", "0").await.unwrap();
        assert_eq!(
            store.get_service("youtube", "is_live").await.unwrap().as_deref(),
            Some("0")
        );

        store
            .set_entity_meta(42, "youtube_video_url", "https://youtu.be/a")
            .await
            .unwrap();
        assert_eq!(
            store
                .get_entity_meta(42, "youtube_video_url")
                .await
                .unwrap()
                .as_deref(),
            Some("https://youtu.be/a")
        );
        assert_eq!(store.get_entity_meta(41, "youtube_video_url").await.unwrap(), None);
    }

    #[tokio::test]
    async fn rejects_out_of_range_entity_ids() {
        let store = SqliteSettingsStore::new(memory_pool().await);
        assert!(store.get_entity_meta(u64::MAX, "k").await.is_err());
    }
}
