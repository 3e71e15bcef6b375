use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::Result;
use crate::audit::{AuditEntry, AuditSink};

/// Audit sink writing to the `audit_log` table.
#[derive(Debug, Clone)]
pub struct SqliteAuditLog {
    pool: SqlitePool,
}

impl SqliteAuditLog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Most recent entries first.
    pub async fn recent(&self, limit: i64) -> Result<Vec<AuditEntry>> {
        let rows = sqlx::query_as::<_, (String, String, String)>(
            "SELECT object_type, action, data FROM audit_log ORDER BY id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(object_type, action, data)| AuditEntry {
                object_type,
                action,
                data,
            })
            .collect())
    }
}

#[async_trait]
impl AuditSink for SqliteAuditLog {
    async fn insert(&self, entry: AuditEntry) -> Result<()> {
        sqlx::query(
            "INSERT INTO audit_log (object_type, action, data, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&entry.object_type)
        .bind(&entry.action)
        .bind(&entry.data)
        .bind(Utc::now().timestamp_millis())
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
    async fn inserts_and_lists_recent_entries() {
        let log = SqliteAuditLog::new(memory_pool().await);
        log.insert(AuditEntry::new("service", "youtube_search", "{\"items\":[]}"))
            .await
            .unwrap();
        log.insert(AuditEntry::new("service", "youtube_videos", "{}"))
            .await
            .unwrap();

        let recent = log.recent(10).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].action, "youtube_videos");
        assert_eq!(recent[1].data, "{\"items\":[]}");
    }
}
