//! Audit log sink.
//!
//! Raw API responses are recorded here for troubleshooting. Recording is
//! best effort: a failing sink never aborts the operation being audited.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub object_type: String,
    pub action: String,
    pub data: String,
}

impl AuditEntry {
    pub fn new(
        object_type: impl Into<String>,
        action: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            object_type: object_type.into(),
            action: action.into(),
            data: data.into(),
        }
    }
}

#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn insert(&self, entry: AuditEntry) -> Result<()>;
}

/// Writes audit entries as structured log events on the `cp_live::audit` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn insert(&self, entry: AuditEntry) -> Result<()> {
        info!(
            target: "cp_live::audit",
            object_type = %entry.object_type,
            action = %entry.action,
            data_len = entry.data.len(),
            data = %entry.data,
            "audit"
        );
        Ok(())
    }
}

/// Insert `entry`, logging and swallowing any failure.
pub async fn record(sink: &dyn AuditSink, entry: AuditEntry) {
    let action = entry.action.clone();
    if let Err(error) = sink.insert(entry).await {
        warn!(action = %action, error = %error, "Failed to record audit entry");
    }
}
