//! Response models.
//!
//! Every field is optional or defaulted: the poller treats a partial
//! payload as "best effort" rather than a hard failure.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::ApiError;

/// `search.list` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub id: Option<ResourceId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
}

impl SearchListResponse {
    pub fn from_json(body: &str) -> Result<Self, ApiError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Video ids in API order, skipping results without one.
    pub fn video_ids(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| item.id.as_ref()?.video_id.as_deref())
            .filter(|id| !id.is_empty())
            .collect()
    }
}

/// `videos.list` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoResource>,
}

impl VideoListResponse {
    pub fn from_json(body: &str) -> Result<Self, ApiError> {
        Ok(serde_json::from_str(body)?)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResource {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub live_streaming_details: Option<LiveStreamingDetails>,
}

impl VideoResource {
    /// Parsed scheduled start time, if present and valid RFC 3339.
    pub fn scheduled_start(&self) -> Option<DateTime<Utc>> {
        self.live_streaming_details.as_ref()?.scheduled_start()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveStreamingDetails {
    #[serde(default)]
    pub actual_start_time: Option<String>,
    #[serde(default)]
    pub actual_end_time: Option<String>,
    #[serde(default)]
    pub scheduled_start_time: Option<String>,
    #[serde(default)]
    pub scheduled_end_time: Option<String>,
    #[serde(default)]
    pub concurrent_viewers: Option<String>,
}

impl LiveStreamingDetails {
    pub fn scheduled_start(&self) -> Option<DateTime<Utc>> {
        let raw = self.scheduled_start_time.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}
