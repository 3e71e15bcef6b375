//! Operator-configured YouTube settings.

use serde::{Deserialize, Serialize};
use tracing::debug;
use youtube_data::EventType;

use crate::Result;
use crate::service::ServiceCore;
use crate::settings::Context;

pub mod keys {
    pub const CHANNEL_ID: &str = "channel_id";
    pub const API_KEY: &str = "api_key";
    pub const VIDEO_TYPE: &str = "video_type";
    pub const VIDEO_URL: &str = "video_url";
    pub const SHOW_SUBSCRIBE_BUTTON: &str = "show_subscribe_button";
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SubscribeButton {
    #[default]
    Show,
    Hide,
}

/// Typed view of one partition's YouTube settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YouTubeConfig {
    pub channel_id: String,
    pub api_key: String,
    pub video_type: EventType,
    pub video_url: String,
    pub subscribe_button: SubscribeButton,
}

impl YouTubeConfig {
    pub async fn load(core: &ServiceCore, ctx: Context) -> Result<Self> {
        let channel_id = core.get(ctx, keys::CHANNEL_ID, "").await?;
        let api_key = core.get(ctx, keys::API_KEY, "").await?;
        let video_url = core.get(ctx, keys::VIDEO_URL, "").await?;

        let raw_type = core
            .get(ctx, keys::VIDEO_TYPE, EventType::default().as_ref())
            .await?;
        let video_type: EventType = raw_type.trim().parse().unwrap_or_else(|_| {
            debug!(value = %raw_type, "Unknown video type, searching live broadcasts");
            EventType::default()
        });

        let raw_button = core
            .get(ctx, keys::SHOW_SUBSCRIBE_BUTTON, SubscribeButton::default().as_ref())
            .await?;
        let subscribe_button: SubscribeButton = raw_button.trim().parse().unwrap_or_default();

        Ok(Self {
            channel_id: channel_id.trim().to_string(),
            api_key: api_key.trim().to_string(),
            video_type,
            video_url: video_url.trim().to_string(),
            subscribe_button,
        })
    }

    /// Channel id and API key, if both are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        if self.channel_id.is_empty() || self.api_key.is_empty() {
            None
        } else {
            Some((&self.channel_id, &self.api_key))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_require_both_values() {
        let mut config = YouTubeConfig {
            channel_id: "UC1".to_string(),
            ..Default::default()
        };
        assert_eq!(config.credentials(), None);

        config.api_key = "key".to_string();
        assert_eq!(config.credentials(), Some(("UC1", "key")));
    }

    #[test]
    fn subscribe_button_parses() {
        assert_eq!("hide".parse::<SubscribeButton>().unwrap(), SubscribeButton::Hide);
        assert_eq!(SubscribeButton::default().as_ref(), "show");
    }
}
