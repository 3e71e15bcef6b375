//! YouTube channel poller.
//!
//! A poll searches the channel for broadcasts of the configured event type.
//! When several are reported at once, the one scheduled to start first is
//! chosen. Every network or payload problem degrades to "no update this
//! cycle"; only settings-store failures are returned as errors.

mod config;
mod embed;
mod select;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use youtube_data::{SearchListResponse, SearchRequest, VideoListResponse, VideosRequest, watch_url};

use crate::Result;
use crate::audit::{self, AuditEntry, AuditSink};
use crate::notification::ServiceEvent;
use crate::service::{CheckOutcome, LiveService, PageRender, ServiceCore};
use crate::settings::{Context, FieldDecl, FieldOption, FieldType, storage_key};
use crate::utils::http_client::HttpFetch;

pub use config::{SubscribeButton, YouTubeConfig, keys};
pub use select::{Candidate, select_earliest};

/// Service id, also the key prefix in entity partitions.
pub const SERVICE_ID: &str = "youtube";

pub struct YouTubeService {
    core: ServiceCore,
    fetcher: Arc<dyn HttpFetch>,
    audit: Arc<dyn AuditSink>,
}

impl YouTubeService {
    /// `core` must have been created with [`SERVICE_ID`].
    pub fn new(core: ServiceCore, fetcher: Arc<dyn HttpFetch>, audit: Arc<dyn AuditSink>) -> Self {
        debug_assert_eq!(core.id(), SERVICE_ID);
        Self {
            core,
            fetcher,
            audit,
        }
    }

    /// Fetch `url`, mapping transport errors and empty bodies to `None`.
    async fn fetch_body(&self, url: &str, action: &'static str) -> Option<String> {
        let body = match self.fetcher.fetch(url).await {
            Ok(body) => body,
            Err(error) => {
                warn!(service = SERVICE_ID, action, error = %error, "YouTube request failed");
                return None;
            }
        };

        audit::record(
            self.audit.as_ref(),
            AuditEntry::new("service", action, body.as_str()),
        )
        .await;

        if body.trim().is_empty() {
            debug!(service = SERVICE_ID, action, "Empty response body");
            return None;
        }
        Some(body)
    }

    /// Pick the earliest scheduled broadcast among `video_ids`.
    ///
    /// Returns `None` when the lookup fails or no candidate has a usable
    /// scheduled start time.
    async fn disambiguate(&self, video_ids: &[&str], api_key: &str) -> Option<String> {
        let url = match VideosRequest::new(video_ids, api_key).url() {
            Ok(url) => url,
            Err(error) => {
                warn!(service = SERVICE_ID, error = %error, "Could not build videos request");
                return None;
            }
        };

        let body = self.fetch_body(url.as_str(), "youtube_videos").await?;
        let details = match VideoListResponse::from_json(&body) {
            Ok(details) => details,
            Err(error) => {
                debug!(service = SERVICE_ID, error = %error, "Unreadable videos response");
                return None;
            }
        };

        let candidates = Candidate::in_search_order(video_ids, &details);
        let winner = select_earliest(&candidates)?;
        debug!(
            service = SERVICE_ID,
            candidates = candidates.len(),
            video_id = %winner.video_id,
            scheduled_start = ?winner.scheduled_start,
            "Selected earliest scheduled broadcast"
        );
        Some(winner.video_id.clone())
    }
}

#[async_trait]
impl LiveService for YouTubeService {
    fn core(&self) -> &ServiceCore {
        &self.core
    }

    async fn check(&self, ctx: Context) -> Result<CheckOutcome> {
        let config = YouTubeConfig::load(&self.core, ctx).await?;

        if !config.video_url.is_empty() && self.core.is_live(ctx).await? {
            debug!(service = SERVICE_ID, context = %ctx, "Live session already resolved");
            return Ok(CheckOutcome::AlreadyLive);
        }

        let Some((channel_id, api_key)) = config.credentials() else {
            debug!(service = SERVICE_ID, context = %ctx, "Channel id or API key missing");
            return Ok(CheckOutcome::Unconfigured);
        };

        let url = match SearchRequest::new(channel_id, api_key, config.video_type).url() {
            Ok(url) => url,
            Err(error) => {
                warn!(service = SERVICE_ID, error = %error, "Could not build search request");
                return Ok(CheckOutcome::TransportFailure);
            }
        };

        let Some(body) = self.fetch_body(url.as_str(), "youtube_search").await else {
            return Ok(CheckOutcome::TransportFailure);
        };

        let search = match SearchListResponse::from_json(&body) {
            Ok(search) => search,
            Err(error) => {
                debug!(service = SERVICE_ID, error = %error, "Unreadable search response");
                return Ok(CheckOutcome::NoBroadcast);
            }
        };

        let video_ids = search.video_ids();
        let Some(first) = video_ids.first() else {
            debug!(service = SERVICE_ID, context = %ctx, channel_id, "No broadcast found");
            return Ok(CheckOutcome::NoBroadcast);
        };

        let video_id = if video_ids.len() > 1 {
            self.disambiguate(&video_ids, api_key)
                .await
                .unwrap_or_else(|| first.to_string())
        } else {
            first.to_string()
        };

        let video_url = watch_url(&video_id);
        self.core.update(ctx, keys::VIDEO_URL, video_url.as_str()).await?;
        if video_url != config.video_url {
            self.core.events().publish(ServiceEvent::VideoResolved {
                service_id: SERVICE_ID.to_string(),
                context: ctx,
                video_url: video_url.clone(),
            });
        }

        let went_live = self.core.set_live(ctx, false).await?;
        info!(
            service = SERVICE_ID,
            context = %ctx,
            video_id = %video_id,
            went_live,
            "Broadcast detected"
        );

        Ok(CheckOutcome::Live {
            video_id,
            video_url,
            went_live,
        })
    }

    async fn get_embed(&self, ctx: Context, page: &mut PageRender) -> Result<String> {
        let config = YouTubeConfig::load(&self.core, ctx).await?;
        Ok(embed::render(&config, page))
    }

    fn service_fields(&self, ctx: Context) -> Vec<FieldDecl> {
        let key = |field: &str| storage_key(SERVICE_ID, ctx, field);

        vec![
            FieldDecl::new("YouTube Channel ID", key(keys::CHANNEL_ID), FieldType::Text)
                .description("The ID of the channel to check."),
            FieldDecl::new("YouTube API Key", key(keys::API_KEY), FieldType::Text)
                .description("Used to connect to the YouTube API."),
            FieldDecl::new("Video Type", key(keys::VIDEO_TYPE), FieldType::Select)
                .description("Search for live broadcasts, or upcoming scheduled ones.")
                .options(vec![
                    FieldOption::new("live", "Live"),
                    FieldOption::new("upcoming", "Upcoming"),
                ])
                .default_value("live"),
            FieldDecl::new("Video URL", key(keys::VIDEO_URL), FieldType::TextUrl)
                .description("The URL of the most recent or currently live video."),
            FieldDecl::new(
                "Subscribe Button",
                key(keys::SHOW_SUBSCRIBE_BUTTON),
                FieldType::Select,
            )
            .options(vec![
                FieldOption::new("show", "Show"),
                FieldOption::new("hide", "Hide"),
            ])
            .default_value("show"),
        ]
    }
}
