use async_trait::async_trait;
use serde::Serialize;

use crate::Result;
use crate::settings::{Context, FieldDecl, RenderScope, SettingsContract, storage_key};

use super::base::{ServiceCore, fields::IS_LIVE};

/// Result of one poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// Already live with a resolved video; no request was made.
    AlreadyLive,
    /// Channel id or credentials are missing.
    Unconfigured,
    /// The request failed or returned an empty body. Retried next cycle.
    TransportFailure,
    /// The channel has no matching broadcast.
    NoBroadcast,
    /// A broadcast was found and stored.
    Live {
        video_id: String,
        video_url: String,
        /// The live flag flipped during this poll.
        went_live: bool,
    },
}

impl CheckOutcome {
    pub fn is_live(&self) -> bool {
        matches!(self, Self::AlreadyLive | Self::Live { .. })
    }
}

/// Per-page render state shared by every embed rendered on one page.
#[derive(Debug, Clone, Default)]
pub struct PageRender {
    subscribe_script_included: bool,
}

impl PageRender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time it is called on this page.
    pub fn claim_subscribe_script(&mut self) -> bool {
        !std::mem::replace(&mut self.subscribe_script_included, true)
    }
}

/// A live-video source.
#[async_trait]
pub trait LiveService: Send + Sync {
    fn core(&self) -> &ServiceCore;

    fn id(&self) -> &'static str {
        self.core().id()
    }

    /// Poll the remote platform and update the live state in `ctx`.
    async fn check(&self, ctx: Context) -> Result<CheckOutcome>;

    /// Embed markup for the stored video, or an empty string.
    async fn get_embed(&self, ctx: Context, page: &mut PageRender) -> Result<String>;

    /// Fields specific to this service, declared before the shared ones.
    fn service_fields(&self, _ctx: Context) -> Vec<FieldDecl> {
        Vec::new()
    }

    /// Full field set for `ctx`, and the live-override field if saves can be hooked in `scope`.
    fn settings_contract(&self, ctx: Context, scope: RenderScope) -> SettingsContract {
        let mut fields = self.service_fields(ctx);
        fields.extend(self.core().base_fields(ctx));

        let override_field = scope
            .can_hook_saves()
            .then(|| storage_key(self.id(), ctx, IS_LIVE));

        SettingsContract {
            fields,
            override_field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_script_is_claimed_once_per_page() {
        let mut page = PageRender::new();
        assert!(page.claim_subscribe_script());
        assert!(!page.claim_subscribe_script());
        assert!(PageRender::new().claim_subscribe_script());
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let json = serde_json::to_value(CheckOutcome::Live {
            video_id: "abc".to_string(),
            video_url: "https://youtube.com/watch?v=abc".to_string(),
            went_live: true,
        })
        .unwrap();
        assert_eq!(json["outcome"], "live");
        assert_eq!(json["video_id"], "abc");
        assert!(CheckOutcome::AlreadyLive.is_live());
        assert!(!CheckOutcome::NoBroadcast.is_live());
    }
}
