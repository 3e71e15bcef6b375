//! Live-flag state machine and scoped settings accessors.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::Result;
use crate::notification::{ServiceEvent, ServiceEventBroadcaster};
use crate::settings::{
    Context, FieldDecl, FieldOption, FieldType, SettingsSave, SettingsStore, is_truthy,
    storage_key,
};
use crate::utils::time::{Clock, SystemClock, secs_to_datetime};

use super::hooks::{FieldScope, ServiceHooks, ServiceScope};

/// Default maximum duration of a live session before the expiry guard clears it (6 hours).
pub const DEFAULT_LIVE_DURATION: Duration = Duration::from_secs(6 * 60 * 60);

/// Field keys shared by every service.
pub mod fields {
    pub const IS_LIVE: &str = "is_live";
    pub const LIVE_START: &str = "live_start";
}

use fields::{IS_LIVE, LIVE_START};

/// State and accessors common to every service.
///
/// Every accessor takes the [`Context`] it operates in; nothing about the
/// partition is remembered between calls.
pub struct ServiceCore {
    id: &'static str,
    store: Arc<dyn SettingsStore>,
    hooks: ServiceHooks,
    events: ServiceEventBroadcaster,
    clock: Arc<dyn Clock>,
    live_duration: Duration,
}

impl ServiceCore {
    pub fn new(
        id: &'static str,
        store: Arc<dyn SettingsStore>,
        events: ServiceEventBroadcaster,
    ) -> Self {
        Self {
            id,
            store,
            hooks: ServiceHooks::default(),
            events,
            clock: Arc::new(SystemClock),
            live_duration: DEFAULT_LIVE_DURATION,
        }
    }

    pub fn with_hooks(mut self, hooks: ServiceHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_live_duration(mut self, live_duration: Duration) -> Self {
        self.live_duration = live_duration;
        self
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn events(&self) -> &ServiceEventBroadcaster {
        &self.events
    }

    pub fn live_duration(&self) -> Duration {
        self.live_duration
    }

    /// Current time in Unix seconds.
    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    // ========== Settings access ==========

    /// Read `key`, falling back to `default`, then run the read filters.
    pub async fn get(&self, ctx: Context, key: &str, default: &str) -> Result<String> {
        let stored = match ctx {
            Context::Global => self.store.get_service(self.id, key).await?,
            Context::Entity(entity_id) => self
                .store
                .get_entity_meta(entity_id, &storage_key(self.id, ctx, key))
                .await?
                .filter(|value| !value.is_empty()),
        };
        let value = stored.unwrap_or_else(|| default.to_string());

        let scope = FieldScope {
            service_id: self.id,
            key,
            context: ctx,
        };
        Ok(self.hooks.apply_read(value, &scope))
    }

    /// Run the write filters on `value`, then persist it under `key`.
    pub async fn update(&self, ctx: Context, key: &str, value: impl Into<String>) -> Result<()> {
        let scope = FieldScope {
            service_id: self.id,
            key,
            context: ctx,
        };
        let value = self.hooks.apply_write(value.into(), &scope);

        match ctx {
            Context::Global => self.store.set_service(self.id, key, &value).await,
            Context::Entity(entity_id) => {
                self.store
                    .set_entity_meta(entity_id, &storage_key(self.id, ctx, key), &value)
                    .await
            }
        }
    }

    /// Read an already-prefixed storage key, bypassing filters.
    pub(crate) async fn read_raw(&self, ctx: Context, storage_key: &str) -> Result<Option<String>> {
        match ctx {
            Context::Global => self.store.get_service(self.id, storage_key).await,
            Context::Entity(entity_id) => self.store.get_entity_meta(entity_id, storage_key).await,
        }
    }

    /// Write an already-prefixed storage key, bypassing filters.
    pub(crate) async fn write_raw(&self, ctx: Context, storage_key: &str, value: &str) -> Result<()> {
        match ctx {
            Context::Global => self.store.set_service(self.id, storage_key, value).await,
            Context::Entity(entity_id) => {
                self.store
                    .set_entity_meta(entity_id, storage_key, value)
                    .await
            }
        }
    }

    // ========== Live state ==========

    /// Whether the service is live in `ctx`, after the live-status filters.
    pub async fn is_live(&self, ctx: Context) -> Result<bool> {
        let stored = is_truthy(&self.get(ctx, IS_LIVE, "").await?);
        let scope = ServiceScope {
            service_id: self.id,
            context: ctx,
        };
        Ok(self.hooks.apply_is_live(stored, &scope))
    }

    /// Start time of the current live session, in Unix seconds (0 if unset).
    pub async fn live_start(&self, ctx: Context) -> Result<i64> {
        let raw = self.get(ctx, LIVE_START, "").await?;
        Ok(raw.trim().parse().unwrap_or(0))
    }

    /// Mark the service live.
    ///
    /// Without `force` this is a no-op when already live, so `live_start`
    /// keeps the start of the running session. A live flag with no recorded
    /// start gets `live_start = now`. Returns whether the service went live.
    pub async fn set_live(&self, ctx: Context, force: bool) -> Result<bool> {
        if !force && self.is_live(ctx).await? {
            if self.live_start(ctx).await? <= 0 {
                let now = self.now();
                self.update(ctx, LIVE_START, now.to_string()).await?;
                info!(service = self.id, context = %ctx, live_start = now, "Backfilled missing live_start");
            } else {
                debug!(service = self.id, context = %ctx, "Already live, keeping live_start");
            }
            return Ok(false);
        }

        let now = self.now();
        self.update(ctx, IS_LIVE, "1").await?;
        self.update(ctx, LIVE_START, now.to_string()).await?;

        info!(service = self.id, context = %ctx, live_start = now, forced = force, "Service set live");
        self.events.publish(ServiceEvent::ServiceSetLive {
            service_id: self.id.to_string(),
            context: ctx,
            live_start: secs_to_datetime(now),
            forced: force,
        });
        Ok(true)
    }

    /// Clear the live flag once the session has run longer than the live duration.
    ///
    /// Returns whether the flag was cleared. Exactly at the limit the
    /// session is still considered live.
    pub async fn check_live_status(&self, ctx: Context) -> Result<bool> {
        if !self.is_live(ctx).await? {
            return Ok(false);
        }

        let live_start = self.live_start(ctx).await?;
        let now = self.now();
        let elapsed = now.saturating_sub(live_start);
        let limit = i64::try_from(self.live_duration.as_secs()).unwrap_or(i64::MAX);

        if elapsed <= limit {
            return Ok(false);
        }

        self.update(ctx, IS_LIVE, "0").await?;

        info!(
            service = self.id,
            context = %ctx,
            elapsed_secs = elapsed,
            limit_secs = limit,
            "Live duration exceeded, clearing live status"
        );
        self.events.publish(ServiceEvent::LiveExpired {
            service_id: self.id.to_string(),
            context: ctx,
            live_start: secs_to_datetime(live_start),
            timestamp: secs_to_datetime(now),
        });
        Ok(true)
    }

    /// React to an operator editing the live flag through the settings form.
    ///
    /// `updated` is whether the save changed the stored value, and
    /// `trigger_value` is the submitted value. When the flag was turned on
    /// the pending `live_start` is set in `save` so it is written with the
    /// rest of the form.
    pub async fn live_override(
        &self,
        updated: bool,
        trigger_value: &str,
        save: &mut SettingsSave,
    ) -> Result<()> {
        if !updated {
            return Ok(());
        }

        let ctx = save.context();
        if is_truthy(trigger_value) {
            let now = self.now();
            save.data
                .insert(storage_key(self.id, ctx, LIVE_START), now.to_string());
            self.set_live(ctx, true).await?;
        } else {
            debug!(service = self.id, context = %ctx, "Live flag manually cleared");
        }
        Ok(())
    }

    /// Fields every service declares: the live flag and its start time.
    pub fn base_fields(&self, ctx: Context) -> Vec<FieldDecl> {
        vec![
            FieldDecl::new(
                "Channel Status",
                storage_key(self.id, ctx, IS_LIVE),
                FieldType::RadioInline,
            )
            .options(vec![
                FieldOption::new("1", "Live"),
                FieldOption::new("0", "Not Live"),
            ])
            .default_value("0"),
            FieldDecl::new(
                "Live Start",
                storage_key(self.id, ctx, LIVE_START),
                FieldType::Hidden,
            ),
        ]
    }
}

impl std::fmt::Debug for ServiceCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceCore")
            .field("id", &self.id)
            .field("hooks", &self.hooks)
            .field("live_duration", &self.live_duration)
            .finish_non_exhaustive()
    }
}
