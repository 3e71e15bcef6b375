//! Periodic polling.
//!
//! A single loop drives every service: each tick polls all services and then
//! runs their expiry guard, so no two checks for one service ever overlap.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::registry::ServiceRegistry;
use crate::service::CheckOutcome;
use crate::settings::Context;

/// Summary of one scheduler tick.
#[derive(Debug, Default)]
pub struct TickReport {
    pub checked: Vec<(&'static str, CheckOutcome)>,
    pub expired: Vec<&'static str>,
    pub errors: usize,
}

pub struct Scheduler {
    registry: Arc<ServiceRegistry>,
    interval: Duration,
}

impl Scheduler {
    pub fn new(registry: Arc<ServiceRegistry>, interval: Duration) -> Self {
        Self { registry, interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll and expire every service once, in the global context.
    pub async fn tick(&self) -> TickReport {
        let mut report = TickReport::default();

        for (id, result) in self.registry.check_all(Context::Global).await {
            match result {
                Ok(outcome) => report.checked.push((id, outcome)),
                Err(_) => report.errors += 1,
            }
        }

        for (id, result) in self.registry.expire_all(Context::Global).await {
            match result {
                Ok(true) => report.expired.push(id),
                Ok(false) => {}
                Err(_) => report.errors += 1,
            }
        }

        report
    }

    /// Tick until `cancel` fires. The first tick runs immediately.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            interval_secs = self.interval.as_secs(),
            services = self.registry.len(),
            "Scheduler started"
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    let report = self.tick().await;
                    debug!(
                        checked = report.checked.len(),
                        expired = report.expired.len(),
                        errors = report.errors,
                        "Scheduler tick complete"
                    );
                }
            }
        }

        info!("Scheduler stopped");
    }
}
