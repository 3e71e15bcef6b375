//! One instance per service type.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::service::{CheckOutcome, LiveService};
use crate::settings::Context;
use crate::{Error, Result};

/// Owns the single instance of every registered service, keyed by service id.
#[derive(Default)]
pub struct ServiceRegistry {
    services: BTreeMap<&'static str, Arc<dyn LiveService>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `service`. A second service with the same id is rejected.
    pub fn register(&mut self, service: Arc<dyn LiveService>) -> Result<()> {
        let id = service.id();
        if self.services.contains_key(id) {
            return Err(Error::validation(format!(
                "service '{id}' is already registered"
            )));
        }
        info!(service = id, "Registered live service");
        self.services.insert(id, service);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn LiveService>> {
        self.services.get(id).cloned()
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.services.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Poll every service in `ctx`, one after another.
    pub async fn check_all(&self, ctx: Context) -> Vec<(&'static str, Result<CheckOutcome>)> {
        let mut results = Vec::with_capacity(self.services.len());
        for (id, service) in &self.services {
            let result = service.check(ctx).await;
            if let Err(error) = &result {
                warn!(service = *id, context = %ctx, error = %error, "Live check failed");
            }
            results.push((*id, result));
        }
        results
    }

    /// Run the expiry guard on every service in `ctx`.
    pub async fn expire_all(&self, ctx: Context) -> Vec<(&'static str, Result<bool>)> {
        let mut results = Vec::with_capacity(self.services.len());
        for (id, service) in &self.services {
            let result = service.core().check_live_status(ctx).await;
            if let Err(error) = &result {
                warn!(service = *id, context = %ctx, error = %error, "Live status expiry failed");
            }
            results.push((*id, result));
        }
        results
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("services", &self.services.keys().collect::<Vec<_>>())
            .finish()
    }
}
