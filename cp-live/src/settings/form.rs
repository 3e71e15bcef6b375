//! Applying a submitted settings form.

use std::collections::BTreeMap;

use tracing::debug;

use crate::Result;
use crate::service::LiveService;

use super::context::Context;
use super::fields::RenderScope;

/// Values submitted in one form save, keyed by storage key.
///
/// Hooks that run while the form is applied may add values; they are written
/// when their field is reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsSave {
    /// Entity being edited, or `None` for the options page.
    pub entity: Option<u64>,
    pub data: BTreeMap<String, String>,
}

impl SettingsSave {
    pub fn global() -> Self {
        Self::default()
    }

    pub fn for_entity(entity_id: u64) -> Self {
        Self {
            entity: Some(entity_id),
            data: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn context(&self) -> Context {
        Context::from(self.entity)
    }
}

/// Writes a submitted form to a service's settings partition.
pub struct SettingsForm;

impl SettingsForm {
    /// Persist every declared field present in `save`, in declaration order.
    ///
    /// Returns the storage keys that were written.
    pub async fn apply(
        service: &dyn LiveService,
        scope: RenderScope,
        save: &mut SettingsSave,
    ) -> Result<Vec<String>> {
        let ctx = save.context();
        let contract = service.settings_contract(ctx, scope);
        let core = service.core();
        let mut written = Vec::new();

        for field in &contract.fields {
            let Some(value) = save.data.get(&field.id).cloned() else {
                continue;
            };

            let previous = core.read_raw(ctx, &field.id).await?;
            let updated = previous.as_deref() != Some(value.as_str());
            core.write_raw(ctx, &field.id, &value).await?;
            written.push(field.id.clone());

            if contract.override_field.as_deref() == Some(field.id.as_str()) {
                debug!(service = service.id(), context = %ctx, updated, "Live flag saved");
                core.live_override(updated, &value, save).await?;
            }
        }

        Ok(written)
    }
}
