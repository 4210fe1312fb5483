//! Preset Manager: create, load and delete named form snapshots
//!
//! The full list is rewritten on every change so the stored value is always
//! one whole record.

use crate::error::{AnalystError, Result};
use crate::models::{Preset, TechnicalData};
use crate::store::{self, KeyValueStore, PRESETS_KEY};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

pub struct PresetManager {
    store: Arc<dyn KeyValueStore>,
    presets: Vec<Preset>,
}

impl PresetManager {
    /// Loads the preset list from the store; a malformed list starts empty
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let presets: Vec<Preset> =
            store::read_record(store.as_ref(), PRESETS_KEY).unwrap_or_default();
        debug!(count = presets.len(), "Loaded presets");
        Self { store, presets }
    }

    /// Presets in creation order
    pub fn list(&self) -> &[Preset] {
        &self.presets
    }

    pub fn get(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.id == id)
    }

    /// Saves a snapshot of `data` under `name`.
    ///
    /// Returns `Ok(None)` without writing when the trimmed name is empty.
    pub fn save(&mut self, name: &str, data: &TechnicalData) -> Result<Option<Preset>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let preset = Preset {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            data: data.clone(),
            timestamp: Utc::now().timestamp_millis(),
        };

        let mut updated = self.presets.clone();
        updated.push(preset.clone());
        self.persist(updated)?;

        info!(preset_id = %preset.id, name = %preset.name, "Saved preset");
        Ok(Some(preset))
    }

    /// Returns an independent copy of the stored snapshot
    pub fn load(&self, id: &str) -> Result<TechnicalData> {
        self.get(id)
            .map(|preset| preset.data.clone())
            .ok_or_else(|| AnalystError::NotFound(format!("preset {}", id)))
    }

    /// Removes the preset; an unknown id is a no-op
    pub fn delete(&mut self, id: &str) -> Result<()> {
        if self.get(id).is_none() {
            debug!(preset_id = %id, "Delete requested for unknown preset");
            return Ok(());
        }

        let updated: Vec<Preset> = self.presets.iter().filter(|p| p.id != id).cloned().collect();
        self.persist(updated)?;

        info!(preset_id = %id, "Deleted preset");
        Ok(())
    }

    fn persist(&mut self, presets: Vec<Preset>) -> Result<()> {
        store::write_record(self.store.as_ref(), PRESETS_KEY, &presets)?;
        self.presets = presets;
        Ok(())
    }
}
