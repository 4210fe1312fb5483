//! Form State Controller
//!
//! Owns the live form value. Every mutation is mirrored into the auto-save
//! slot unless the value is identical to the snapshot last written there.

use crate::error::Result;
use crate::models::{FieldEdit, TechnicalData};
use crate::store::{self, KeyValueStore, AUTO_SAVE_KEY};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct FormController {
    store: Arc<dyn KeyValueStore>,
    data: TechnicalData,
    last_saved: Option<TechnicalData>,
}

impl FormController {
    /// Starts from the empty baseline without touching the store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            data: TechnicalData::default(),
            last_saved: None,
        }
    }

    pub fn data(&self) -> &TechnicalData {
        &self.data
    }

    pub fn is_dirty(&self) -> bool {
        self.data.has_user_input()
    }

    /// Replaces the live value and mirrors it to the auto-save slot
    pub fn update(&mut self, data: TechnicalData) -> &TechnicalData {
        self.data = data;
        self.mirror();
        &self.data
    }

    /// Applies a single-field edit; sibling values in the group are kept
    pub fn apply(&mut self, edit: FieldEdit) -> &TechnicalData {
        let next = self.data.apply(edit);
        self.update(next)
    }

    /// Loads a recovered snapshot without writing it back
    pub fn hydrate(&mut self, data: TechnicalData) {
        self.last_saved = Some(data.clone());
        self.data = data;
    }

    /// Reads the auto-save slot; malformed records are treated as absent
    pub fn read_auto_save(&self) -> Option<TechnicalData> {
        store::read_record(self.store.as_ref(), AUTO_SAVE_KEY)
    }

    /// Deletes the auto-save slot. The live value is left alone and the next
    /// edit re-creates the slot.
    pub fn clear_auto_save(&mut self) -> Result<()> {
        self.store.delete(AUTO_SAVE_KEY)?;
        self.last_saved = None;
        debug!("Auto-save slot cleared");
        Ok(())
    }

    fn mirror(&mut self) {
        if self.last_saved.as_ref() == Some(&self.data) {
            return;
        }
        match store::write_record(self.store.as_ref(), AUTO_SAVE_KEY, &self.data) {
            Ok(()) => {
                debug!(dirty = self.data.has_user_input(), "Auto-saved form");
                self.last_saved = Some(self.data.clone());
            }
            Err(e) => warn!(error = %e, "Failed to write auto-save slot"),
        }
    }
}
