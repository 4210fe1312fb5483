//! Startup recovery of the auto-save slot

use crate::error::{AnalystError, Result};
use crate::form::FormController;
use crate::models::Preset;
use crate::presets::PresetManager;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RecoveryState {
    Idle,
    Checking,
    /// Form hydrated from the slot, banner visible
    BannerShown,
    NoRecovery,
    /// Banner closed for the rest of the session
    Closed,
}

#[derive(Debug)]
pub struct RecoveryFlow {
    state: RecoveryState,
}

impl Default for RecoveryFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl RecoveryFlow {
    pub fn new() -> Self {
        Self {
            state: RecoveryState::Idle,
        }
    }

    pub fn state(&self) -> RecoveryState {
        self.state
    }

    pub fn banner_visible(&self) -> bool {
        self.state == RecoveryState::BannerShown
    }

    /// Inspects the auto-save slot once; later calls leave the state alone.
    pub fn check(&mut self, form: &mut FormController) -> RecoveryState {
        if self.state != RecoveryState::Idle {
            return self.state;
        }
        self.state = RecoveryState::Checking;

        self.state = match form.read_auto_save() {
            Some(snapshot) if snapshot.has_user_input() => {
                info!("Recovered unsaved form input from auto-save");
                form.hydrate(snapshot);
                RecoveryState::BannerShown
            }
            _ => {
                info!("No auto-saved input to recover");
                RecoveryState::NoRecovery
            }
        };
        self.state
    }

    /// Saves the recovered form as a named preset while the banner is up.
    ///
    /// The banner closes only when a preset was actually created; the
    /// auto-save slot keeps mirroring edits either way.
    pub fn promote(
        &mut self,
        name: &str,
        form: &FormController,
        presets: &mut PresetManager,
    ) -> Result<Option<Preset>> {
        if !self.banner_visible() {
            return Err(AnalystError::RecoveryClosed);
        }
        let saved = presets.save(name, form.data())?;
        if saved.is_some() {
            self.close();
        }
        Ok(saved)
    }

    /// Clears the auto-save slot and closes the banner; the live form keeps
    /// the recovered values. Callers gate this behind a confirmation.
    pub fn clear(&mut self, form: &mut FormController) -> Result<()> {
        form.clear_auto_save()?;
        self.close();
        Ok(())
    }

    pub fn dismiss(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        if self.state == RecoveryState::BannerShown {
            self.state = RecoveryState::Closed;
        }
    }
}
