//! Confirmation channel for destructive actions

use serde::Serialize;

/// A destructive action parked until the user confirms or cancels it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "camelCase")]
pub enum PendingAction {
    SwitchTicker(String),
    LoadPreset(String),
    DeletePreset(String),
    ClearAutoSave,
}

impl PendingAction {
    /// Prompt shown to the user
    pub fn prompt(&self) -> &'static str {
        match self {
            PendingAction::SwitchTicker(_) => {
                "You have unsaved changes. Switching tickers will discard your current input (excluding Time Fibs). Continue?"
            }
            PendingAction::LoadPreset(_) => {
                "Loading a preset discards current unsaved changes. Continue?"
            }
            PendingAction::DeletePreset(_) => "Delete this preset? This cannot be undone.",
            PendingAction::ClearAutoSave => "Clear the auto-saved session? This cannot be undone.",
        }
    }
}

/// Result of a gated session operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "action", rename_all = "camelCase")]
pub enum Outcome {
    Applied,
    Unchanged,
    NeedsConfirmation(PendingAction),
}

#[derive(Debug, Default)]
pub struct ConfirmationGate {
    pending: Option<PendingAction>,
}

impl ConfirmationGate {
    /// Parks `action`, replacing anything already waiting
    pub fn request(&mut self, action: PendingAction) -> Outcome {
        self.pending = Some(action.clone());
        Outcome::NeedsConfirmation(action)
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn take(&mut self) -> Option<PendingAction> {
        self.pending.take()
    }

    pub fn cancel(&mut self) -> Option<PendingAction> {
        self.pending.take()
    }
}
