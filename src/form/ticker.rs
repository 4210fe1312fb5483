//! Ticker switch guard

use crate::models::{normalize_ticker, TechnicalData};

/// Result of asking to change the active ticker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickerSwitch {
    /// Blank input or the ticker is already active
    Unchanged,
    /// Unsaved input would be discarded; the caller must confirm first
    NeedsConfirmation(String),
    /// The switch can proceed; carries the normalized ticker
    Ready(String),
}

/// Decides whether switching from `current` to `requested` needs confirmation
pub fn plan_switch(current: &str, requested: &str, form: &TechnicalData) -> TickerSwitch {
    let Some(ticker) = normalize_ticker(requested) else {
        return TickerSwitch::Unchanged;
    };
    if ticker == current {
        return TickerSwitch::Unchanged;
    }
    if form.has_user_input() {
        TickerSwitch::NeedsConfirmation(ticker)
    } else {
        TickerSwitch::Ready(ticker)
    }
}

/// Form value after a ticker switch: everything empty except the time fibs
pub fn form_after_switch(form: &TechnicalData) -> TechnicalData {
    form.reset_keeping_time_fibs()
}
