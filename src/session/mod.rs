//! One user's working session
//!
//! Composes the form controller, presets, recovery banner, confirmation gate
//! and the analysis round trip. Methods run to completion one at a time; the
//! only suspension point is between [`AnalystSession::begin_analysis`] and
//! [`AnalystSession::finish_analysis`].

pub mod confirmation;

pub use confirmation::{ConfirmationGate, Outcome, PendingAction};

use crate::error::{AnalystError, Result};
use crate::form::ticker::{form_after_switch, plan_switch};
use crate::form::{FormController, TickerSwitch};
use crate::models::{
    normalize_ticker, AnalysisResponse, AnalysisView, FieldEdit, Preset, TechnicalData,
};
use crate::presets::PresetManager;
use crate::recovery::{RecoveryFlow, RecoveryState};
use crate::report::{MarkdownReportProcessor, ReportExtractor};
use crate::services::AnalysisProvider;
use crate::store::KeyValueStore;
use std::sync::Arc;
use tracing::{info, warn};

/// The single user-visible message for any failed round trip
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Failed to generate analysis. Please check your network and API Key.";

/// Snapshot handed out when an analysis request starts
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    request_id: u64,
    epoch: u64,
    pub ticker: String,
    pub data: TechnicalData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisFinish {
    Completed,
    Failed,
    /// The ticker changed while the request was in flight
    Discarded,
}

pub struct AnalystSession {
    ticker: String,
    form: FormController,
    presets: PresetManager,
    recovery: RecoveryFlow,
    gate: ConfirmationGate,
    extractor: Arc<dyn ReportExtractor>,
    analysis: Option<AnalysisView>,
    error: Option<String>,
    in_flight: Option<u64>,
    next_request_id: u64,
    epoch: u64,
}

impl AnalystSession {
    /// Builds the session from the persisted store and runs startup recovery
    pub fn start(store: Arc<dyn KeyValueStore>, default_ticker: &str) -> Self {
        let mut form = FormController::new(store.clone());
        let presets = PresetManager::open(store);
        let mut recovery = RecoveryFlow::new();
        recovery.check(&mut form);

        Self {
            ticker: normalize_ticker(default_ticker).unwrap_or_default(),
            form,
            presets,
            recovery,
            gate: ConfirmationGate::default(),
            extractor: Arc::new(MarkdownReportProcessor::new()),
            analysis: None,
            error: None,
            in_flight: None,
            next_request_id: 0,
            epoch: 0,
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn ReportExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn form(&self) -> &TechnicalData {
        self.form.data()
    }

    pub fn is_dirty(&self) -> bool {
        self.form.is_dirty()
    }

    pub fn presets(&self) -> &[Preset] {
        self.presets.list()
    }

    pub fn recovery_state(&self) -> RecoveryState {
        self.recovery.state()
    }

    pub fn recovery_banner_visible(&self) -> bool {
        self.recovery.banner_visible()
    }

    pub fn pending_action(&self) -> Option<&PendingAction> {
        self.gate.pending()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn analysis(&self) -> Option<&AnalysisView> {
        self.analysis.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn update_form(&mut self, data: TechnicalData) -> &TechnicalData {
        self.form.update(data)
    }

    pub fn edit_field(&mut self, edit: FieldEdit) -> &TechnicalData {
        self.form.apply(edit)
    }

    pub fn request_ticker(&mut self, requested: &str) -> Outcome {
        match plan_switch(&self.ticker, requested, self.form.data()) {
            TickerSwitch::Unchanged => Outcome::Unchanged,
            TickerSwitch::NeedsConfirmation(ticker) => {
                self.gate.request(PendingAction::SwitchTicker(ticker))
            }
            TickerSwitch::Ready(ticker) => {
                self.switch_ticker(ticker);
                Outcome::Applied
            }
        }
    }

    pub fn save_preset(&mut self, name: &str) -> Result<Option<Preset>> {
        self.presets.save(name, self.form.data())
    }

    /// Loads a preset into the form, asking first when unsaved input exists
    pub fn request_load_preset(&mut self, id: &str) -> Result<Outcome> {
        if self.presets.get(id).is_none() {
            return Err(AnalystError::NotFound(format!("preset {}", id)));
        }
        if self.form.is_dirty() {
            return Ok(self.gate.request(PendingAction::LoadPreset(id.to_string())));
        }
        self.load_preset(id)?;
        Ok(Outcome::Applied)
    }

    /// Deleting always goes through the confirmation gate
    pub fn request_delete_preset(&mut self, id: &str) -> Outcome {
        self.gate.request(PendingAction::DeletePreset(id.to_string()))
    }

    pub fn promote_recovery(&mut self, name: &str) -> Result<Option<Preset>> {
        self.recovery.promote(name, &self.form, &mut self.presets)
    }

    pub fn request_clear_auto_save(&mut self) -> Outcome {
        self.gate.request(PendingAction::ClearAutoSave)
    }

    pub fn dismiss_recovery(&mut self) {
        self.recovery.dismiss();
    }

    /// Executes the parked action
    pub fn confirm(&mut self) -> Result<Outcome> {
        let action = self.gate.take().ok_or(AnalystError::NoPendingAction)?;
        info!(action = ?action, "Confirmed pending action");
        match action {
            PendingAction::SwitchTicker(ticker) => self.switch_ticker(ticker),
            PendingAction::LoadPreset(id) => self.load_preset(&id)?,
            PendingAction::DeletePreset(id) => self.presets.delete(&id)?,
            PendingAction::ClearAutoSave => self.recovery.clear(&mut self.form)?,
        }
        Ok(Outcome::Applied)
    }

    pub fn cancel(&mut self) -> Option<PendingAction> {
        self.gate.cancel()
    }

    /// Marks the session busy and snapshots what to send.
    ///
    /// Fails with [`AnalystError::Busy`] while another request is in flight.
    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket> {
        if self.in_flight.is_some() {
            return Err(AnalystError::Busy);
        }
        self.next_request_id += 1;
        self.in_flight = Some(self.next_request_id);
        self.error = None;

        Ok(AnalysisTicket {
            request_id: self.next_request_id,
            epoch: self.epoch,
            ticker: self.ticker.clone(),
            data: self.form.data().clone(),
        })
    }

    /// Applies the outcome of a round trip started by `ticket`
    pub fn finish_analysis(
        &mut self,
        ticket: AnalysisTicket,
        result: Result<AnalysisResponse>,
    ) -> AnalysisFinish {
        if self.in_flight == Some(ticket.request_id) {
            self.in_flight = None;
        }

        if ticket.epoch != self.epoch {
            info!(ticker = %ticket.ticker, "Discarding analysis for a ticker no longer selected");
            return AnalysisFinish::Discarded;
        }

        match result {
            Ok(response) => {
                let report = self.extractor.extract(&response.markdown);
                self.analysis = Some(AnalysisView {
                    ticker: ticket.ticker,
                    report,
                    grounding_sources: response.grounding_sources,
                });
                AnalysisFinish::Completed
            }
            Err(e) => {
                warn!(ticker = %ticket.ticker, error = %e, "Analysis failed");
                self.analysis = None;
                self.error = Some(ANALYSIS_FAILED_MESSAGE.to_string());
                AnalysisFinish::Failed
            }
        }
    }

    /// Runs a full round trip while holding the session
    pub async fn analyze(&mut self, provider: &dyn AnalysisProvider) -> Result<AnalysisFinish> {
        let ticket = self.begin_analysis()?;
        let result = provider.analyze(&ticket.ticker, &ticket.data).await;
        Ok(self.finish_analysis(ticket, result))
    }

    fn switch_ticker(&mut self, ticker: String) {
        info!(from = %self.ticker, to = %ticker, "Switching ticker");
        let reset = form_after_switch(self.form.data());
        self.form.update(reset);
        self.ticker = ticker;
        self.analysis = None;
        self.error = None;
        self.epoch += 1;
    }

    fn load_preset(&mut self, id: &str) -> Result<()> {
        let data = self.presets.load(id)?;
        self.form.update(data);
        info!(preset_id = %id, "Loaded preset into form");
        Ok(())
    }
}
