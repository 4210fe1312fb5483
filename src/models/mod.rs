//! Shared data models spanning the form, persistence and report layers.

pub mod analysis;
pub mod preset;
pub mod technical;
pub mod ticker;

pub use analysis::{AnalysisResponse, AnalysisView, GroundingSource, ProcessedReport};
pub use preset::Preset;
pub use technical::{
    FieldEdit, SweepSlot, TechnicalData, TimeFibLevel, TimeFibs, Timeframe, TimeframeMap,
    WeeklySweep,
};
pub use ticker::{normalize_ticker, PRESET_TICKERS};
