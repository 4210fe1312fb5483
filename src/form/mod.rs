//! Form state: the live TechnicalData value and its auto-save mirror

pub mod controller;
pub mod ticker;

pub use controller::FormController;
pub use ticker::TickerSwitch;
