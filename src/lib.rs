//! Crypto Analyst
//!
//! Manual technical-analysis inputs for a ticker, persisted per profile,
//! sent to a generative-AI collaborator and post-processed into a report.

pub mod config;
pub mod core;
pub mod error;
pub mod form;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod presets;
pub mod recovery;
pub mod report;
pub mod services;
pub mod session;
pub mod store;

pub use error::{AnalystError, Result};
