//! Named, durable snapshots of the form

use super::technical::TechnicalData;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
    pub data: TechnicalData,
    /// Creation time, Unix milliseconds
    pub timestamp: i64,
}
