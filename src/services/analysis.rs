//! Analysis provider interface

use crate::error::Result;
use crate::models::{AnalysisResponse, TechnicalData};

/// One prompt/response round trip with a text-generation service
#[async_trait::async_trait]
pub trait AnalysisProvider: Send + Sync {
    async fn analyze(&self, ticker: &str, data: &TechnicalData) -> Result<AnalysisResponse>;
}
