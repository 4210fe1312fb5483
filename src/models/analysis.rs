//! Collaborator output and its post-processed form

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

/// Raw collaborator output; derived, never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub markdown: String,
    #[serde(default)]
    pub grounding_sources: Vec<GroundingSource>,
}

/// Fields scraped from the report markdown. Every field is best-effort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedReport {
    pub display_markdown: String,
    pub social_summary: String,
    pub confidence_score: f64,
    pub conviction_reason: String,
}

/// What the session shows after a successful round trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisView {
    pub ticker: String,
    pub report: ProcessedReport,
    pub grounding_sources: Vec<GroundingSource>,
}
