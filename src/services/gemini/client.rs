//! Gemini REST client

use crate::config::GeminiConfig;
use crate::error::{AnalystError, Result};
use crate::models::{AnalysisResponse, GroundingSource, TechnicalData};
use crate::services::analysis::AnalysisProvider;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::{debug, error, info};

use super::prompt::build_prompt;

const EMPTY_RESPONSE_TEXT: &str = "Analysis generation failed. Please try again.";

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    search_grounding: bool,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Self::with_client(config, http)
    }

    pub fn with_client(config: &GeminiConfig, http: reqwest::Client) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or(AnalystError::MissingApiKey)?;
        Ok(Self {
            http,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            search_grounding: config.search_grounding,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    fn request_body(&self, prompt: &str) -> Value {
        let mut body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseMimeType": "text/plain" },
        });
        if self.search_grounding {
            body["tools"] = json!([{ "googleSearch": {} }]);
        }
        body
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Default, Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Debug, Default, Deserialize)]
struct WebChunk {
    #[serde(default)]
    title: String,
    #[serde(default)]
    uri: String,
}

impl GenerateContentResponse {
    fn into_analysis(self) -> AnalysisResponse {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return AnalysisResponse {
                markdown: EMPTY_RESPONSE_TEXT.to_string(),
                grounding_sources: Vec::new(),
            };
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        let grounding_sources = candidate
            .grounding_metadata
            .map(|meta| {
                meta.grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .map(|web| GroundingSource {
                        title: web.title,
                        uri: web.uri,
                    })
                    .collect()
            })
            .unwrap_or_default();

        AnalysisResponse {
            markdown: if text.trim().is_empty() {
                EMPTY_RESPONSE_TEXT.to_string()
            } else {
                text
            },
            grounding_sources,
        }
    }
}

#[async_trait::async_trait]
impl AnalysisProvider for GeminiClient {
    async fn analyze(&self, ticker: &str, data: &TechnicalData) -> Result<AnalysisResponse> {
        let prompt = build_prompt(ticker, data);
        let start = Instant::now();
        debug!(
            ticker = %ticker,
            model = %self.model,
            prompt_chars = prompt.len(),
            "Sending analysis request"
        );

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(&prompt))
            .send()
            .await
            .map_err(|e| {
                error!(ticker = %ticker, error = %e, "Analysis request failed");
                AnalystError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(ticker = %ticker, status = %status, "Analysis service returned an error status");
            return Err(AnalystError::Collaborator {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let analysis = parsed.into_analysis();
        info!(
            ticker = %ticker,
            duration_ms = start.elapsed().as_millis(),
            sources = analysis.grounding_sources.len(),
            "Analysis received"
        );
        Ok(analysis)
    }
}
