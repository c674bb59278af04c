//! Gemini provider implementation for Cairuilin
//!
//! This module implements the Provider trait against the Gemini
//! `generateContent` REST endpoint, with optional `google_search`
//! grounding and schema-constrained JSON output.

use crate::config::GeminiConfig;
use crate::error::{CairuilinError, Result};
use crate::providers::{
    Content, GenerateRequest, GenerateResponse, GroundingChunk, GroundingMetadata, Provider,
};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gemini API provider
///
/// # Examples
///
/// ```no_run
/// use cairuilin::config::GeminiConfig;
/// use cairuilin::providers::{GeminiProvider, GenerateRequest, Provider};
///
/// # async fn example() -> cairuilin::error::Result<()> {
/// let provider = GeminiProvider::with_api_key(GeminiConfig::default(), "my-key")?;
/// let response = provider
///     .generate(&GenerateRequest::prompt("Hello!").with_search(true))
///     .await?;
/// println!("{}", response.text);
/// # Ok(())
/// # }
/// ```
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
    api_key: String,
}

/// Request body for `generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiSystemInstruction>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<GeminiTool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing)]
    thought: Option<bool>,
}

#[derive(Debug, Serialize)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Default)]
struct GeminiTool {
    google_search: GoogleSearchConfig,
}

#[derive(Debug, Serialize, Default)]
struct GoogleSearchConfig {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

/// Response body from `generateContent`
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    grounding_metadata: Option<serde_json::Value>,
    #[serde(default)]
    finish_reason: Option<String>,
}

fn text_part(text: &str) -> GeminiPart {
    GeminiPart {
        text: Some(text.to_string()),
        thought: None,
    }
}

impl GeminiProvider {
    /// Create a new Gemini provider, resolving the API key from config or env
    ///
    /// # Errors
    ///
    /// Returns `CairuilinError::MissingCredentials` when no key is configured,
    /// or a provider error if the HTTP client cannot be built
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config.resolved_api_key()?;
        Self::with_api_key(config, api_key)
    }

    /// Create a new Gemini provider with an explicit API key
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn with_api_key(config: GeminiConfig, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("cairuilin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CairuilinError::Http)?;

        tracing::info!(
            "Initialized Gemini provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self {
            client,
            config,
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    fn convert_contents(contents: &[Content]) -> Vec<GeminiContent> {
        contents
            .iter()
            .map(|c| GeminiContent {
                role: Some(
                    match c.role {
                        crate::providers::Role::User => "user",
                        crate::providers::Role::Model => "model",
                    }
                    .to_string(),
                ),
                parts: vec![text_part(&c.text)],
            })
            .collect()
    }

    fn build_request(request: &GenerateRequest) -> GeminiRequest {
        GeminiRequest {
            contents: Self::convert_contents(&request.contents),
            system_instruction: request
                .system_instruction
                .as_deref()
                .map(|text| GeminiSystemInstruction {
                    parts: vec![text_part(text)],
                }),
            tools: if request.search {
                vec![GeminiTool::default()]
            } else {
                Vec::new()
            },
            generation_config: request.response_schema.as_ref().map(|schema| {
                GeminiGenerationConfig {
                    response_mime_type: "application/json".to_string(),
                    response_schema: schema.clone(),
                }
            }),
        }
    }
}

/// Concatenate the non-thought text parts of a candidate
fn extract_text(candidate: &GeminiCandidate) -> String {
    candidate
        .content
        .as_ref()
        .map(|content| {
            content
                .parts
                .iter()
                .filter(|p| !p.thought.unwrap_or(false))
                .filter_map(|p| p.text.as_deref())
                .collect::<String>()
        })
        .unwrap_or_default()
}

/// Parse grounding metadata, dropping chunks whose shape is unexpected
fn extract_grounding(raw: &serde_json::Value) -> GroundingMetadata {
    let grounding_chunks = raw
        .get("groundingChunks")
        .and_then(|c| c.as_array())
        .map(|chunks| {
            chunks
                .iter()
                .filter_map(|chunk| {
                    match serde_json::from_value::<GroundingChunk>(chunk.clone()) {
                        Ok(parsed) => Some(parsed),
                        Err(e) => {
                            tracing::warn!("Skipping malformed grounding chunk: {}", e);
                            None
                        }
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    let web_search_queries = raw
        .get("webSearchQueries")
        .and_then(|q| q.as_array())
        .map(|queries| {
            queries
                .iter()
                .filter_map(|q| q.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    GroundingMetadata {
        grounding_chunks,
        web_search_queries,
    }
}

/// Build a provider error from a non-success response body
fn map_http_error(status: StatusCode, body: &str) -> CairuilinError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or_else(|| body.to_string());

    CairuilinError::Provider(format!("Gemini returned error {}: {}", status, message))
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let url = self.endpoint();
        let body = Self::build_request(request);

        tracing::debug!(
            "Sending Gemini request: {} contents, search={}, schema={}",
            body.contents.len(),
            request.search,
            request.response_schema.is_some()
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {}", e);
                CairuilinError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, error_text);
            return Err(map_http_error(status, &error_text).into());
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            CairuilinError::Http(e)
        })?;

        let Some(candidate) = gemini_response.candidates.first() else {
            tracing::warn!("Gemini response contained no candidates");
            return Ok(GenerateResponse::default());
        };

        tracing::debug!(
            "Gemini response: finish_reason={:?}, grounded={}",
            candidate.finish_reason,
            candidate.grounding_metadata.is_some()
        );

        Ok(GenerateResponse {
            text: extract_text(candidate),
            grounding: candidate.grounding_metadata.as_ref().map(extract_grounding),
        })
    }

    fn model_name(&self) -> String {
        self.config.model.clone()
    }
}
