//! Base provider trait and common types for Cairuilin
//!
//! This module defines the Provider trait that the generative-AI backend
//! implements, along with the request, content, and grounding types that
//! cross the provider boundary.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Author of a content turn, as the service names it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Turn written by the user
    User,
    /// Turn written by the model
    Model,
}

/// A single turn of conversation content
///
/// # Examples
///
/// ```
/// use cairuilin::providers::{Content, Role};
///
/// let turn = Content::user("Semiconductor supply chain outlook");
/// assert_eq!(turn.role, Role::User);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Author of this turn
    pub role: Role,
    /// Plain text of this turn
    pub text: String,
}

impl Content {
    /// Creates a user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// Creates a model turn
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// A generation request
///
/// Carries the conversation so far plus the optional capabilities the
/// service should apply: a system instruction, the web-search retrieval
/// tool, and a strict JSON output schema.
///
/// # Examples
///
/// ```
/// use cairuilin::providers::GenerateRequest;
///
/// let request = GenerateRequest::prompt("List the five newest headlines")
///     .with_search(true)
///     .with_response_schema(serde_json::json!({"type": "ARRAY"}));
/// assert_eq!(request.contents.len(), 1);
/// assert!(request.search);
/// assert!(request.response_schema.is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerateRequest {
    /// System role description
    pub system_instruction: Option<String>,
    /// Ordered conversation contents; the last entry is the new prompt
    pub contents: Vec<Content>,
    /// Enable the web-search retrieval tool
    pub search: bool,
    /// Require the reply to be JSON matching this schema
    pub response_schema: Option<serde_json::Value>,
}

impl GenerateRequest {
    /// Creates a single-turn request from a user prompt
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user(text)],
            ..Default::default()
        }
    }

    /// Creates a request from an existing list of turns
    pub fn from_contents(contents: Vec<Content>) -> Self {
        Self {
            contents,
            ..Default::default()
        }
    }

    /// Sets the system instruction
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Enables or disables the web-search retrieval tool
    pub fn with_search(mut self, enabled: bool) -> Self {
        self.search = enabled;
        self
    }

    /// Requires a JSON reply conforming to `schema`
    pub fn with_response_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// A web document cited by a grounded answer
///
/// Both fields are optional because the service does not guarantee them;
/// consumers validate before use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebReference {
    /// Document URI
    #[serde(default)]
    pub uri: Option<String>,
    /// Document title
    #[serde(default)]
    pub title: Option<String>,
}

/// One retrieved chunk in the grounding metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingChunk {
    /// Present when the chunk came from web search
    #[serde(default)]
    pub web: Option<WebReference>,
}

/// Citation information returned alongside a grounded answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    /// Retrieved chunks, in the order the service reported them
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
    /// Search queries the service issued
    #[serde(default)]
    pub web_search_queries: Vec<String>,
}

impl GroundingMetadata {
    /// Returns true when no chunk carries a web reference
    pub fn is_empty(&self) -> bool {
        self.grounding_chunks.iter().all(|c| c.web.is_none())
    }
}

/// Response from a generation request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateResponse {
    /// Reply text; empty when the service returned no text parts
    pub text: String,
    /// Grounding metadata of the first candidate, if any
    pub grounding: Option<GroundingMetadata>,
}

impl GenerateResponse {
    /// Creates a response with text only
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            grounding: None,
        }
    }

    /// Creates a response with text and grounding metadata
    pub fn with_grounding(text: impl Into<String>, grounding: GroundingMetadata) -> Self {
        Self {
            text: text.into(),
            grounding: Some(grounding),
        }
    }
}

/// Provider trait for the generative-AI service
///
/// # Examples
///
/// ```no_run
/// use cairuilin::providers::{GenerateRequest, GenerateResponse, Provider};
/// use cairuilin::error::Result;
/// use async_trait::async_trait;
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl Provider for EchoProvider {
///     async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
///         let last = request.contents.last().map(|c| c.text.clone()).unwrap_or_default();
///         Ok(GenerateResponse::new(last))
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Runs one generation request
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is malformed
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse>;

    /// Name of the model requests are sent to
    fn model_name(&self) -> String {
        "unknown".to_string()
    }
}
