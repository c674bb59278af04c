//! Stateful chat sessions over a stateless provider
//!
//! The generation endpoint has no server-side conversation state, so a
//! `ChatSession` keeps the turn history itself and replays it on every
//! request. A turn is committed to history only after the provider
//! answers, which lets a failed turn be retried on the same session.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::{Content, GenerateRequest, GenerateResponse, Provider};

/// A multi-turn conversation with a fixed system role
pub struct ChatSession {
    provider: Arc<dyn Provider>,
    system_instruction: String,
    search: bool,
    history: Vec<Content>,
}

impl ChatSession {
    /// Start a new session
    ///
    /// # Arguments
    ///
    /// * `provider` - Provider every turn is sent to
    /// * `system_instruction` - Role description applied to every turn
    /// * `search` - Enable the web-search retrieval tool
    pub fn new(
        provider: Arc<dyn Provider>,
        system_instruction: impl Into<String>,
        search: bool,
    ) -> Self {
        Self {
            provider,
            system_instruction: system_instruction.into(),
            search,
            history: Vec::new(),
        }
    }

    /// Send one user message and wait for the reply
    ///
    /// # Errors
    ///
    /// Returns the provider error unchanged; history is not modified
    pub async fn send_message(&mut self, text: &str) -> Result<GenerateResponse> {
        let mut contents = self.history.clone();
        contents.push(Content::user(text));

        let request = GenerateRequest::from_contents(contents)
            .with_system_instruction(self.system_instruction.clone())
            .with_search(self.search);

        let response = self.provider.generate(&request).await?;

        self.history.push(Content::user(text));
        self.history.push(Content::model(response.text.clone()));
        tracing::debug!("Chat session now holds {} turns", self.history.len());

        Ok(response)
    }

    /// Turns committed so far
    pub fn history(&self) -> &[Content] {
        &self.history
    }

    /// System role description of this session
    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }
}
