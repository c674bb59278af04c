//! Provider module for Cairuilin
//!
//! This module contains the generative-AI provider abstraction, the Gemini
//! implementation, and the stateful chat session built on top of it.

pub mod base;
pub mod gemini;
pub mod session;

pub use base::{
    Content, GenerateRequest, GenerateResponse, GroundingChunk, GroundingMetadata, Provider,
    Role, WebReference,
};
pub use gemini::GeminiProvider;
pub use session::ChatSession;

use crate::config::ProviderConfig;
use crate::error::Result;
use std::sync::Arc;

/// Create the configured provider
///
/// # Errors
///
/// Returns error if credentials are missing or initialization fails
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn Provider>> {
    Ok(Arc::new(GeminiProvider::new(config.gemini.clone())?))
}
