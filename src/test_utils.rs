//! Test utilities for Cairuilin
//!
//! This module provides a scripted provider for driving the research and
//! news flows without network access, plus small assertion helpers.

use crate::error::{CairuilinError, Result};
use crate::providers::{
    GenerateRequest, GenerateResponse, GroundingChunk, GroundingMetadata, Provider, WebReference,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Provider that replays a fixed script of outcomes
///
/// Each call pops the next entry; `Err` entries become provider errors.
/// When the script runs out every call fails. All requests are recorded.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<std::result::Result<GenerateResponse, String>>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedProvider {
    /// Create a provider from a script of outcomes
    pub fn new(script: Vec<std::result::Result<GenerateResponse, String>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(CairuilinError::Provider(message).into()),
            None => Err(CairuilinError::Provider("script exhausted".to_string()).into()),
        }
    }

    fn model_name(&self) -> String {
        "scripted".to_string()
    }
}

/// Build grounding metadata from `(title, uri)` pairs
pub fn grounding(pairs: &[(&str, &str)]) -> GroundingMetadata {
    GroundingMetadata {
        grounding_chunks: pairs
            .iter()
            .map(|(title, uri)| GroundingChunk {
                web: Some(WebReference {
                    uri: Some(uri.to_string()),
                    title: Some(title.to_string()),
                }),
            })
            .collect(),
        web_search_queries: Vec::new(),
    }
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}', got Ok", expected),
        Err(e) => {
            let message = e.to_string();
            assert!(
                message.contains(expected),
                "Expected error containing '{}', got '{}'",
                expected,
                message
            );
        }
    }
}
