//! Error types for Cairuilin
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Cairuilin operations
///
/// Covers configuration loading, provider interactions and rendering.
/// The research and news flows never return these to their callers; they
/// log them and degrade to a fallback message instead.
#[derive(Error, Debug)]
pub enum CairuilinError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (API calls, unexpected responses, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Missing credentials for provider
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// Rendering errors (unreadable input, output failures)
    #[error("Render error: {0}")]
    Render(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Cairuilin operations
///
/// Uses `anyhow::Error` so callers get rich context and `?` propagation.
pub type Result<T> = anyhow::Result<T>;
