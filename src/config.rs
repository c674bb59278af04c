//! Configuration management for Cairuilin
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{CairuilinError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Cairuilin
///
/// Holds the provider settings plus the settings of the two AI-backed
/// flows: the research chat and the latest-news board.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Research chat configuration
    #[serde(default)]
    pub research: ResearchConfig,
    /// Latest news board configuration
    #[serde(default)]
    pub news: NewsConfig,
}

/// Provider configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
}

/// Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model to use for both flows
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API base URL (useful for tests and local mocks)
    ///
    /// Requests go to `{api_base}/models/{model}:generateContent`.
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,

    /// API key; prefer the `CAIRUILIN_API_KEY` environment variable
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// HTTP timeout for a single request (seconds)
    #[serde(default = "default_request_timeout")]
    pub timeout_seconds: u64,
}

fn default_gemini_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_request_timeout() -> u64 {
    120
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            api_base: default_gemini_api_base(),
            api_key: None,
            timeout_seconds: default_request_timeout(),
        }
    }
}

/// Research chat configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchConfig {
    /// System role description given to the chat session
    #[serde(default = "default_system_instruction")]
    pub system_instruction: String,

    /// Enable the web-search retrieval tool for chat turns
    #[serde(default = "default_true")]
    pub search_enabled: bool,

    /// Maximum number of citation sources kept
    #[serde(default = "default_max_sources")]
    pub max_sources: usize,

    /// Assistant message appended when a chat turn fails
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,

    /// Suggested starter queries
    #[serde(default = "default_suggestions")]
    pub suggestions: Vec<String>,
}

fn default_system_instruction() -> String {
    "You are CAIRUILIN STUDIO's AI Research Lead. Provide professional, data-driven insights. \
     ALWAYS use Markdown tables for data comparisons or list of statistics. \
     For every key fact, cite the search result. Link every citation to the source URL."
        .to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_sources() -> usize {
    15
}

fn default_fallback_message() -> String {
    "데이터를 분석하는 과정에서 오류가 발생했습니다. 다시 시도해 주세요.".to_string()
}

fn default_suggestions() -> Vec<String> {
    vec![
        "글로벌 반도체 공급망 현황".to_string(),
        "2025 무역 분쟁 전망".to_string(),
        "전기차 배터리 시장 점유율 표".to_string(),
    ]
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            system_instruction: default_system_instruction(),
            search_enabled: default_true(),
            max_sources: default_max_sources(),
            fallback_message: default_fallback_message(),
            suggestions: default_suggestions(),
        }
    }
}

/// Latest news board configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// Listing page the news items are extracted from
    #[serde(default = "default_news_source_url")]
    pub source_url: String,

    /// Number of items requested and displayed
    #[serde(default = "default_news_count")]
    pub count: usize,

    /// Item links are only trusted when they contain this domain
    #[serde(default = "default_trusted_domain")]
    pub trusted_domain: String,

    /// Title of the sentinel item shown when the fetch fails
    #[serde(default = "default_news_error_title")]
    pub error_title: String,

    /// Date of the sentinel item shown when the fetch fails
    #[serde(default = "default_placeholder_date")]
    pub placeholder_date: String,

    /// Enable the web-search retrieval tool for the news request
    #[serde(default = "default_true")]
    pub search_enabled: bool,
}

fn default_news_source_url() -> String {
    "https://www.kita.net/board/totalTradeNews/totalTradeNewsList.do".to_string()
}

fn default_news_count() -> usize {
    5
}

fn default_trusted_domain() -> String {
    "kita.net".to_string()
}

fn default_news_error_title() -> String {
    "데이터를 불러오는 중 오류가 발생했습니다.".to_string()
}

fn default_placeholder_date() -> String {
    "-".to_string()
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            source_url: default_news_source_url(),
            count: default_news_count(),
            trusted_domain: default_trusted_domain(),
            error_title: default_news_error_title(),
            placeholder_date: default_placeholder_date(),
            search_enabled: default_true(),
        }
    }
}

impl GeminiConfig {
    /// Resolve the API key from config or the environment
    ///
    /// Lookup order: the `api_key` field, `CAIRUILIN_API_KEY`,
    /// `GEMINI_API_KEY`, then `API_KEY`. Empty values are skipped.
    ///
    /// # Errors
    ///
    /// Returns `CairuilinError::MissingCredentials` when no key is found
    pub fn resolved_api_key(&self) -> Result<String> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            return Ok(key.clone());
        }

        for var in ["CAIRUILIN_API_KEY", "GEMINI_API_KEY", "API_KEY"] {
            if let Ok(key) = std::env::var(var) {
                if !key.trim().is_empty() {
                    tracing::debug!("Using Gemini API key from {}", var);
                    return Ok(key);
                }
            }
        }

        Err(CairuilinError::MissingCredentials(
            "gemini (set CAIRUILIN_API_KEY or provider.gemini.api_key)".to_string(),
        )
        .into())
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(CairuilinError::Io)
            .with_context(|| format!("Failed to read config file {}", path))?;
        let config = serde_yaml::from_str(&contents)
            .map_err(CairuilinError::Yaml)
            .with_context(|| format!("Failed to parse config file {}", path))?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(model) = std::env::var("CAIRUILIN_MODEL") {
            tracing::debug!(model = %model, "Env override: CAIRUILIN_MODEL");
            self.provider.gemini.model = model;
        }

        if let Ok(api_base) = std::env::var("CAIRUILIN_API_BASE") {
            tracing::debug!(api_base = %api_base, "Env override: CAIRUILIN_API_BASE");
            self.provider.gemini.api_base = api_base;
        }

        if let Ok(max_sources) = std::env::var("CAIRUILIN_MAX_SOURCES") {
            match max_sources.parse() {
                Ok(value) => self.research.max_sources = value,
                Err(_) => tracing::warn!("Invalid CAIRUILIN_MAX_SOURCES: {}", max_sources),
            }
        }

        if let Ok(source_url) = std::env::var("CAIRUILIN_NEWS_URL") {
            tracing::debug!(source_url = %source_url, "Env override: CAIRUILIN_NEWS_URL");
            self.news.source_url = source_url;
        }

        if let Ok(count) = std::env::var("CAIRUILIN_NEWS_COUNT") {
            match count.parse() {
                Ok(value) => self.news.count = value,
                Err(_) => tracing::warn!("Invalid CAIRUILIN_NEWS_COUNT: {}", count),
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(model) = &cli.model {
            tracing::debug!("Using model override from CLI: {}", model);
            self.provider.gemini.model = model.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `CairuilinError::Config` describing the first failed check
    pub fn validate(&self) -> Result<()> {
        if self.provider.gemini.model.trim().is_empty() {
            return Err(CairuilinError::Config("Model cannot be empty".to_string()).into());
        }

        if url::Url::parse(&self.provider.gemini.api_base).is_err() {
            return Err(CairuilinError::Config(format!(
                "provider.gemini.api_base is not a valid URL: {}",
                self.provider.gemini.api_base
            ))
            .into());
        }

        if self.provider.gemini.timeout_seconds == 0 {
            return Err(CairuilinError::Config(
                "provider.gemini.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.research.max_sources == 0 {
            return Err(CairuilinError::Config(
                "research.max_sources must be greater than 0".to_string(),
            )
            .into());
        }

        if self.news.count == 0 {
            return Err(
                CairuilinError::Config("news.count must be greater than 0".to_string()).into(),
            );
        }

        if url::Url::parse(&self.news.source_url).is_err() {
            return Err(CairuilinError::Config(format!(
                "news.source_url is not a valid URL: {}",
                self.news.source_url
            ))
            .into());
        }

        Ok(())
    }
}
