//! Cairuilin - research chat and trade-news library
//!
//! This library provides the two AI-backed flows of the Cairuilin Studio
//! research desk: a grounded research chat with collected citation
//! sources, and a one-shot latest news fetch. Reply text is rendered into
//! paragraphs and tables for the terminal or as HTML.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `providers`: AI provider abstraction, the Gemini implementation, and chat sessions
//! - `research`: Transcript, citation sources, and the `ResearchDesk`
//! - `news`: Latest news fetch and board
//! - `render`: Line-block parsing and HTML/terminal output
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use cairuilin::{providers::create_provider, Config, ResearchDesk};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let provider = create_provider(&config.provider)?;
//!     let mut desk = ResearchDesk::new(provider, config.research.clone());
//!     desk.submit_query("글로벌 반도체 공급망 현황").await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod news;
pub mod providers;
pub mod render;
pub mod research;

// Re-export commonly used types
pub use config::Config;
pub use error::{CairuilinError, Result};
pub use news::{NewsBoard, NewsItem};
pub use research::{ResearchDesk, ResearchEvent, SubmitOutcome};

#[cfg(test)]
pub mod test_utils;
