//! Command-line interface definition for Cairuilin
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for the research chat, the news board, and
//! offline rendering of reply text.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cairuilin - research chat and trade-news desk
///
/// Ask grounded research questions and read the latest trade news
/// through a Gemini model with web search enabled.
#[derive(Parser, Debug, Clone)]
#[command(name = "cairuilin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the Gemini model from config
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Cairuilin
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the research chat (interactive unless --query is given)
    Research {
        /// Ask a single question and exit
        #[arg(short, long)]
        query: Option<String>,

        /// Print replies as HTML fragments instead of terminal text
        #[arg(long)]
        html: bool,
    },

    /// Fetch and show the latest trade news
    News {
        /// Output the news items as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render reply text from a file into paragraphs and tables
    Render {
        /// File to render (`-` reads stdin)
        file: PathBuf,

        /// Output an HTML fragment instead of terminal text
        #[arg(long)]
        html: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            model: None,
            command: Commands::News { json: false },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default() {
        let cli = Cli::default();
        assert_eq!(cli.config, Some("config/config.yaml".to_string()));
        assert!(!cli.verbose);
        assert!(cli.model.is_none());
        assert!(matches!(cli.command, Commands::News { json: false }));
    }

    #[test]
    fn test_cli_parse_research_interactive() {
        let cli = Cli::try_parse_from(["cairuilin", "research"]).unwrap();
        if let Commands::Research { query, html } = cli.command {
            assert!(query.is_none());
            assert!(!html);
        } else {
            panic!("Expected Research command");
        }
    }

    #[test]
    fn test_cli_parse_research_single_query() {
        let cli =
            Cli::try_parse_from(["cairuilin", "research", "--query", "반도체 공급망", "--html"])
                .unwrap();
        if let Commands::Research { query, html } = cli.command {
            assert_eq!(query.as_deref(), Some("반도체 공급망"));
            assert!(html);
        } else {
            panic!("Expected Research command");
        }
    }

    #[test]
    fn test_cli_parse_news_json() {
        let cli = Cli::try_parse_from(["cairuilin", "news", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::News { json: true }));
    }

    #[test]
    fn test_cli_parse_render_requires_file() {
        assert!(Cli::try_parse_from(["cairuilin", "render"]).is_err());

        let cli = Cli::try_parse_from(["cairuilin", "render", "reply.txt"]).unwrap();
        if let Commands::Render { file, html } = cli.command {
            assert_eq!(file, PathBuf::from("reply.txt"));
            assert!(!html);
        } else {
            panic!("Expected Render command");
        }
    }

    #[test]
    fn test_cli_parse_global_model_after_subcommand() {
        let cli =
            Cli::try_parse_from(["cairuilin", "news", "--model", "gemini-2.5-flash"]).unwrap();
        assert_eq!(cli.model.as_deref(), Some("gemini-2.5-flash"));
    }

    #[test]
    fn test_cli_parse_config_and_verbose() {
        let cli =
            Cli::try_parse_from(["cairuilin", "-v", "--config", "alt.yaml", "news"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some("alt.yaml"));
    }

    #[test]
    fn test_cli_invalid_command() {
        assert!(Cli::try_parse_from(["cairuilin", "deploy"]).is_err());
    }
}
