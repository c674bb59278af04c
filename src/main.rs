//! Cairuilin - research chat and trade-news CLI
//!
#![doc = "Main entry point for the Cairuilin research desk."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cairuilin::cli::{Cli, Commands};
use cairuilin::commands;
use cairuilin::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    match cli.command {
        Commands::Research { query, html } => {
            if query.is_some() {
                tracing::debug!("Single query mode");
            }
            commands::research::run_research(config, query, html).await?;
            Ok(())
        }
        Commands::News { json } => {
            commands::news::run_news(config, json).await?;
            Ok(())
        }
        Commands::Render { file, html } => {
            tracing::debug!("Rendering {}", file.display());
            commands::render::run_render(&file, html)?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so rendered output on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "cairuilin=debug"
    } else {
        "cairuilin=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
