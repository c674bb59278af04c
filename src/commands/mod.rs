/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes three top-level command modules:

- `research` - Interactive research session or a single query
- `news`     - Latest trade news board
- `render`   - Offline rendering of reply text
*/

use crate::config::Config;
use crate::error::{CairuilinError, Result};
use crate::providers::create_provider;
use crate::render::{
    parse_blocks, render_html, render_message, render_message_html, render_sources,
    render_sources_html, render_terminal,
};

// Special commands parser for the research session
pub mod special_commands;

// Research command handler
pub mod research {
    //! Research session handler.
    //!
    //! Creates the provider and a `ResearchDesk`, then either submits one
    //! query or runs a readline loop until the user exits.

    use super::*;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use crate::research::{ResearchDesk, SubmitOutcome};
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Run the research command
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `query` - Submit this query once instead of starting a session
    /// * `html` - Print HTML fragments instead of terminal text
    pub async fn run_research(config: Config, query: Option<String>, html: bool) -> Result<()> {
        let provider = create_provider(&config.provider)?;
        let mut desk = ResearchDesk::new(provider, config.research.clone());

        match query {
            Some(query) => {
                tracing::info!("Running single research query");
                let outcome = desk.submit_query(&query).await;
                if outcome == SubmitOutcome::Ignored {
                    eprintln!("Query is empty; nothing to do.");
                    return Ok(());
                }
                print!("{}", format_latest(&desk, html));
                print!("{}", format_sources(&desk, html));
                Ok(())
            }
            None => run_session(&mut desk, html).await,
        }
    }

    async fn run_session(desk: &mut ResearchDesk, html: bool) -> Result<()> {
        tracing::info!("Starting interactive research session");

        let mut rl = DefaultEditor::new()?;
        print_welcome_banner(desk);

        loop {
            let prompt = format!("{} ", "research>".cyan().bold());
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(trimmed)?;

                    let query = match parse_special_command(trimmed) {
                        Ok(SpecialCommand::None) => trimmed.to_string(),
                        Ok(SpecialCommand::Hint(n)) => match desk.suggestion(n) {
                            Some(hint) => {
                                println!("{} {}", "Asking:".dimmed(), hint);
                                hint.to_string()
                            }
                            None => {
                                println!(
                                    "{}",
                                    format!("No suggestion #{}; try /hints", n).yellow()
                                );
                                continue;
                            }
                        },
                        Ok(SpecialCommand::Help) => {
                            print_help();
                            continue;
                        }
                        Ok(SpecialCommand::Sources) => {
                            print!("{}", format_sources(desk, html));
                            continue;
                        }
                        Ok(SpecialCommand::Hints) => {
                            print_hints(desk);
                            continue;
                        }
                        Ok(SpecialCommand::Transcript) => {
                            for message in desk.transcript().iter() {
                                if html {
                                    print!("{}", render_message_html(message));
                                } else {
                                    println!("{}", render_message(message));
                                }
                            }
                            continue;
                        }
                        Ok(SpecialCommand::Exit) => break,
                        Err(e) => {
                            println!("{}", e.to_string().red());
                            continue;
                        }
                    };

                    println!("{}", "Researching...".dimmed());
                    match desk.submit_query(&query).await {
                        SubmitOutcome::Answered | SubmitOutcome::Fallback => {
                            println!();
                            print!("{}", format_latest(desk, html));
                            if !desk.sources().is_empty() {
                                println!(
                                    "{}\n",
                                    format!(
                                        "{} sources collected; type /sources to list them",
                                        desk.sources().len()
                                    )
                                    .dimmed()
                                );
                            }
                        }
                        SubmitOutcome::Busy => {
                            println!("{}", "A query is already in progress.".yellow());
                        }
                        SubmitOutcome::Ignored => {}
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Format the most recent transcript entry
    pub fn format_latest(desk: &ResearchDesk, html: bool) -> String {
        match desk.transcript().last() {
            Some(message) if html => render_message_html(message),
            Some(message) => format!("{}\n", render_message(message)),
            None => String::new(),
        }
    }

    /// Format the collected source list
    pub fn format_sources(desk: &ResearchDesk, html: bool) -> String {
        if html {
            render_sources_html(desk.sources())
        } else {
            render_sources(desk.sources())
        }
    }

    fn print_hints(desk: &ResearchDesk) {
        for (i, hint) in desk.suggestions().iter().enumerate() {
            println!("  {}. {}", i + 1, hint);
        }
    }

    fn print_welcome_banner(desk: &ResearchDesk) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║              Cairuilin Studio Research Desk                  ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Suggested queries (use /hint <n>):");
        print_hints(desk);
        println!("\nType '/help' for available commands, 'exit' to quit\n");
    }

}

// News command handler
pub mod news {
    //! Latest news handler.

    use super::*;
    use crate::news::NewsBoard;
    use colored::Colorize;
    use prettytable::{format, Table};
    use serde::Serialize;

    #[derive(Serialize)]
    struct NewsRow<'a> {
        title: &'a str,
        date: &'a str,
        url: &'a str,
    }

    /// Fetch the news board once and print it
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `json` - Print JSON instead of a table
    pub async fn run_news(config: Config, json: bool) -> Result<()> {
        tracing::info!("Fetching latest news from {}", config.news.source_url);

        let provider = create_provider(&config.provider)?;
        let board = NewsBoard::load(provider.as_ref(), &config.news).await;

        if json {
            println!("{}", news_json(&board)?);
        } else {
            news_table(&board).printstd();
            if board.is_fallback() {
                println!("{}", "News could not be loaded.".yellow());
            }
            println!("{} {}", "More:".dimmed(), board.listing_url());
        }

        Ok(())
    }

    /// Displayed items as pretty JSON with resolved links
    pub fn news_json(board: &NewsBoard) -> Result<String> {
        let rows: Vec<NewsRow<'_>> = board
            .display_items()
            .iter()
            .map(|item| NewsRow {
                title: &item.title,
                date: &item.date,
                url: board.link_for(item),
            })
            .collect();
        Ok(serde_json::to_string_pretty(&rows)?)
    }

    /// Displayed items as a table
    pub fn news_table(board: &NewsBoard) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
        table.set_titles(prettytable::row![
            "#".bold(),
            "Date".bold(),
            "Title".bold(),
            "Link".bold()
        ]);

        for (i, item) in board.display_items().iter().enumerate() {
            table.add_row(prettytable::row![
                i + 1,
                item.date,
                item.title,
                board.link_for(item).cyan()
            ]);
        }
        table
    }

}

// Render command handler
pub mod render {
    //! Offline rendering of reply text read from a file or stdin.

    use super::*;
    use std::io::Read;
    use std::path::Path;

    /// Render reply text to HTML or terminal text
    pub fn render_text(text: &str, html: bool) -> String {
        let blocks = parse_blocks(text);
        tracing::debug!("Parsed {} blocks", blocks.len());
        if html {
            render_html(&blocks)
        } else {
            render_terminal(&blocks)
        }
    }

    /// Read `file` (or stdin for `-`) and print it rendered
    ///
    /// # Errors
    ///
    /// Returns error if the input cannot be read
    pub fn run_render(file: &Path, html: bool) -> Result<()> {
        let text = if file.as_os_str() == "-" {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| CairuilinError::Render(format!("Failed to read stdin: {}", e)))?;
            buffer
        } else {
            std::fs::read_to_string(file).map_err(|e| {
                CairuilinError::Render(format!("Failed to read {}: {}", file.display(), e))
            })?
        };

        print!("{}", render_text(&text, html));
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_render_text_html() {
            let out = render_text("**Intro**\n| A |\n|---|\n| 1 |", true);
            assert_eq!(
                out,
                "<p>Intro</p>\n<div class=\"table-wrap\"><table><tbody>\n\
                 <tr class=\"header\"><th>A</th></tr>\n<tr><td>1</td></tr>\n\
                 </tbody></table></div>\n"
            );
        }

        #[test]
        fn test_run_render_missing_file_fails() {
            let result = run_render(Path::new("/nonexistent/reply.txt"), false);
            crate::test_utils::assert_error_contains(result, "Render error");
        }
    }
}
