//! Terminal rendering of display blocks

use colored::Colorize;
use prettytable::{format, Cell, Row, Table};

use super::blocks::{parse_blocks, Block, TableRow};
use crate::research::{ChatMessage, GroundingSource, Role};

fn table_row(row: &TableRow) -> Row {
    Row::new(
        row.cells
            .iter()
            .map(|cell| {
                if row.header {
                    Cell::new(&cell.bold().cyan().to_string())
                } else {
                    Cell::new(cell)
                }
            })
            .collect(),
    )
}

/// Render blocks as terminal text
///
/// Paragraphs are printed one per line; tables are drawn with box borders
/// and a highlighted header row.
pub fn render_terminal(blocks: &[Block]) -> String {
    let mut out = String::new();

    for block in blocks {
        match block {
            Block::Paragraph { text } => {
                out.push_str(text);
                out.push('\n');
            }
            Block::Table { rows } => {
                let mut table = Table::new();
                table.set_format(*format::consts::FORMAT_BOX_CHARS);
                for row in rows {
                    table.add_row(table_row(row));
                }
                out.push_str(&table.to_string());
            }
        }
    }

    out
}

/// Render one transcript entry with a role label and time
pub fn render_message(message: &ChatMessage) -> String {
    let label = match message.role() {
        Role::User => "You".green().bold(),
        Role::Assistant => "Research Lead".cyan().bold(),
    };
    format!(
        "{} {}\n{}",
        label,
        message.time_label().dimmed(),
        render_terminal(&parse_blocks(message.text()))
    )
}

/// Render the numbered source list
pub fn render_sources(sources: &[GroundingSource]) -> String {
    if sources.is_empty() {
        return format!("{}\n", "No sources collected yet.".dimmed());
    }

    let mut out = format!("{}\n", "Sources".bold());
    for (position, source) in sources.iter().enumerate() {
        let host = source.hostname().unwrap_or_default();
        out.push_str(&format!(
            "  {:>2}. {} {}\n      {}\n",
            position + 1,
            source.title,
            format!("({})", host).dimmed(),
            source.uri.blue().underline()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_paragraphs_one_per_line() {
        plain();
        let out = render_terminal(&parse_blocks("**Summary**\n\nDetails"));
        assert_eq!(out, "Summary\nDetails\n");
    }

    #[test]
    fn test_table_contains_cells() {
        plain();
        let out = render_terminal(&parse_blocks("| Region | Share |\n|---|---|\n| Asia | 61% |"));
        assert!(out.contains("Region"));
        assert!(out.contains("Share"));
        assert!(out.contains("Asia"));
        assert!(out.contains("61%"));
        assert!(!out.contains("---"));
        let region = out.find("Region").unwrap();
        let asia = out.find("Asia").unwrap();
        assert!(region < asia);
    }

    #[test]
    fn test_message_header() {
        plain();
        let stamp = Local.with_ymd_and_hms(2026, 5, 5, 8, 30, 0).unwrap();
        let message = ChatMessage::at(Role::User, "question", None, stamp);
        let out = render_message(&message);
        assert!(out.starts_with("You 08:30\n"));
        assert!(out.ends_with("question\n"));
    }

    #[test]
    fn test_sources_listing() {
        plain();
        assert!(render_sources(&[]).contains("No sources"));

        let sources = vec![GroundingSource {
            title: "KITA".to_string(),
            uri: "https://www.kita.net/a".to_string(),
            index: 3,
        }];
        let out = render_sources(&sources);
        assert!(out.contains(" 1. KITA (www.kita.net)"));
        assert!(out.contains("https://www.kita.net/a"));
    }
}
