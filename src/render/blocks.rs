//! Line-block parsing of reply text
//!
//! Reply text is scanned line by line. Runs of pipe-delimited lines become
//! table blocks, every other non-blank line becomes a paragraph with `**`
//! emphasis markers removed. Separator lines (`|---|---|`) are dropped and
//! the first row of each contiguous table is its header.

/// One row of a table block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Trimmed cell texts
    pub cells: Vec<String>,
    /// True for the first row of its table
    pub header: bool,
}

/// A display block produced from reply text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Plain text line
    Paragraph {
        /// Trimmed line with `**` removed
        text: String,
    },
    /// Contiguous run of table rows
    Table {
        /// Rows in input order; the first is the header
        rows: Vec<TableRow>,
    },
}

impl Block {
    /// Returns true for table blocks
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table { .. })
    }
}

/// Returns true when a trimmed line is a table row candidate
///
/// A candidate starts with `|` and contains at least one more `|`.
pub fn is_table_row(trimmed: &str) -> bool {
    trimmed
        .strip_prefix('|')
        .is_some_and(|rest| rest.contains('|'))
}

/// Returns true when a table row candidate is a header/body separator
pub fn is_separator_row(trimmed: &str) -> bool {
    trimmed.contains("---")
}

/// Split a table row candidate into trimmed cells
///
/// The empty fragment before the leading `|` is dropped, as is the empty
/// fragment after a trailing `|`. Interior empty cells are kept.
///
/// # Examples
///
/// ```
/// use cairuilin::render::split_cells;
///
/// assert_eq!(split_cells("| A | | B |"), vec!["A", "", "B"]);
/// assert_eq!(split_cells("| A | B"), vec!["A", "B"]);
/// ```
pub fn split_cells(trimmed: &str) -> Vec<String> {
    let mut fragments: Vec<&str> = trimmed.split('|').collect();

    if fragments.first().is_some_and(|f| f.is_empty()) {
        fragments.remove(0);
    }
    if fragments.last().is_some_and(|f| f.is_empty()) {
        fragments.pop();
    }

    fragments.into_iter().map(|f| f.trim().to_string()).collect()
}

/// Parse reply text into display blocks
///
/// # Examples
///
/// ```
/// use cairuilin::render::{parse_blocks, Block};
///
/// let blocks = parse_blocks("**Summary**\n| A | B |\n|---|---|\n| 1 | 2 |");
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[0], Block::Paragraph { text: "Summary".to_string() });
/// assert!(blocks[1].is_table());
/// ```
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut pending_rows: Vec<TableRow> = Vec::new();
    let mut inside_table = false;

    for line in text.split('\n') {
        let trimmed = line.trim();

        if is_table_row(trimmed) {
            if is_separator_row(trimmed) {
                continue;
            }
            inside_table = true;
            pending_rows.push(TableRow {
                cells: split_cells(trimmed),
                header: pending_rows.is_empty(),
            });
            continue;
        }

        if inside_table {
            blocks.push(Block::Table {
                rows: std::mem::take(&mut pending_rows),
            });
            inside_table = false;
        }

        if !trimmed.is_empty() {
            blocks.push(Block::Paragraph {
                text: trimmed.replace("**", ""),
            });
        }
    }

    if inside_table {
        blocks.push(Block::Table { rows: pending_rows });
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> Block {
        Block::Paragraph {
            text: text.to_string(),
        }
    }

    fn row(cells: &[&str], header: bool) -> TableRow {
        TableRow {
            cells: cells.iter().map(|c| c.to_string()).collect(),
            header,
        }
    }

    #[test]
    fn test_plain_text_one_paragraph_per_nonblank_line() {
        let blocks = parse_blocks("first line\n\n  **bold** second  \n   \nthird");
        assert_eq!(
            blocks,
            vec![
                paragraph("first line"),
                paragraph("bold second"),
                paragraph("third"),
            ]
        );
    }

    #[test]
    fn test_empty_input_produces_nothing() {
        assert!(parse_blocks("").is_empty());
        assert!(parse_blocks("\n \n\t\n").is_empty());
    }

    #[test]
    fn test_simple_table_with_separator() {
        let blocks = parse_blocks("| A | B |\n|---|---|\n| 1 | 2 |");
        assert_eq!(
            blocks,
            vec![Block::Table {
                rows: vec![row(&["A", "B"], true), row(&["1", "2"], false)],
            }]
        );
    }

    #[test]
    fn test_table_flushed_before_following_paragraph() {
        let blocks = parse_blocks("Intro\n| A | B |\n| 1 | 2 |\nOutro");
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], paragraph("Intro"));
        assert!(blocks[1].is_table());
        assert_eq!(blocks[2], paragraph("Outro"));
    }

    #[test]
    fn test_blank_line_splits_tables() {
        let blocks = parse_blocks("| A |  B |\n\n| C | D |\n| 3 | 4 |");
        assert_eq!(
            blocks,
            vec![
                Block::Table {
                    rows: vec![row(&["A", "B"], true)],
                },
                Block::Table {
                    rows: vec![row(&["C", "D"], true), row(&["3", "4"], false)],
                },
            ]
        );
    }

    #[test]
    fn test_separator_does_not_count_as_header() {
        let blocks = parse_blocks("|---|---|\n| x | y |\n| z | w |");
        assert_eq!(
            blocks,
            vec![Block::Table {
                rows: vec![row(&["x", "y"], true), row(&["z", "w"], false)],
            }]
        );
    }

    #[test]
    fn test_lone_separator_opens_no_table() {
        let blocks = parse_blocks("before\n|---|---|\nafter");
        assert_eq!(blocks, vec![paragraph("before"), paragraph("after")]);
    }

    #[test]
    fn test_dashes_inside_data_row_discard_it() {
        let blocks = parse_blocks("| Year | Change |\n| 2024 | --- |\n| 2025 | 3% |");
        assert_eq!(
            blocks,
            vec![Block::Table {
                rows: vec![row(&["Year", "Change"], true), row(&["2025", "3%"], false)],
            }]
        );
    }

    #[test]
    fn test_header_is_positional_not_content_based() {
        let blocks = parse_blocks("| 1 | 2 |\n| Name | Value |");
        if let Block::Table { rows } = &blocks[0] {
            assert!(rows[0].header);
            assert_eq!(rows[0].cells, vec!["1", "2"]);
            assert!(!rows[1].header);
        } else {
            panic!("expected table");
        }
    }

    #[test]
    fn test_indented_rows_are_table_rows() {
        let blocks = parse_blocks("   | a | b |   \n\t| c | d |");
        assert_eq!(
            blocks,
            vec![Block::Table {
                rows: vec![row(&["a", "b"], true), row(&["c", "d"], false)],
            }]
        );
    }

    #[test]
    fn test_single_pipe_line_is_paragraph() {
        assert!(!is_table_row("| lonely"));
        assert_eq!(parse_blocks("| lonely"), vec![paragraph("| lonely")]);
    }

    #[test]
    fn test_line_with_inner_pipe_not_at_start_is_paragraph() {
        assert_eq!(parse_blocks("a | b | c"), vec![paragraph("a | b | c")]);
    }

    #[test]
    fn test_cells_keep_emphasis_markers() {
        let blocks = parse_blocks("| **Key** | v |");
        if let Block::Table { rows } = &blocks[0] {
            assert_eq!(rows[0].cells, vec!["**Key**", "v"]);
        } else {
            panic!("expected table");
        }
    }

    #[test]
    fn test_split_cells_keeps_interior_empties() {
        assert_eq!(split_cells("| a || b |"), vec!["a", "", "b"]);
        assert_eq!(split_cells("| a | b"), vec!["a", "b"]);
        assert_eq!(split_cells("| |"), vec![""]);
        assert_eq!(split_cells("||"), vec![""]);
    }

    #[test]
    fn test_crlf_input() {
        let blocks = parse_blocks("Title\r\n| A | B |\r\n| 1 | 2 |\r\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], paragraph("Title"));
        if let Block::Table { rows } = &blocks[1] {
            assert_eq!(rows[1].cells, vec!["1", "2"]);
        } else {
            panic!("expected table");
        }
    }
}
