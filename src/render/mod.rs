//! Rendering of assistant reply text
//!
//! Reply text is first parsed into [`Block`]s, then rendered either as an
//! HTML fragment or as terminal text.

pub mod blocks;
pub mod html;
pub mod terminal;

pub use blocks::{is_separator_row, is_table_row, parse_blocks, split_cells, Block, TableRow};
pub use html::{html_escape, render_html, render_message_html, render_sources_html};
pub use terminal::{render_message, render_sources, render_terminal};
