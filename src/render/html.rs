//! HTML rendering of display blocks
//!
//! Output is a fragment, not a document. Every piece of reply text is
//! escaped before it is placed into markup.

use std::fmt::Write;

use super::blocks::{parse_blocks, Block};
use crate::research::{ChatMessage, GroundingSource};

/// Escape text for use inside HTML element content or attribute values
///
/// # Examples
///
/// ```
/// use cairuilin::render::html_escape;
///
/// assert_eq!(html_escape("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
/// ```
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render blocks as an HTML fragment
///
/// Paragraphs become `<p>` elements. Tables are wrapped in a
/// horizontally scrollable `div.table-wrap`; the header row carries
/// `class="header"`.
pub fn render_html(blocks: &[Block]) -> String {
    let mut out = String::new();

    for block in blocks {
        match block {
            Block::Paragraph { text } => {
                let _ = writeln!(out, "<p>{}</p>", html_escape(text));
            }
            Block::Table { rows } => {
                out.push_str("<div class=\"table-wrap\"><table><tbody>\n");
                for row in rows {
                    let (open, tag) = if row.header {
                        ("<tr class=\"header\">", "th")
                    } else {
                        ("<tr>", "td")
                    };
                    out.push_str(open);
                    for cell in &row.cells {
                        let _ = write!(out, "<{tag}>{}</{tag}>", html_escape(cell));
                    }
                    out.push_str("</tr>\n");
                }
                out.push_str("</tbody></table></div>\n");
            }
        }
    }

    out
}

/// Render one transcript entry, including its time label
pub fn render_message_html(message: &ChatMessage) -> String {
    let body = render_html(&parse_blocks(message.text()));
    format!(
        "<div class=\"message {}\">\n{}<span class=\"time\">{}</span>\n</div>\n",
        message.role(),
        body,
        message.time_label()
    )
}

/// Render the source list as a linked list
///
/// Returns an empty string when there are no sources.
pub fn render_sources_html(sources: &[GroundingSource]) -> String {
    if sources.is_empty() {
        return String::new();
    }

    let mut out = String::from("<ul class=\"sources\">\n");
    for source in sources {
        let host = source.hostname().unwrap_or_default();
        let _ = writeln!(
            out,
            "<li><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a> <span class=\"host\">{}</span></li>",
            html_escape(&source.uri),
            html_escape(&source.title),
            html_escape(&host)
        );
    }
    out.push_str("</ul>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::Role;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_paragraphs_are_escaped() {
        let html = render_html(&parse_blocks("1 < 2 & \"quoted\"\n<script>"));
        assert_eq!(
            html,
            "<p>1 &lt; 2 &amp; &quot;quoted&quot;</p>\n<p>&lt;script&gt;</p>\n"
        );
    }

    #[test]
    fn test_table_markup() {
        let html = render_html(&parse_blocks("| A | B |\n|---|---|\n| 1 | <b> |"));
        assert_eq!(
            html,
            "<div class=\"table-wrap\"><table><tbody>\n\
             <tr class=\"header\"><th>A</th><th>B</th></tr>\n\
             <tr><td>1</td><td>&lt;b&gt;</td></tr>\n\
             </tbody></table></div>\n"
        );
    }

    #[test]
    fn test_empty_blocks_render_nothing() {
        assert_eq!(render_html(&[]), "");
    }

    #[test]
    fn test_message_html_has_role_and_time() {
        let stamp = Local.with_ymd_and_hms(2026, 1, 2, 14, 7, 0).unwrap();
        let message = ChatMessage::at(Role::Assistant, "hello", None, stamp);
        let html = render_message_html(&message);
        assert!(html.starts_with("<div class=\"message assistant\">"));
        assert!(html.contains("<p>hello</p>"));
        assert!(html.contains("<span class=\"time\">14:07</span>"));
    }

    #[test]
    fn test_sources_html() {
        let sources = vec![GroundingSource {
            title: "Trade & Co".to_string(),
            uri: "https://news.example/a?b=1&c=2".to_string(),
            index: 1,
        }];
        let html = render_sources_html(&sources);
        assert!(html.contains("href=\"https://news.example/a?b=1&amp;c=2\""));
        assert!(html.contains(">Trade &amp; Co</a>"));
        assert!(html.contains("<span class=\"host\">news.example</span>"));
        assert_eq!(render_sources_html(&[]), "");
    }
}
