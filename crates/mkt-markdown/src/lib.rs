//! Markdown source helpers for MkDocs test fixtures.
//!
//! These work on the markdown side of a page, independently of the build:
//! front matter splitting, title extraction, table extraction and a plain
//! CommonMark rendering for quick checks.

mod frontmatter;
mod heading;
mod tables;

use pulldown_cmark::{Options, Parser, html};

pub use frontmatter::{SourceParts, split_frontmatter};
pub use heading::{first_h1, heading_level_to_num};
pub use tables::{MarkdownTable, extract_tables};

/// Markdown extensions enabled for every parse in this crate.
pub(crate) fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

/// Render markdown to an HTML fragment (CommonMark + tables).
///
/// # Examples
///
/// ```
/// let html = mkt_markdown::markdown_to_html("# Hello\n\n**Bold** text");
/// assert!(html.contains("<h1>Hello</h1>"));
/// assert!(html.contains("<strong>Bold</strong>"));
/// ```
#[must_use]
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, parser_options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
