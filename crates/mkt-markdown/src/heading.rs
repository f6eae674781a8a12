//! Heading extraction.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

use crate::parser_options;

/// Convert heading level enum to number (1-6).
#[must_use]
pub fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Text of the first level-1 heading (`# Title` or setext `Title\n===`).
///
/// Headings inside fenced code are not headings and are skipped.
#[must_use]
pub fn first_h1(markdown: &str) -> Option<String> {
    let mut title: Option<String> = None;
    for event in Parser::new_ext(markdown, parser_options()) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => title = Some(String::new()),
            Event::Text(text) | Event::Code(text) => {
                if let Some(title) = title.as_mut() {
                    title.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                return title.map(|t| t.trim().to_owned());
            }
            _ => {}
        }
    }
    None
}
