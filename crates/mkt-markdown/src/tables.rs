//! Pipe-table extraction.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use serde::Serialize;

use crate::{heading_level_to_num, parser_options};

/// A table found in markdown source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkdownTable {
    /// Text of the nearest heading above the table, if any.
    pub heading: Option<String>,
    /// Level of that heading (1-6).
    pub heading_level: Option<u8>,
    /// Header cells.
    pub header: Vec<String>,
    /// Body rows.
    pub rows: Vec<Vec<String>>,
}

impl MarkdownTable {
    /// Values of one column, looked up by header text.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.header.iter().position(|h| h == name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(index).map_or("", String::as_str))
                .collect(),
        )
    }
}

/// Extract every table, tagged with the heading it appears under.
#[must_use]
pub fn extract_tables(markdown: &str) -> Vec<MarkdownTable> {
    let mut tables = Vec::new();
    let mut heading: Option<(u8, String)> = None;
    let mut heading_text: Option<String> = None;
    let mut table: Option<MarkdownTable> = None;
    let mut row: Vec<String> = Vec::new();
    let mut cell: Option<String> = None;

    for event in Parser::new_ext(markdown, parser_options()) {
        match event {
            Event::Start(Tag::Heading { .. }) => heading_text = Some(String::new()),
            Event::End(TagEnd::Heading(level)) => {
                if let Some(text) = heading_text.take() {
                    heading = Some((heading_level_to_num(level), text.trim().to_owned()));
                }
            }
            Event::Start(Tag::Table(_)) => {
                table = Some(MarkdownTable {
                    heading: heading.as_ref().map(|(_, text)| text.clone()),
                    heading_level: heading.as_ref().map(|(level, _)| *level),
                    header: Vec::new(),
                    rows: Vec::new(),
                });
            }
            Event::Start(Tag::TableCell) => cell = Some(String::new()),
            Event::End(TagEnd::TableCell) => {
                if let Some(text) = cell.take() {
                    row.push(text.trim().to_owned());
                }
            }
            Event::End(TagEnd::TableHead) => {
                if let Some(table) = table.as_mut() {
                    table.header = std::mem::take(&mut row);
                }
            }
            Event::End(TagEnd::TableRow) => {
                if let Some(table) = table.as_mut() {
                    table.rows.push(std::mem::take(&mut row));
                }
            }
            Event::End(TagEnd::Table) => {
                if let Some(done) = table.take() {
                    tables.push(done);
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(cell) = cell.as_mut() {
                    cell.push_str(&text);
                } else if let Some(heading) = heading_text.as_mut() {
                    heading.push_str(&text);
                }
            }
            _ => {}
        }
    }
    tables
}
