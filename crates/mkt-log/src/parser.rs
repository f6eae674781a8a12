//! Line-oriented build-log parser.

use std::sync::LazyLock;

use regex::Regex;

use crate::LogEntry;

static ANSI_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").unwrap());

static ENTRY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+)\s+-\s+(.*)").unwrap());

static SOURCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(.*?)\]\s+-\s+(.*)").unwrap());

/// Remove ANSI color sequences (`ESC [ ... m`) from text.
///
/// # Examples
///
/// ```
/// use mkt_log::strip_ansi_colors;
///
/// let colored = "\x1b[31mThis is red\x1b[0m and this is normal";
/// assert_eq!(strip_ansi_colors(colored), "This is red and this is normal");
/// ```
#[must_use]
pub fn strip_ansi_colors(text: &str) -> String {
    ANSI_PATTERN.replace_all(text, "").into_owned()
}

/// Entry being accumulated while scanning lines.
struct OpenEntry<'a> {
    severity: &'a str,
    source: &'a str,
    title: &'a str,
    lines: Vec<&'a str>,
}

impl OpenEntry<'_> {
    fn finish(self) -> LogEntry {
        LogEntry {
            severity: self.severity.to_owned(),
            source: self.source.to_owned(),
            title: self.title.to_owned(),
            payload: self.lines.join("\n").trim().to_owned(),
        }
    }
}

/// Parse a build log into entries, in order of appearance.
///
/// Rules:
/// 1. An entry starts on a line `SEVERITY - message`, where `SEVERITY` is
///    one or more uppercase letters.
/// 2. A message of the form `[source] - title` is split into source and
///    title; otherwise the whole message is the title.
/// 3. Every other line belongs to the payload of the open entry. Lines
///    before the first entry are dropped.
///
/// Color codes are stripped before splitting, so they never reach any field.
#[must_use]
pub fn parse_log(log: &str) -> Vec<LogEntry> {
    let cleaned = strip_ansi_colors(log.trim());

    let mut entries = Vec::new();
    let mut current: Option<OpenEntry<'_>> = None;

    for line in cleaned.split('\n') {
        if let Some(caps) = ENTRY_PATTERN.captures(line) {
            if let Some(open) = current.take() {
                entries.push(open.finish());
            }
            let severity = caps.get(1).map_or("", |m| m.as_str());
            let message = caps.get(2).map_or("", |m| m.as_str());
            let (source, title) = match SOURCE_PATTERN.captures(message) {
                Some(src) => (
                    src.get(1).map_or("", |m| m.as_str()),
                    src.get(2).map_or("", |m| m.as_str()),
                ),
                None => ("", message),
            };
            current = Some(OpenEntry {
                severity,
                source,
                title,
                lines: Vec::new(),
            });
        } else if let Some(open) = current.as_mut() {
            open.lines.push(line);
        }
    }

    if let Some(open) = current {
        entries.push(open.finish());
    }
    entries
}
