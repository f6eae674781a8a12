//! Filtering of parsed log entries.

use regex::{Regex, RegexBuilder};

use crate::LogEntry;

/// Error building a log filter.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// A title or source pattern is not a valid regular expression.
    #[error("invalid {field} pattern '{pattern}': {source}")]
    Pattern {
        /// Which criterion failed (`title` or `source`).
        field: &'static str,
        /// The pattern as given.
        pattern: String,
        /// Underlying regex error.
        source: regex::Error,
    },
}

/// Criteria for selecting log entries.
///
/// `title` and `source` are case-insensitive regular expressions searched
/// anywhere in the field; `severity` is compared exactly after upper-casing.
/// Empty criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct LogQuery {
    title: String,
    source: String,
    severity: String,
}

impl LogQuery {
    /// Create an empty query (matches every entry).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the title to match a regex.
    #[must_use]
    pub fn title(mut self, pattern: impl Into<String>) -> Self {
        self.title = pattern.into();
        self
    }

    /// Require the source tag to match a regex.
    #[must_use]
    pub fn source(mut self, pattern: impl Into<String>) -> Self {
        self.source = pattern.into();
        self
    }

    /// Require an exact severity (e.g. `warning` selects `WARNING`).
    #[must_use]
    pub fn severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = severity.into().to_uppercase();
        self
    }

    /// Whether no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.source.is_empty() && self.severity.is_empty()
    }

    /// All entries matching the query, in log order.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Pattern`] if the title or source pattern is invalid.
    pub fn filter<'a>(&self, entries: &'a [LogEntry]) -> Result<Vec<&'a LogEntry>, LogError> {
        if self.is_empty() {
            return Ok(entries.iter().collect());
        }
        let matcher = self.compile()?;
        Ok(entries.iter().filter(|e| matcher.matches(e)).collect())
    }

    /// First entry matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Pattern`] if the title or source pattern is invalid.
    pub fn first<'a>(&self, entries: &'a [LogEntry]) -> Result<Option<&'a LogEntry>, LogError> {
        let matcher = self.compile()?;
        Ok(entries.iter().find(|e| matcher.matches(e)))
    }

    fn compile(&self) -> Result<Matcher<'_>, LogError> {
        Ok(Matcher {
            title: compile_pattern("title", &self.title)?,
            source: compile_pattern("source", &self.source)?,
            severity: &self.severity,
        })
    }
}

struct Matcher<'q> {
    title: Option<Regex>,
    source: Option<Regex>,
    severity: &'q str,
}

impl Matcher<'_> {
    fn matches(&self, entry: &LogEntry) -> bool {
        self.title.as_ref().is_none_or(|re| re.is_match(&entry.title))
            && self.source.as_ref().is_none_or(|re| re.is_match(&entry.source))
            && (self.severity.is_empty() || entry.severity == self.severity)
    }
}

fn compile_pattern(field: &'static str, pattern: &str) -> Result<Option<Regex>, LogError> {
    if pattern.is_empty() {
        return Ok(None);
    }
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map(Some)
        .map_err(|source| LogError::Pattern {
            field,
            pattern: pattern.to_owned(),
            source,
        })
}

/// Distinct severities, in order of first appearance.
#[must_use]
pub fn severities(entries: &[LogEntry]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for entry in entries {
        if !seen.contains(&entry.severity) {
            seen.push(entry.severity.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_log;
    use pretty_assertions::assert_eq;

    const LOG: &str = "\
INFO    -  Cleaning site directory
INFO    -  [macros] - Rendering source page: index.md
DEBUG   -  [macros] - Page title: Home
WARNING -  [macros] - ERROR # _Macro Rendering Error_
INFO    -  [test] - Debug file: __test__/page_map.json
INFO    -  Documentation built in 0.12 seconds";

    fn titles(entries: &[&LogEntry]) -> Vec<String> {
        entries.iter().map(|e| e.title.clone()).collect()
    }

    #[test]
    fn test_empty_query_returns_all() {
        let entries = parse_log(LOG);
        assert_eq!(LogQuery::new().filter(&entries).unwrap().len(), 6);
    }

    #[test]
    fn test_filter_by_severity_is_case_insensitive_input() {
        let entries = parse_log(LOG);
        let found = LogQuery::new().severity("info").filter(&entries).unwrap();
        assert_eq!(found.len(), 4);
        assert!(found.iter().all(|e| e.severity == "INFO"));
    }

    #[test]
    fn test_severity_is_exact_not_substring() {
        let entries = parse_log("WARNINGS -  plural\nWARNING -  singular");
        let found = LogQuery::new().severity("WARNING").filter(&entries).unwrap();
        assert_eq!(titles(&found), vec!["singular".to_owned()]);
    }

    #[test]
    fn test_filter_by_source_regex() {
        let entries = parse_log(LOG);
        let found = LogQuery::new().source("MACRO").filter(&entries).unwrap();
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn test_filter_by_title_regex_searches_anywhere() {
        let entries = parse_log(LOG);
        let found = LogQuery::new().title(r"page_map\.json$").filter(&entries).unwrap();
        assert_eq!(titles(&found), vec!["Debug file: __test__/page_map.json".to_owned()]);
    }

    #[test]
    fn test_filter_combined_criteria() {
        let entries = parse_log(LOG);
        let found = LogQuery::new()
            .source("macros")
            .severity("debug")
            .filter(&entries)
            .unwrap();
        assert_eq!(titles(&found), vec!["Page title: Home".to_owned()]);
    }

    #[test]
    fn test_first_returns_earliest() {
        let entries = parse_log(LOG);
        let found = LogQuery::new().severity("INFO").first(&entries).unwrap();
        assert_eq!(found.unwrap().title, "Cleaning site directory");
    }

    #[test]
    fn test_first_no_match_is_none() {
        let entries = parse_log(LOG);
        assert!(LogQuery::new().source("nowhere").first(&entries).unwrap().is_none());
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        let entries = parse_log(LOG);
        let err = LogQuery::new().title("(unclosed").filter(&entries).unwrap_err();
        assert!(matches!(err, LogError::Pattern { field: "title", .. }));
    }

    #[test]
    fn test_severities_in_order_of_appearance() {
        let entries = parse_log(LOG);
        assert_eq!(
            severities(&entries),
            vec!["INFO".to_owned(), "DEBUG".to_owned(), "WARNING".to_owned()]
        );
    }
}
