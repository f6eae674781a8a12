//! Pattern search in rendered HTML, optionally scoped to a heading section.

use regex::{Regex, RegexBuilder};
use scraper::{ElementRef, Html, Node};

/// Restricts a search to the section following one heading.
///
/// The section runs from the matching heading to the next heading of any
/// level, so sub-sections are excluded.
#[derive(Debug, Clone, Copy)]
pub struct SectionScope<'a> {
    /// Case-insensitive pattern the heading text must match.
    pub header: &'a str,
    /// Exact heading level (1-6); any level if `None`.
    pub level: Option<u8>,
}

impl<'a> SectionScope<'a> {
    /// Scope to the first heading of any level matching `header`.
    #[must_use]
    pub fn new(header: &'a str) -> Self {
        Self {
            header,
            level: None,
        }
    }

    /// Only accept headings of the given level.
    #[must_use]
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }
}

/// Compiled form of a [`SectionScope`].
struct ScopeMatcher {
    header: Regex,
    level: Option<u8>,
}

impl ScopeMatcher {
    fn accepts(&self, heading: ElementRef<'_>, level: u8) -> bool {
        self.level.is_none_or(|wanted| wanted == level)
            && self.header.is_match(&element_text(heading))
    }
}

/// Heading level of an element name (`h1` → 1), `None` for non-headings.
#[must_use]
pub fn heading_level(name: &str) -> Option<u8> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Find the first line of text matching `pattern` in an HTML string.
///
/// The pattern is a case-insensitive regex; text that is not a valid regex
/// is matched literally. Returns the trimmed line containing the match.
#[must_use]
pub fn find_in_html(html: &str, pattern: &str, scope: Option<SectionScope<'_>>) -> Option<String> {
    let document = Html::parse_document(html);
    find_in_document(&document, pattern, scope)
}

/// Same as [`find_in_html`], on an already parsed document.
#[must_use]
pub fn find_in_document(
    document: &Html,
    pattern: &str,
    scope: Option<SectionScope<'_>>,
) -> Option<String> {
    let pattern = lenient_regex(pattern, true)?;
    let scope = match scope {
        Some(scope) => Some(ScopeMatcher {
            header: lenient_regex(scope.header, true)?,
            level: scope.level,
        }),
        None => None,
    };

    let text = window_text(document, scope.as_ref())?;
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find(|line| pattern.is_match(line))
        .map(str::to_owned)
}

/// Text of the first heading whose text matches `pattern`.
///
/// The pattern is matched against the heading's whole trimmed text, so
/// headings with nested markup (`<h2>Install <code>mkt</code></h2>`) are
/// found too. Unlike the section lookup, this match is case-sensitive.
#[must_use]
pub fn find_header(document: &Html, pattern: &str, level: Option<u8>) -> Option<String> {
    let pattern = lenient_regex(pattern, false)?;
    document
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| {
            heading_level(el.value().name())
                .is_some_and(|found| level.is_none_or(|wanted| wanted == found))
        })
        .map(element_text)
        .find(|text| pattern.is_match(text))
}

/// Collect the searchable text: the whole document, or one section.
///
/// Block-level elements start and end a line of their own, so adjacent
/// paragraphs never merge even in minified HTML.
///
/// Returns `None` when a scope is given but no heading matches it.
fn window_text(document: &Html, scope: Option<&ScopeMatcher>) -> Option<String> {
    let mut window = Window {
        scope,
        open: scope.is_none(),
        closed: false,
        text: String::new(),
    };
    window.enter(document.root_element());
    window.open.then_some(window.text)
}

struct Window<'m> {
    scope: Option<&'m ScopeMatcher>,
    open: bool,
    closed: bool,
    text: String,
}

impl Window<'_> {
    fn enter(&mut self, element: ElementRef<'_>) {
        let name = element.value().name();
        if matches!(name, "script" | "style") {
            return;
        }
        if let (Some(scope), Some(level)) = (self.scope, heading_level(name)) {
            if self.open {
                self.closed = true;
            } else if scope.accepts(element, level) {
                self.open = true;
            }
            return;
        }

        let block = is_block(name);
        if block {
            self.text.push('\n');
        }
        for child in element.children() {
            if self.closed {
                return;
            }
            if let Some(child) = ElementRef::wrap(child) {
                self.enter(child);
            } else if let Node::Text(chunk) = child.value()
                && self.open
            {
                self.text.push_str(chunk);
            }
        }
        if block {
            self.text.push('\n');
        }
    }
}

fn is_block(name: &str) -> bool {
    heading_level(name).is_some()
        || matches!(
            name,
            "address"
                | "article"
                | "aside"
                | "blockquote"
                | "body"
                | "br"
                | "dd"
                | "details"
                | "div"
                | "dl"
                | "dt"
                | "figcaption"
                | "figure"
                | "footer"
                | "form"
                | "head"
                | "header"
                | "hr"
                | "li"
                | "main"
                | "nav"
                | "ol"
                | "p"
                | "pre"
                | "section"
                | "summary"
                | "table"
                | "td"
                | "th"
                | "title"
                | "tr"
                | "ul"
        )
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

fn lenient_regex(pattern: &str, case_insensitive: bool) -> Option<Regex> {
    let build = |p: &str| {
        RegexBuilder::new(p)
            .case_insensitive(case_insensitive)
            .build()
    };
    build(pattern).or_else(|_| build(&regex::escape(pattern))).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = r"
    <html><head><title>Example</title></head>
    <body>
    <h1>Main Header</h1>
    <p>This is some text under the main header.</p>
    <p>More text under the main header.</p>
    <h2>Sub Header</h2>
    <p>Text under the sub header.</p>
    <h1>Another Main Header</h1>
    <p>Text under another main header.</p>
    <script>var hidden = 'more text';</script>
    </body>
    </html>
    ";

    #[test]
    fn test_find_whole_document() {
        let found = find_in_html(DOC, "more text", None);
        assert_eq!(found.as_deref(), Some("More text under the main header."));
    }

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(
            find_in_html(DOC, "MORE TEXT", None),
            find_in_html(DOC, "more text", None)
        );
    }

    #[test]
    fn test_find_regex_pattern() {
        let found = find_in_html(DOC, r"another \w+ header\.$", None);
        assert_eq!(found.as_deref(), Some("Text under another main header."));
    }

    #[test]
    fn test_find_invalid_regex_is_literal() {
        let html = "<p>Call f(x, y</p>";
        assert_eq!(find_in_html(html, "f(x", None).as_deref(), Some("Call f(x, y"));
    }

    #[test]
    fn test_find_minified_document() {
        let html = "<h1>Intro</h1><p>Hello there</p><h2>Usage</h2><p>Run it</p>";
        assert_eq!(find_in_html(html, "hello", None).as_deref(), Some("Hello there"));
        assert_eq!(find_in_html(html, "usage", None).as_deref(), Some("Usage"));
    }

    #[test]
    fn test_find_keeps_inline_markup_on_one_line() {
        let html = "<ul><li>Run <code>mkt build</code> first</li><li>Then check</li></ul>";
        assert_eq!(
            find_in_html(html, "build", None).as_deref(),
            Some("Run mkt build first")
        );
    }

    #[test]
    fn test_find_line_break_splits() {
        let html = "<p>first line<br>second line</p>";
        assert_eq!(find_in_html(html, "second", None).as_deref(), Some("second line"));
    }

    #[test]
    fn test_find_absent_pattern() {
        assert_eq!(find_in_html(DOC, "nowhere to be seen", None), None);
    }

    #[test]
    fn test_find_ignores_script_text() {
        let html = "<p>Visible</p><script>var secret = 1;</script>";
        assert_eq!(find_in_html(html, "secret", None), None);
    }

    #[test]
    fn test_section_scope_first_match() {
        let found = find_in_html(DOC, "under the main", Some(SectionScope::new("Main header")));
        assert_eq!(found.as_deref(), Some("This is some text under the main header."));
    }

    #[test]
    fn test_section_stops_at_next_heading_of_any_level() {
        // "sub header" text lives in the h2 section, after the h1 section ends
        let found = find_in_html(DOC, "under the sub", Some(SectionScope::new("^main header$")));
        assert_eq!(found, None);
    }

    #[test]
    fn test_section_later_section_only() {
        let found = find_in_html(DOC, "under the", Some(SectionScope::new("sub header")));
        assert_eq!(found.as_deref(), Some("Text under the sub header."));
    }

    #[test]
    fn test_section_minified() {
        let html = "<h2>A</h2><p>first para</p><p>second para</p><h2>B</h2><p>second other</p>";
        let found = find_in_html(html, "second", Some(SectionScope::new("A")));
        assert_eq!(found.as_deref(), Some("second para"));
        assert_eq!(find_in_html(html, "other", Some(SectionScope::new("^A$"))), None);
    }

    #[test]
    fn test_section_level_constraint() {
        let scope = SectionScope::new("header").with_level(2);
        let found = find_in_html(DOC, "text", Some(scope));
        assert_eq!(found.as_deref(), Some("Text under the sub header."));
    }

    #[test]
    fn test_section_level_mismatch() {
        let scope = SectionScope::new("sub header").with_level(3);
        assert_eq!(find_in_html(DOC, "text", Some(scope)), None);
    }

    #[test]
    fn test_section_header_not_found() {
        assert_eq!(find_in_html(DOC, "text", Some(SectionScope::new("Appendix"))), None);
    }

    #[test]
    fn test_section_excludes_heading_text() {
        assert_eq!(find_in_html(DOC, "main", Some(SectionScope::new("sub header"))), None);
    }

    #[test]
    fn test_section_level_out_of_range() {
        let scope = SectionScope::new("header").with_level(7);
        assert_eq!(find_in_html(DOC, "text", Some(scope)), None);
    }

    // ── find_header tests ────────────────────────────────────────────

    #[test]
    fn test_find_header_any_level() {
        let document = Html::parse_document(DOC);
        assert_eq!(find_header(&document, "Sub", None).as_deref(), Some("Sub Header"));
    }

    #[test]
    fn test_find_header_by_level() {
        let document = Html::parse_document(DOC);
        assert_eq!(find_header(&document, "Sub", Some(2)).as_deref(), Some("Sub Header"));
        assert_eq!(find_header(&document, "Sub", Some(3)), None);
    }

    #[test]
    fn test_find_header_nested_markup() {
        let document = Html::parse_document("<h2>Install <code>mkt</code></h2>");
        assert_eq!(
            find_header(&document, "Install mkt", Some(2)).as_deref(),
            Some("Install mkt")
        );
    }

    #[test]
    fn test_find_header_is_case_sensitive() {
        let document = Html::parse_document(DOC);
        assert_eq!(find_header(&document, "sub header", None), None);
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("h1"), Some(1));
        assert_eq!(heading_level("h6"), Some(6));
        assert_eq!(heading_level("h7"), None);
        assert_eq!(heading_level("header"), None);
    }
}
