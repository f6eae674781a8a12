//! Built pages, as exported by the test plugin in the page map.
//!
//! The page map is a JSON object keyed by source URI (`index.md`,
//! `guide/install.md`, ...). Each value carries the rendered markdown, the
//! HTML fragment, the front matter and the file record of one page:
//!
//! ```json
//! {
//!     "index.md": {
//!         "title": "Main Page",
//!         "markdown": "# Main Page\n\nHello world!",
//!         "content": "<h1 id=\"main-page\">Main Page</h1>...",
//!         "meta": {},
//!         "file": {
//!             "src_uri": "index.md",
//!             "name": "index",
//!             "abs_src_path": "/path/to/project/docs/index.md",
//!             "abs_dest_path": "/path/to/project/site/index.html"
//!         }
//!     }
//! }
//! ```
//!
//! Everything derived from files on disk (final HTML, parsed tree, source
//! text) is read on first access and kept for the life of the [`Page`].

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use mkt_html::{ElementRef, Html, SectionScope};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::PageError;
use crate::lookup::find_page;

/// File record of a page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageFile {
    /// Path of the source relative to the docs directory (`/`-separated).
    pub src_uri: String,
    /// Page name (file stem, `index` for index pages).
    pub name: String,
    /// Absolute path of the markdown source.
    pub abs_src_path: PathBuf,
    /// Absolute path of the generated HTML file.
    pub abs_dest_path: PathBuf,
    /// Path of the output file relative to the site directory.
    #[serde(default)]
    pub dest_uri: String,
    /// URL of the page relative to the site root.
    #[serde(default)]
    pub url: String,
}

/// Front matter fields of a page.
///
/// Front matter is free-form, so this stays a JSON mapping.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct PageMeta(Map<String, Value>);

impl PageMeta {
    /// Field by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String field by name.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Whether the page has no front matter fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All fields, in declaration order.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for PageMeta {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Source file of a page, split into its parts.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSource {
    /// The file as typed.
    pub text: String,
    /// Markdown body without front matter.
    pub markdown: String,
    /// Raw YAML front matter, empty if none.
    pub frontmatter: String,
    /// Parsed front matter.
    pub meta: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct PageRecord {
    #[serde(deserialize_with = "null_as_empty")]
    markdown: String,
    #[serde(deserialize_with = "null_as_empty")]
    content: String,
    meta: PageMeta,
    file: PageFile,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One page produced by the build.
#[derive(Debug)]
pub struct Page {
    key: String,
    record: PageRecord,
    plain_text: OnceCell<String>,
    html: OnceCell<String>,
    document: OnceCell<Html>,
    source: OnceCell<PageSource>,
}

impl Page {
    /// Build a page from its page-map entry.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Invalid`] if `markdown`, `content`, `meta` or
    /// `file` is missing or malformed.
    pub fn from_value(key: impl Into<String>, value: Value) -> Result<Self, PageError> {
        let key = key.into();
        let record = serde_json::from_value(value).map_err(|source| PageError::Invalid {
            key: key.clone(),
            source,
        })?;
        Ok(Self {
            key,
            record,
            plain_text: OnceCell::new(),
            html: OnceCell::new(),
            document: OnceCell::new(),
            source: OnceCell::new(),
        })
    }

    /// Page-map key (the source URI).
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Page title as computed by the build.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.record.title.as_deref()
    }

    /// Page URL relative to the site root.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.record.url.as_deref()
    }

    /// Markdown after the build's markdown stage (macros, hooks), before HTML.
    #[must_use]
    pub fn markdown(&self) -> &str {
        &self.record.markdown
    }

    /// Rendered HTML fragment of the page body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.record.content
    }

    /// Front matter as seen by the build.
    #[must_use]
    pub fn meta(&self) -> &PageMeta {
        &self.record.meta
    }

    /// File record.
    #[must_use]
    pub fn file(&self) -> &PageFile {
        &self.record.file
    }

    /// First level-1 heading of the rendered markdown.
    #[must_use]
    pub fn h1(&self) -> Option<String> {
        mkt_markdown::first_h1(&self.record.markdown)
    }

    /// Text of the HTML fragment, tags removed.
    pub fn plain_text(&self) -> &str {
        self.plain_text
            .get_or_init(|| mkt_html::plain_text(&self.record.content))
    }

    /// Final HTML file as published (with theme and navigation).
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Io`] if the destination file cannot be read.
    pub fn html(&self) -> Result<&str, PageError> {
        if let Some(html) = self.html.get() {
            return Ok(html);
        }
        let html = read_file(&self.record.file.abs_dest_path)?;
        Ok(self.html.get_or_init(|| html))
    }

    /// Parsed tree of [`Self::html`].
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Io`] if the destination file cannot be read.
    pub fn document(&self) -> Result<&Html, PageError> {
        if let Some(document) = self.document.get() {
            return Ok(document);
        }
        let document = Html::parse_document(self.html()?);
        Ok(self.document.get_or_init(|| document))
    }

    /// Source file of the page, before any rendering.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::SourceMissing`] if the source file does not
    /// exist and [`PageError::Io`] if it cannot be read.
    pub fn source(&self) -> Result<&PageSource, PageError> {
        if let Some(source) = self.source.get() {
            return Ok(source);
        }
        let path = &self.record.file.abs_src_path;
        if !path.is_file() {
            return Err(PageError::SourceMissing(path.clone()));
        }
        let text = read_file(path)?;
        let parts = mkt_markdown::split_frontmatter(&text);
        let source = PageSource {
            markdown: parts.markdown,
            frontmatter: parts.frontmatter,
            meta: parts.meta,
            text,
        };
        Ok(self.source.get_or_init(|| source))
    }

    /// First line of the final HTML matching `pattern` (case-insensitive).
    ///
    /// With a scope, only the section under the matching heading is
    /// searched, up to the next heading of any level.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Io`] if the destination file cannot be read.
    pub fn find_text(
        &self,
        pattern: &str,
        scope: Option<SectionScope<'_>>,
    ) -> Result<Option<String>, PageError> {
        Ok(mkt_html::find_in_document(self.document()?, pattern, scope))
    }

    /// Text of the first heading matching `pattern` (case-sensitive).
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Io`] if the destination file cannot be read.
    pub fn find_header(&self, pattern: &str, level: Option<u8>) -> Result<Option<String>, PageError> {
        Ok(mkt_html::find_header(self.document()?, pattern, level))
    }

    /// Elements of the final HTML matching a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Io`] if the destination file cannot be read and
    /// [`PageError::Html`] if the selector is invalid.
    pub fn find_all(&self, selector: &str) -> Result<Vec<ElementRef<'_>>, PageError> {
        Ok(mkt_html::select_all(self.document()?, selector)?)
    }

    /// First element of the final HTML matching a CSS selector.
    ///
    /// # Errors
    ///
    /// Same as [`Self::find_all`].
    pub fn find(&self, selector: &str) -> Result<Option<ElementRef<'_>>, PageError> {
        Ok(mkt_html::select_first(self.document()?, selector)?)
    }

    /// Whether the markdown source exists.
    #[must_use]
    pub fn is_src_file(&self) -> bool {
        self.record.file.abs_src_path.is_file()
    }

    /// Whether the generated HTML exists.
    #[must_use]
    pub fn is_dest_file(&self) -> bool {
        self.record.file.abs_dest_path.is_file()
    }

    /// Whether the markdown stage changed the page body.
    ///
    /// The page counts as not rendered as long as its trimmed source
    /// markdown still appears verbatim in the rendered markdown, so a header
    /// or footer added around an untouched body is "not rendered".
    ///
    /// # Errors
    ///
    /// Same as [`Self::source`].
    pub fn is_markdown_rendered(&self) -> Result<bool, PageError> {
        let source = self.source()?;
        Ok(!self.record.markdown.contains(source.markdown.trim()))
    }
}

fn read_file(path: &Path) -> Result<String, PageError> {
    std::fs::read_to_string(path).map_err(|source| PageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// All pages of one build, in page-map order.
#[derive(Debug, Default)]
pub struct Pages {
    pages: Vec<Page>,
}

impl Pages {
    /// Parse page-map JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Json`] if the text is not a JSON object and
    /// [`PageError::Invalid`] for a malformed entry.
    pub fn parse(text: &str) -> Result<Self, PageError> {
        let map: Map<String, Value> = serde_json::from_str(text)?;
        let pages = map
            .into_iter()
            .map(|(key, value)| Page::from_value(key, value))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { pages })
    }

    /// Load a page-map file.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Io`] if the file cannot be read, otherwise as
    /// [`Self::parse`].
    pub fn load(path: &Path) -> Result<Self, PageError> {
        let pages = Self::parse(&read_file(path)?)?;
        tracing::debug!(path = %path.display(), count = pages.len(), "Loaded page map");
        Ok(pages)
    }

    /// Page by exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Page> {
        self.pages.iter().find(|page| page.key == key)
    }

    /// Page by full or partial name (see [`find_page`]).
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Page> {
        let key = find_page(name, self.keys())?;
        self.get(key)
    }

    /// Page-map keys, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(Page::key)
    }

    /// Iterate over the pages.
    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.pages.iter()
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the build produced no page.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl<'a> IntoIterator for &'a Pages {
    type Item = &'a Page;
    type IntoIter = std::slice::Iter<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;

    const SITE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>Second - Test</title><style>p { color: red; }</style></head>
<body>
<nav><a href="../">Home</a></nav>
<h1 id="second-page">Second page</h1>
<p>It is <em>sunny</em> today.</p>
<h2 id="details">Details</h2>
<p>The wind comes from the west.</p>
<table><tr><td>1</td></tr></table>
</body>
</html>
"#;

    /// Page with source and destination written to `dir`.
    fn write_page(dir: &Path, source: &str, markdown: &str) -> Page {
        let src = dir.join("second.md");
        let dest = dir.join("second.html");
        fs::write(&src, source).unwrap();
        fs::write(&dest, SITE_HTML).unwrap();
        Page::from_value(
            "second.md",
            json!({
                "title": "Second page",
                "url": "second/",
                "markdown": markdown,
                "content": "<h1 id=\"second-page\">Second page</h1>\n<p>It is <em>sunny</em> today.</p>",
                "meta": {"foo": "Hello world", "count": 3},
                "file": {
                    "src_uri": "second.md",
                    "name": "second",
                    "abs_src_path": src,
                    "abs_dest_path": dest,
                    "dest_uri": "second/index.html",
                    "url": "second/"
                }
            }),
        )
        .unwrap()
    }

    const SOURCE: &str = "---\nfoo: Hello world\ncount: 3\n---\n\n# Second page\n\nIt is *sunny* today.\n";

    #[test]
    fn test_page_record_fields() {
        let dir = tempfile::tempdir().unwrap();
        let page = write_page(dir.path(), SOURCE, "# Second page\n\nIt is *sunny* today.");
        assert_eq!(page.key(), "second.md");
        assert_eq!(page.title(), Some("Second page"));
        assert_eq!(page.url(), Some("second/"));
        assert_eq!(page.meta().get_str("foo"), Some("Hello world"));
        assert_eq!(page.meta().get("count"), Some(&json!(3)));
        assert_eq!(page.file().name, "second");
        assert_eq!(page.file().dest_uri, "second/index.html");
        assert_eq!(page.h1().as_deref(), Some("Second page"));
    }

    #[test]
    fn test_plain_text_from_content() {
        let dir = tempfile::tempdir().unwrap();
        let page = write_page(dir.path(), SOURCE, "# Second page");
        assert_eq!(page.plain_text(), "Second page\nIt is sunny today.");
    }

    #[test]
    fn test_source_split() {
        let dir = tempfile::tempdir().unwrap();
        let page = write_page(dir.path(), SOURCE, "# Second page");
        let source = page.source().unwrap();
        assert_eq!(source.text, SOURCE);
        assert_eq!(source.frontmatter, "foo: Hello world\ncount: 3");
        assert_eq!(source.markdown, "# Second page\n\nIt is *sunny* today.\n");
        assert_eq!(source.meta.get("foo"), Some(&json!("Hello world")));
    }

    #[test]
    fn test_source_missing() {
        let dir = tempfile::tempdir().unwrap();
        let page = write_page(dir.path(), SOURCE, "# Second page");
        fs::remove_file(dir.path().join("second.md")).unwrap();
        assert!(!page.is_src_file());
        assert!(matches!(page.source(), Err(PageError::SourceMissing(_))));
    }

    #[test]
    fn test_html_is_read_once() {
        let dir = tempfile::tempdir().unwrap();
        let page = write_page(dir.path(), SOURCE, "# Second page");
        assert!(page.html().unwrap().contains("<nav>"));
        fs::remove_file(dir.path().join("second.html")).unwrap();
        assert!(!page.is_dest_file());
        assert!(page.html().unwrap().contains("<nav>"));
    }

    #[test]
    fn test_html_missing() {
        let dir = tempfile::tempdir().unwrap();
        let page = write_page(dir.path(), SOURCE, "# Second page");
        fs::remove_file(dir.path().join("second.html")).unwrap();
        assert!(matches!(page.html(), Err(PageError::Io { .. })));
    }

    // ── html query tests ─────────────────────────────────────────────

    #[test]
    fn test_find_text() {
        let dir = tempfile::tempdir().unwrap();
        let page = write_page(dir.path(), SOURCE, "# Second page");
        assert_eq!(
            page.find_text("SUNNY", None).unwrap().as_deref(),
            Some("It is sunny today.")
        );
        assert_eq!(page.find_text("color: red", None).unwrap(), None);
    }

    #[test]
    fn test_find_text_in_section() {
        let dir = tempfile::tempdir().unwrap();
        let page = write_page(dir.path(), SOURCE, "# Second page");
        let details = SectionScope::new("details");
        assert_eq!(
            page.find_text("wind", Some(details)).unwrap().as_deref(),
            Some("The wind comes from the west.")
        );
        assert_eq!(page.find_text("sunny", Some(details)).unwrap(), None);
        assert_eq!(
            page.find_text("wind", Some(details.with_level(1))).unwrap(),
            None
        );
    }

    #[test]
    fn test_find_header() {
        let dir = tempfile::tempdir().unwrap();
        let page = write_page(dir.path(), SOURCE, "# Second page");
        assert_eq!(
            page.find_header("Det", None).unwrap().as_deref(),
            Some("Details")
        );
        assert_eq!(page.find_header("Det", Some(1)).unwrap(), None);
        assert_eq!(page.find_header("det", None).unwrap(), None);
    }

    #[test]
    fn test_find_all_and_find() {
        let dir = tempfile::tempdir().unwrap();
        let page = write_page(dir.path(), SOURCE, "# Second page");
        let paragraphs = page.find_all("p").unwrap();
        assert_eq!(paragraphs.len(), 2);
        let link = page.find("nav a").unwrap().unwrap();
        assert_eq!(link.value().attr("href"), Some("../"));
        assert!(page.find("blockquote").unwrap().is_none());
        assert!(matches!(page.find_all("p[["), Err(PageError::Html(_))));
    }

    // ── rendering tests ──────────────────────────────────────────────

    #[test]
    fn test_not_rendered_when_body_survives() {
        let dir = tempfile::tempdir().unwrap();
        let page = write_page(
            dir.path(),
            SOURCE,
            "_Header_\n\n# Second page\n\nIt is *sunny* today.\n\n_Footer_",
        );
        assert!(!page.is_markdown_rendered().unwrap());
    }

    #[test]
    fn test_rendered_when_body_changes() {
        let dir = tempfile::tempdir().unwrap();
        let page = write_page(dir.path(), SOURCE, "# Second page\n\nIt is *rainy* today.");
        assert!(page.is_markdown_rendered().unwrap());
    }

    // ── page map tests ───────────────────────────────────────────────

    fn entry(src_uri: &str) -> Value {
        json!({
            "markdown": "text",
            "content": null,
            "meta": {},
            "file": {
                "src_uri": src_uri,
                "name": src_uri,
                "abs_src_path": format!("/docs/{src_uri}"),
                "abs_dest_path": "/site/index.html"
            }
        })
    }

    #[test]
    fn test_pages_parse_keeps_order() {
        let map = json!({
            "index.md": entry("index.md"),
            "hello/world.md": entry("hello/world.md"),
            "foo.md": entry("foo.md"),
        });
        let pages = Pages::parse(&map.to_string()).unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(
            pages.keys().collect::<Vec<_>>(),
            vec!["index.md", "hello/world.md", "foo.md"]
        );
        assert_eq!(pages.get("foo.md").unwrap().content(), "");
    }

    #[test]
    fn test_pages_find_partial_name() {
        let map = json!({"index.md": entry("index.md"), "hello/world.md": entry("hello/world.md")});
        let pages = Pages::parse(&map.to_string()).unwrap();
        assert_eq!(pages.find("world").map(Page::key), Some("hello/world.md"));
        assert!(pages.find("missing").is_none());
        assert!(pages.get("world").is_none());
    }

    #[test]
    fn test_pages_missing_mandatory_field() {
        let map = json!({"index.md": {"markdown": "x", "content": "", "meta": {}}});
        let err = Pages::parse(&map.to_string()).unwrap_err();
        assert!(matches!(err, PageError::Invalid { ref key, .. } if key == "index.md"));
        assert!(err.to_string().contains("file"), "got {err}");
    }

    #[test]
    fn test_pages_not_an_object() {
        assert!(matches!(Pages::parse("[1, 2]"), Err(PageError::Json(_))));
    }

    #[test]
    fn test_pages_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Pages::load(&dir.path().join("page_map.json")).unwrap_err();
        assert!(matches!(err, PageError::Io { .. }));
    }
}
