//! Resolution of partial page names against known page paths.

/// Extensions removed before comparing names.
const MARKDOWN_EXTENSIONS: [&str; 2] = [".md", ".markdown"];

fn strip_markdown_extension(path: &str) -> &str {
    MARKDOWN_EXTENSIONS
        .iter()
        .find_map(|ext| path.strip_suffix(ext))
        .unwrap_or(path)
}

/// Whether `candidate` ends with `query` at a `/` boundary.
fn ends_with_segments(candidate: &str, query: &str) -> bool {
    candidate
        .strip_suffix(query)
        .is_some_and(|head| head.is_empty() || head.ends_with('/'))
}

/// Find the page path a (possibly partial) name refers to.
///
/// `query` may be a bare name (`world`), a name with extension
/// (`world.md`), a suffix path (`hello/world`) or a full relative path.
/// Matching is case-sensitive, uses `/` as the only separator and is
/// anchored at path segments: `foo/bar` never matches `no_foo/bar.md`.
/// The first matching candidate wins.
///
/// # Examples
///
/// ```
/// use mkt_project::find_page;
///
/// let pages = ["foo.md", "hello/world.md", "no_foo/bar.md", "foo/bar.md"];
/// assert_eq!(find_page("world", pages), Some("hello/world.md"));
/// assert_eq!(find_page("foo/bar.md", pages), Some("foo/bar.md"));
/// ```
pub fn find_page<'a, I>(query: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let query = strip_markdown_extension(query.trim_start_matches("./").trim_start_matches('/'));
    if query.is_empty() {
        return None;
    }
    candidates
        .into_iter()
        .find(|candidate| ends_with_segments(strip_markdown_extension(candidate), query))
}
