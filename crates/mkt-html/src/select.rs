//! CSS selection and text extraction.

use scraper::{ElementRef, Html, Selector};

/// Error from an HTML query.
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    /// The CSS selector could not be parsed.
    #[error("invalid selector '{selector}': {message}")]
    Selector {
        /// Selector as given.
        selector: String,
        /// Parser message.
        message: String,
    },
}

fn parse_selector(selector: &str) -> Result<Selector, HtmlError> {
    Selector::parse(selector).map_err(|e| HtmlError::Selector {
        selector: selector.to_owned(),
        message: e.to_string(),
    })
}

/// All elements matching a CSS selector (e.g. `h2`, `table.docutils`, `a[href]`).
///
/// # Errors
///
/// Returns [`HtmlError::Selector`] if the selector is invalid.
pub fn select_all<'a>(document: &'a Html, selector: &str) -> Result<Vec<ElementRef<'a>>, HtmlError> {
    let selector = parse_selector(selector)?;
    Ok(document.select(&selector).collect())
}

/// First element matching a CSS selector.
///
/// # Errors
///
/// Returns [`HtmlError::Selector`] if the selector is invalid.
pub fn select_first<'a>(
    document: &'a Html,
    selector: &str,
) -> Result<Option<ElementRef<'a>>, HtmlError> {
    let selector = parse_selector(selector)?;
    Ok(document.select(&selector).next())
}

/// Text content of an HTML fragment, tags removed.
#[must_use]
pub fn plain_text(html: &str) -> String {
    Html::parse_fragment(html).root_element().text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = "<h1>Title</h1><h2>First</h2><p>a</p><h2>Second <em>part</em></h2>";

    #[test]
    fn test_select_all_by_tag() {
        let document = Html::parse_document(DOC);
        let headers = select_all(&document, "h2").unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[1].text().collect::<String>(), "Second part");
    }

    #[test]
    fn test_select_first() {
        let document = Html::parse_document(DOC);
        let first = select_first(&document, "h2").unwrap().unwrap();
        assert_eq!(first.text().collect::<String>(), "First");
        assert!(select_first(&document, "table").unwrap().is_none());
    }

    #[test]
    fn test_select_invalid_selector() {
        let document = Html::parse_document(DOC);
        let err = select_all(&document, "h2[").unwrap_err();
        assert!(matches!(err, HtmlError::Selector { .. }));
    }

    #[test]
    fn test_plain_text() {
        let text = plain_text("<h1>Second page</h1>\n<p>This is a <b>second</b> page.</p>");
        assert_eq!(text, "Second page\nThis is a second page.");
    }
}
