//! Text and heading queries over rendered HTML pages.
//!
//! Parsing is delegated to [`scraper`]; this crate only walks the parsed tree.
//!
//! - [`find_in_html`] / [`find_in_document`]: first line of text matching a
//!   pattern, optionally restricted to one heading's section
//! - [`find_header`]: text of the first matching heading
//! - [`select_all`] / [`select_first`]: CSS selector queries
//! - [`plain_text`]: text content of an HTML fragment
//!
//! # Example
//!
//! ```
//! use mkt_html::{SectionScope, find_in_html};
//!
//! let html = "<h1>Intro</h1><p>Hello there</p><h2>Usage</h2><p>Run it</p>";
//! assert_eq!(find_in_html(html, "hello", None).as_deref(), Some("Hello there"));
//! assert_eq!(find_in_html(html, "run", Some(SectionScope::new("intro"))), None);
//! ```

mod search;
mod select;

pub use scraper::{ElementRef, Html};
pub use search::{SectionScope, find_header, find_in_document, find_in_html, heading_level};
pub use select::{HtmlError, plain_text, select_all, select_first};
