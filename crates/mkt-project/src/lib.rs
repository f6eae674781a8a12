//! Documentation projects under test.
//!
//! Builds an MkDocs project (an existing one, or one authored on the fly),
//! then exposes what the build produced:
//!
//! - [`DocProject`]: config, source authoring, build, pages and parsed log
//! - [`Page`] / [`Pages`]: one built page with its markdown, HTML and source
//! - [`find_page`]: partial page name resolution
//! - [`list_doc_projects`], [`list_markdown_files`]: discovery helpers
//! - [`lorem_ipsum`]: filler text for generated pages
//! - [`output`]: colored headings for test output
//!
//! The pages come from the page map that the `test` plugin exports at the
//! end of the build. Without that plugin declared in the config, only the
//! build result and the log are available.

mod build;
mod error;
mod lookup;
mod lorem;
pub mod output;
mod page;
mod project;
mod scan;

pub use build::{BuildOptions, BuildResult, run_command};
pub use error::{PageError, ProjectError};
pub use lookup::find_page;
pub use lorem::{lorem_ipsum, lorem_ipsum_with};
pub use page::{Page, PageFile, PageMeta, PageSource, Pages};
pub use project::DocProject;
pub use scan::{list_doc_projects, list_files, list_markdown_files};

pub use mkt_config::{ProjectLayout, dedent};
pub use mkt_log::{LogEntry, LogQuery};
pub use mkt_html::SectionScope;
