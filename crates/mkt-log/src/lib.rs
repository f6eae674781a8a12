//! Build-log parsing for MkDocs test fixtures.
//!
//! The documentation build writes a line-oriented log on stderr:
//!
//! ```text
//! DEBUG   -  Running 1 `page_markdown` events
//! INFO    -  [macros] - Rendering source page: index.md
//! WARNING -  [macros] - ERROR # _Macro Rendering Error_
//!
//! _File_: `second.md`
//! ```
//!
//! [`parse_log`] turns that stream into ordered [`LogEntry`] records and
//! [`LogQuery`] filters them.
//!
//! # Example
//!
//! ```
//! use mkt_log::{LogQuery, parse_log};
//!
//! let log = "INFO    -  [test] - Debug file: __test__/page_map.json";
//! let entries = parse_log(log);
//! let found = LogQuery::new().source("test").first(&entries).unwrap();
//! assert_eq!(found.unwrap().title, "Debug file: __test__/page_map.json");
//! ```

mod entry;
mod parser;
mod query;

pub use entry::LogEntry;
pub use parser::{parse_log, strip_ansi_colors};
pub use query::{LogError, LogQuery, severities};
