//! YAML front matter splitting.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

static FRONTMATTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A-{3}[ \t]*\r?\n((?s:.*?)\r?\n)(?:\.{3}|-{3})[ \t]*(?:\r?\n|\z)").unwrap()
});

/// A source page split into its parts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceParts {
    /// Markdown body (front matter removed).
    pub markdown: String,
    /// Raw YAML between the `---` fences, empty if none.
    pub frontmatter: String,
    /// Parsed front matter fields.
    pub meta: Map<String, Value>,
}

/// Split a source page into front matter and markdown body.
///
/// Front matter is only recognized at the very start of the text, between a
/// `---` line and a closing `---` (or `...`) line. A header that is not a
/// YAML mapping is left in the body, as the build tool does.
#[must_use]
pub fn split_frontmatter(text: &str) -> SourceParts {
    let Some(caps) = FRONTMATTER_PATTERN.captures(text) else {
        return SourceParts {
            markdown: text.to_owned(),
            ..SourceParts::default()
        };
    };
    let (Some(whole), Some(yaml)) = (caps.get(0), caps.get(1)) else {
        return SourceParts {
            markdown: text.to_owned(),
            ..SourceParts::default()
        };
    };

    match serde_yaml::from_str::<Value>(yaml.as_str()) {
        Ok(Value::Object(meta)) => SourceParts {
            markdown: text[whole.end()..].trim_start_matches(['\n', '\r']).to_owned(),
            frontmatter: yaml.as_str().trim_end().to_owned(),
            meta,
        },
        Ok(_) => SourceParts {
            markdown: text.to_owned(),
            ..SourceParts::default()
        },
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring invalid YAML front matter");
            SourceParts {
                markdown: text.to_owned(),
                ..SourceParts::default()
            }
        }
    }
}
