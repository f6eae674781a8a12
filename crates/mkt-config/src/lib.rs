//! MkDocs project configuration for test fixtures.
//!
//! Reads `mkdocs.yml` / `mkdocs.yaml` and writes generated configs for
//! projects built on the fly.
//!
//! ## Unknown tags
//!
//! Real-world configs carry tags only the build tool understands, e.g.
//! `!ENV [SITE_URL, "http://localhost"]` or
//! `!!python/name:pymdownx.superfences.fence_code_format`. Loading is
//! deliberately lenient: a tagged node is replaced by the text of its tag,
//! so `!ENV [X]` reads as the string `"!ENV"`. The config is inspected, never
//! executed, so the payload is not needed.

mod layout;
mod render;

use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

pub use layout::{
    CONFIG_FILENAMES, DEFAULT_BUILD_COMMAND, DEFAULT_DOCS_DIRNAME, DEFAULT_PAGE_MAP_FILENAME,
    DEFAULT_PLUGIN_NAME, DEFAULT_TEST_DIRNAME, ProjectLayout,
};
pub use render::{dedent, render_config};

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No recognized config file in the directory.
    #[error("No config file found in {} (this is not an MkDocs directory)", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error.
    #[error("Invalid YAML content: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// Well-formed YAML with an unusable shape.
    #[error("Configuration error: {0}")]
    Invalid(String),
}

/// Locate the config file of a project directory.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if none of the layout's config file
/// names exists in `dir`.
pub fn find_config_file(dir: &Path, layout: &ProjectLayout) -> Result<PathBuf, ConfigError> {
    layout
        .config_filenames
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))
}

/// Parsed MkDocs configuration.
///
/// The document is open-ended (themes and plugins add their own keys), so
/// the raw mapping is kept and the fields the test tooling relies on get
/// typed accessors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MkDocsConfig {
    values: Mapping,
    path: Option<PathBuf>,
}

impl MkDocsConfig {
    /// Load a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the file does not exist,
    /// [`ConfigError::Parse`] if it is not valid YAML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        config.path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parse config text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed YAML and
    /// [`ConfigError::Invalid`] if the top level is not a mapping.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let values = match resolve_tags(serde_yaml::from_str(content)?) {
            Value::Mapping(values) => values,
            Value::Null => Mapping::new(),
            _ => {
                return Err(ConfigError::Invalid(
                    "top level of the config must be a mapping".to_owned(),
                ));
            }
        };
        Ok(Self { values, path: None })
    }

    /// File the config was loaded from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The whole document.
    pub fn values(&self) -> &Mapping {
        &self.values
    }

    /// Top-level value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Top-level string value by key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// `site_name`.
    pub fn site_name(&self) -> Option<&str> {
        self.get_str("site_name")
    }

    /// `docs_dir` as written in the config (relative to the project).
    pub fn docs_dir(&self) -> Option<&str> {
        self.get_str("docs_dir")
    }

    /// Names of the declared plugins, in declaration order.
    pub fn plugin_names(&self) -> Vec<&str> {
        match self.get("plugins") {
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(name) => Some(name.as_str()),
                    Value::Mapping(entry) => entry.keys().next().and_then(Value::as_str),
                    _ => None,
                })
                .collect(),
            Some(Value::Mapping(entries)) => entries.keys().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Whether a plugin is declared.
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugin_names().contains(&name)
    }

    /// Options of a declared plugin.
    ///
    /// A plugin declared by bare name has an empty option mapping; `None`
    /// means the plugin is not declared.
    pub fn plugin(&self, name: &str) -> Option<Mapping> {
        let options = |value: &Value| value.as_mapping().cloned().unwrap_or_default();
        match self.get("plugins")? {
            Value::Sequence(items) => items.iter().find_map(|item| match item {
                Value::String(declared) if declared == name => Some(Mapping::new()),
                Value::Mapping(entry) => entry.get(name).map(options),
                _ => None,
            }),
            Value::Mapping(entries) => entries.get(name).map(options),
            _ => None,
        }
    }
}

/// Replace every tagged node by the text of its tag.
fn resolve_tags(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => Value::String(tagged.tag.to_string()),
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(resolve_tags).collect()),
        Value::Mapping(entries) => Value::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (resolve_tags(k), resolve_tags(v)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    const CONFIG: &str = r#"
site_name: Simple test site
docs_dir: source
theme: mkdocs
site_url: !ENV [SITE_URL, "http://localhost"]
plugins:
  - search
  - macros:
      module_name: main
      on_error_fail: true
  - test
markdown_extensions:
  - pymdownx.superfences:
      custom_fences:
        - name: mermaid
          class: mermaid
          format: !relative $config_dir
"#;

    #[test]
    fn test_parse_typed_accessors() {
        let config = MkDocsConfig::parse(CONFIG).unwrap();
        assert_eq!(config.site_name(), Some("Simple test site"));
        assert_eq!(config.docs_dir(), Some("source"));
        assert_eq!(config.get_str("theme"), Some("mkdocs"));
    }

    #[test]
    fn test_parse_tolerates_unknown_tags() {
        let config = MkDocsConfig::parse(CONFIG).unwrap();
        let site_url = config.get_str("site_url").unwrap();
        assert!(site_url.ends_with("ENV"), "got {site_url}");
    }

    #[test]
    fn test_parse_nested_unknown_tag() {
        let config = MkDocsConfig::parse(CONFIG).unwrap();
        let extensions = config.get("markdown_extensions").unwrap();
        let format = &extensions[0]["pymdownx.superfences"]["custom_fences"][0]["format"];
        assert!(format.as_str().is_some_and(|s| s.ends_with("relative")));
    }

    #[test]
    fn test_plugin_names() {
        let config = MkDocsConfig::parse(CONFIG).unwrap();
        assert_eq!(config.plugin_names(), vec!["search", "macros", "test"]);
        assert!(config.has_plugin("test"));
        assert!(!config.has_plugin("mac"));
    }

    #[test]
    fn test_plugin_options() {
        let config = MkDocsConfig::parse(CONFIG).unwrap();
        let macros = config.plugin("macros").unwrap();
        assert_eq!(macros.get("module_name"), Some(&Value::from("main")));
        assert_eq!(config.plugin("search"), Some(Mapping::new()));
        assert_eq!(config.plugin("i18n"), None);
    }

    #[test]
    fn test_plugins_as_mapping() {
        let config = MkDocsConfig::parse("plugins:\n  search:\n  macros:\n    verbose: true\n").unwrap();
        assert_eq!(config.plugin_names(), vec!["search", "macros"]);
        assert_eq!(config.plugin("search"), Some(Mapping::new()));
        assert_eq!(
            config.plugin("macros").unwrap().get("verbose"),
            Some(&Value::Bool(true))
        );
    }

    #[test]
    fn test_parse_empty() {
        let config = MkDocsConfig::parse("  \n").unwrap();
        assert!(config.values().is_empty());
        assert_eq!(config.site_name(), None);
        assert!(config.plugin_names().is_empty());
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = MkDocsConfig::parse("site_name: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_parse_non_mapping() {
        let err = MkDocsConfig::parse("- a\n- b\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    // ── file tests ───────────────────────────────────────────────────

    #[test]
    fn test_find_config_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("mkdocs.yaml"), "site_name: A").unwrap();
        let found = find_config_file(dir.path(), &ProjectLayout::default()).unwrap();
        assert_eq!(found, dir.path().join("mkdocs.yaml"));
    }

    #[test]
    fn test_find_config_file_prefers_yml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("mkdocs.yaml"), "site_name: A").unwrap();
        fs::write(dir.path().join("mkdocs.yml"), "site_name: B").unwrap();
        let found = find_config_file(dir.path(), &ProjectLayout::default()).unwrap();
        assert_eq!(found, dir.path().join("mkdocs.yml"));
    }

    #[test]
    fn test_find_config_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_config_file(dir.path(), &ProjectLayout::default()).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_records_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mkdocs.yml");
        fs::write(&path, CONFIG).unwrap();
        let config = MkDocsConfig::load(&path).unwrap();
        assert_eq!(config.path(), Some(path.as_path()));
        assert_eq!(config.site_name(), Some("Simple test site"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = MkDocsConfig::load(Path::new("/nonexistent/mkdocs.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
