//! Config authoring for projects built on the fly.

use serde_yaml::{Mapping, Value};

use crate::ConfigError;

/// Strip the common indentation of a multi-line literal and trim it.
///
/// Lets callers write YAML or markdown as indented raw strings inside test
/// code.
#[must_use]
pub fn dedent(text: &str) -> String {
    textwrap::dedent(text).trim().to_owned()
}

/// Render a config document from YAML text and explicit entries.
///
/// `content` is dedented and parsed; `overrides` entries replace keys of the
/// same name (keeping their position) or are appended. The result always
/// declares `plugin`: a missing plugin list becomes `[search, <plugin>]`.
///
/// Tags in `content` are kept verbatim, so the build tool still sees them.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if `content` is not valid YAML and
/// [`ConfigError::Invalid`] if it is not a mapping.
pub fn render_config(content: &str, overrides: Mapping, plugin: &str) -> Result<String, ConfigError> {
    let content = dedent(content);
    let mut config = if content.is_empty() {
        Mapping::new()
    } else {
        match serde_yaml::from_str(&content)? {
            Value::Mapping(values) => values,
            Value::Null => Mapping::new(),
            _ => {
                return Err(ConfigError::Invalid(
                    "config content must be a YAML mapping".to_owned(),
                ));
            }
        }
    };

    for (key, value) in overrides {
        config.insert(key, value);
    }
    ensure_plugin(&mut config, plugin)?;

    Ok(serde_yaml::to_string(&Value::Mapping(config))?)
}

fn ensure_plugin(config: &mut Mapping, plugin: &str) -> Result<(), ConfigError> {
    let declared = |item: &Value| match item {
        Value::String(name) => name == plugin,
        Value::Mapping(entry) => entry.contains_key(plugin),
        _ => false,
    };

    match config.get_mut("plugins") {
        None | Some(Value::Null) => {
            config.insert(
                Value::from("plugins"),
                Value::Sequence(vec![Value::from("search"), Value::from(plugin)]),
            );
        }
        Some(Value::Sequence(items)) => {
            if !items.iter().any(declared) {
                items.push(Value::from(plugin));
            }
        }
        Some(Value::Mapping(entries)) => {
            if !entries.contains_key(plugin) {
                entries.insert(Value::from(plugin), Value::Null);
            }
        }
        Some(_) => {
            return Err(ConfigError::Invalid(
                "plugins must be a list or a mapping".to_owned(),
            ));
        }
    }
    Ok(())
}
