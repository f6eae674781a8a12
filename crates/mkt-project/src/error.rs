//! Error types for the project and page model.

use std::path::PathBuf;

use mkt_config::ConfigError;
use mkt_html::HtmlError;
use mkt_log::LogError;

/// Error while reading or querying a built page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// A page file could not be read.
    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The markdown source of the page is gone.
    #[error("Source file '{}' does not exist", .0.display())]
    SourceMissing(PathBuf),

    /// The page map is not valid JSON.
    #[error("Invalid page map: {0}")]
    Json(#[from] serde_json::Error),

    /// A page entry lacks a mandatory field or has the wrong shape.
    #[error("Invalid page '{key}': {source}")]
    Invalid {
        /// Page-map key of the entry.
        key: String,
        /// Deserialization error.
        source: serde_json::Error,
    },

    /// HTML query error.
    #[error(transparent)]
    Html(#[from] HtmlError),
}

/// Error from a documentation project.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// The project directory does not exist and creation was not requested.
    #[error(
        "Project directory '{}' does not exist (use DocProject::create to make it)",
        .0.display()
    )]
    ProjectDirMissing(PathBuf),

    /// The project was deleted; the instance is no longer usable.
    #[error("This project is deleted and no longer has a project directory")]
    Deleted,

    /// A build-derived value was requested before any build.
    #[error("No build result yet (build has not run)")]
    NotBuilt,

    /// The build ran but did not export its page map.
    #[error(
        "The page map file {} was not found. Is the `{plugin}` plugin declared in the config file?",
        .path.display()
    )]
    PageMapMissing {
        /// Expected page-map location.
        path: PathBuf,
        /// Plugin that should have written it.
        plugin: String,
    },

    /// The build command could not be started.
    #[error("Failed to run build command `{command}`: {source}")]
    Spawn {
        /// Command line as attempted.
        command: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A post-build integrity check failed.
    #[error("Integrity check failed: {0}")]
    Integrity(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Front matter could not be serialized.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Page error.
    #[error(transparent)]
    Page(#[from] PageError),

    /// Log filter error.
    #[error(transparent)]
    Log(#[from] LogError),
}
