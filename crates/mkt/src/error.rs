//! CLI error types.

use mkt_log::LogError;
use mkt_project::ProjectError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Project(#[from] ProjectError),

    #[error("{0}")]
    Log(#[from] LogError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Build failed ({0})")]
    BuildFailed(String),
}
