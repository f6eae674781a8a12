//! `mkt projects` command implementation.

use std::path::PathBuf;

use clap::Args;
use mkt_project::output::Output;
use mkt_project::{ProjectLayout, list_doc_projects};

use crate::error::CliError;

/// Arguments for the projects command.
#[derive(Args)]
pub(crate) struct ProjectsArgs {
    /// Directory to search (one level deep).
    #[arg(default_value = ".")]
    dir: PathBuf,
}

impl ProjectsArgs {
    /// Execute the projects command.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory does not exist.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        if !self.dir.is_dir() {
            return Err(CliError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("'{}' is not a directory", self.dir.display()),
            )));
        }
        let projects = list_doc_projects(&self.dir, &ProjectLayout::default());
        if projects.is_empty() {
            Output::new().warning(&format!(
                "No documentation project found in {}",
                self.dir.display()
            ));
            return Ok(());
        }
        let output = Output::stdout();
        for name in projects {
            output.info(&name);
        }
        Ok(())
    }
}
