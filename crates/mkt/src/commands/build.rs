//! `mkt build` command implementation.

use std::path::PathBuf;

use clap::Args;
use mkt_log::{LogEntry, severities};
use mkt_project::output::Output;
use mkt_project::{BuildOptions, DocProject};

use crate::commands::log::print_entry;
use crate::error::CliError;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Project directory (containing mkdocs.yml).
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Make the build fail on warnings.
    #[arg(long)]
    strict: bool,

    /// Verbose build log and tracing output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Run the post-build integrity checks on every page.
    #[arg(long)]
    check: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if the project cannot be opened, the build cannot
    /// run or fails, or the integrity check fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let mut project = DocProject::open(&self.dir)?;

        let site_name = project
            .config()?
            .site_name()
            .unwrap_or("NO_NAME (yet)")
            .to_owned();
        output.h1(&format!("{site_name} [{}]", self.dir.display()));

        let result = project.build(BuildOptions {
            strict: self.strict,
            verbose: self.verbose,
        })?;
        let command = result.command.join(" ");
        let status = result.status;

        output.h2(&format!("Log of `{command}`"));
        let log = project.log()?;
        for line in severity_summary(log) {
            output.info(&line);
        }
        for entry in log
            .iter()
            .filter(|e| matches!(e.severity.as_str(), "WARNING" | "ERROR" | "CRITICAL"))
        {
            print_entry(&output, entry);
        }

        if !project.success()? {
            let reason = match status {
                Some(code) => format!("exit status {code}"),
                None => "terminated by signal".to_owned(),
            };
            return Err(CliError::BuildFailed(reason));
        }
        output.success("Build succeeded");

        if self.check {
            project.self_check()?;
            let count = project.pages()?.len();
            output.success(&format!("Integrity check passed ({count} pages)"));
        }
        Ok(())
    }
}

/// Entry count per severity, in order of first appearance.
fn severity_summary(entries: &[LogEntry]) -> Vec<String> {
    severities(entries)
        .into_iter()
        .map(|severity| {
            let count = entries.iter().filter(|e| e.severity == severity).count();
            format!("{severity}: {count}")
        })
        .collect()
}
