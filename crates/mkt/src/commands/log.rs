//! `mkt log` command implementation.

use std::io;
use std::path::{Path, PathBuf};

use clap::Args;
use mkt_log::{LogEntry, LogQuery, parse_log};
use mkt_project::output::Output;

use crate::error::CliError;

/// Arguments for the log command.
#[derive(Args)]
pub(crate) struct LogArgs {
    /// Saved build log (`-` or absent: standard input).
    file: Option<PathBuf>,

    /// Only entries of this severity (e.g. warning).
    #[arg(long)]
    severity: Option<String>,

    /// Regex on the entry source (e.g. macros).
    #[arg(long)]
    source: Option<String>,

    /// Regex on the entry title.
    #[arg(long)]
    title: Option<String>,
}

impl LogArgs {
    /// Execute the log command.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be read or a pattern is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let text = read_input(self.file.as_deref())?;
        let entries = parse_log(&text);
        tracing::debug!(entries = entries.len(), "Parsed build log");
        let query = self.query();
        let found = query.filter(&entries)?;

        if found.is_empty() {
            Output::new().warning("No matching log entry");
            return Ok(());
        }
        let output = Output::stdout();
        for entry in found {
            print_entry(&output, entry);
        }
        Ok(())
    }

    fn query(&self) -> LogQuery {
        let mut query = LogQuery::new();
        if let Some(title) = &self.title {
            query = query.title(title.as_str());
        }
        if let Some(source) = &self.source {
            query = query.source(source.as_str());
        }
        if let Some(severity) = &self.severity {
            query = query.severity(severity.as_str());
        }
        query
    }
}

fn read_input(file: Option<&Path>) -> io::Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path),
        _ => io::read_to_string(io::stdin()),
    }
}

/// One-line form of an entry: severity, source tag and title.
pub(crate) fn entry_line(entry: &LogEntry) -> String {
    if entry.has_source() {
        format!("{} [{}] {}", entry.severity, entry.source, entry.title)
    } else {
        format!("{} {}", entry.severity, entry.title)
    }
}

/// Print an entry, colored by severity, with its payload indented.
pub(crate) fn print_entry(output: &Output, entry: &LogEntry) {
    let line = entry_line(entry);
    match entry.severity.as_str() {
        "ERROR" | "CRITICAL" => output.error(&line),
        "WARNING" => output.warning(&line),
        _ => output.info(&line),
    }
    for payload_line in entry.payload.lines() {
        if payload_line.is_empty() {
            output.info("");
        } else {
            output.info(&format!("    {payload_line}"));
        }
    }
}
