//! Running the documentation build as a subprocess.

use std::path::Path;
use std::process::Command;

use crate::error::ProjectError;

/// Flags passed to the build command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Fail the build on warnings (`--strict`).
    pub strict: bool,
    /// Verbose build log (`--verbose`).
    pub verbose: bool,
}

impl BuildOptions {
    /// Arguments appended to the build command.
    #[must_use]
    pub fn args(self) -> Vec<&'static str> {
        let mut args = Vec::new();
        if self.strict {
            args.push("--strict");
        }
        if self.verbose {
            args.push("--verbose");
        }
        args
    }
}

/// Outcome of a finished build.
///
/// A failed build is a normal result: check [`Self::success`] and inspect
/// the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    /// Program and arguments as run.
    pub command: Vec<String>,
    /// Exit code, `None` if the process was killed by a signal.
    pub status: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error (the build log).
    pub stderr: String,
}

impl BuildResult {
    /// Whether the build exited with status 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Run `command` in `cwd`, wait for it and capture its output.
///
/// # Errors
///
/// Returns [`ProjectError::Spawn`] if the command is empty or cannot be
/// started. A non-zero exit is not an error.
pub fn run_command(command: &[String], cwd: &Path) -> Result<BuildResult, ProjectError> {
    let spawn_error = |source| ProjectError::Spawn {
        command: command.join(" "),
        source,
    };
    let (program, args) = command.split_first().ok_or_else(|| {
        spawn_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "empty command",
        ))
    })?;

    tracing::info!(command = %command.join(" "), cwd = %cwd.display(), "Running build");
    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(spawn_error)?;

    let result = BuildResult {
        command: command.to_vec(),
        status: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    if result.success() {
        tracing::info!("Build succeeded");
    } else {
        tracing::warn!(status = ?result.status, "Build failed");
    }
    Ok(result)
}
