//! mkt CLI - MkDocs test toolkit.
//!
//! Provides commands for:
//! - `build`: Build a documentation project and report its log
//! - `log`: Parse and filter a saved build log
//! - `projects`: List documentation projects in a directory

mod commands;
mod error;

use clap::{Parser, Subcommand};
use mkt_project::output::Output;
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, LogArgs, ProjectsArgs};

/// mkt - Build and inspect MkDocs projects under test.
#[derive(Parser)]
#[command(name = "mkt", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a project and summarize the build log.
    Build(BuildArgs),
    /// Parse a saved build log and print matching entries.
    Log(LogArgs),
    /// List documentation projects below a directory.
    Projects(ProjectsArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Build(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Log(args) => args.execute(),
        Commands::Projects(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
