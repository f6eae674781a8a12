//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod log;
pub(crate) mod projects;

pub(crate) use build::BuildArgs;
pub(crate) use log::LogArgs;
pub(crate) use projects::ProjectsArgs;
