//! Filesystem discovery of projects and pages.

use std::fs;
use std::path::Path;

use mkt_config::ProjectLayout;

/// Names of the immediate sub-directories of `dir` that hold a config file.
///
/// Sorted by name. Returns an empty list if `dir` cannot be read.
#[must_use]
pub fn list_doc_projects(dir: &Path, layout: &ProjectLayout) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut projects: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_ok_and(|t| t.is_dir()))
        .filter(|e| {
            layout
                .config_filenames
                .iter()
                .any(|name| e.path().join(name).is_file())
        })
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    projects.sort();
    projects
}

/// Every file below `dir`, as `/`-separated paths relative to `dir`, sorted.
#[must_use]
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    collect_files(dir, "", &mut files);
    files.sort();
    files
}

/// Markdown (`.md`) files below `dir`, relative and sorted.
#[must_use]
pub fn list_markdown_files(dir: &Path) -> Vec<String> {
    list_files(dir)
        .into_iter()
        .filter(|path| Path::new(path).extension().is_some_and(|e| e == "md"))
        .collect()
}

fn collect_files(dir: &Path, prefix: &str, files: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        let rel = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };
        match entry.file_type() {
            Ok(t) if t.is_dir() => collect_files(&entry.path(), &rel, files),
            Ok(_) => files.push(rel),
            Err(_) => {}
        }
    }
}
