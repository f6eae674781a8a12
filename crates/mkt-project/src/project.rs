//! A documentation project under test.
//!
//! [`DocProject`] covers the whole test cycle: author (or reuse) a project,
//! run the build, then query the pages and the build log.
//!
//! ```no_run
//! use mkt_log::LogQuery;
//! use mkt_project::{BuildOptions, DocProject};
//!
//! # fn main() -> Result<(), mkt_project::ProjectError> {
//! let mut project = DocProject::open("tests/simple")?;
//! let result = project.build(BuildOptions::default())?;
//! assert!(result.success());
//!
//! let page = project.get_page("index")?.expect("index page");
//! assert_eq!(page.h1().as_deref(), Some("Main Page"));
//!
//! let warning = project.find_entry(&LogQuery::new().severity("warning"))?;
//! assert!(warning.is_none());
//! # Ok(())
//! # }
//! ```
//!
//! Build-derived values (pages, log) are loaded on first access and kept
//! until the next build.

use std::cell::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use mkt_config::{ConfigError, MkDocsConfig, ProjectLayout, dedent, find_config_file, render_config};
use mkt_log::{LogEntry, LogQuery, parse_log, severities};
use serde_yaml::Mapping;

use crate::build::{BuildOptions, BuildResult, run_command};
use crate::error::ProjectError;
use crate::page::{Page, Pages};
use crate::scan::list_files;

/// Stands in for a missing config file; never cached.
static EMPTY_CONFIG: LazyLock<MkDocsConfig> = LazyLock::new(MkDocsConfig::default);

/// A documentation project: config, sources, build and build output.
#[derive(Debug)]
pub struct DocProject {
    project_dir: Option<PathBuf>,
    layout: ProjectLayout,
    config_file: Option<PathBuf>,
    config: OnceCell<MkDocsConfig>,
    build_result: Option<BuildResult>,
    pages: OnceCell<Pages>,
    log: OnceCell<Vec<LogEntry>>,
}

impl DocProject {
    /// Open an existing project directory.
    ///
    /// No build is run; call [`Self::build`] explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::ProjectDirMissing`] if `dir` is not a directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, ProjectError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(ProjectError::ProjectDirMissing(dir));
        }
        Ok(Self::new(dir))
    }

    /// Open a project directory, creating it if needed.
    ///
    /// An existing directory is never cleared.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Io`] if the directory cannot be created.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, ProjectError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self::new(dir))
    }

    fn new(dir: PathBuf) -> Self {
        tracing::info!(project = %dir.display(), "Opened documentation project");
        Self {
            project_dir: Some(dir),
            layout: ProjectLayout::default(),
            config_file: None,
            config: OnceCell::new(),
            build_result: None,
            pages: OnceCell::new(),
            log: OnceCell::new(),
        }
    }

    /// Use different naming conventions or build command.
    #[must_use]
    pub fn with_layout(mut self, layout: ProjectLayout) -> Self {
        self.layout = layout;
        self.config = OnceCell::new();
        self
    }

    /// Conventions in use.
    #[must_use]
    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Project root directory.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Deleted`] after [`Self::delete`].
    pub fn project_dir(&self) -> Result<&Path, ProjectError> {
        self.project_dir.as_deref().ok_or(ProjectError::Deleted)
    }

    /// Markdown source directory, created if missing.
    ///
    /// Taken from the config's `docs_dir`, or the layout's default.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Deleted`], a config error, or
    /// [`ProjectError::Io`] if the directory cannot be created.
    pub fn docs_dir(&self) -> Result<PathBuf, ProjectError> {
        let config = self.config()?;
        let name = config.docs_dir().unwrap_or(self.layout.docs_dirname.as_str());
        let dir = self.project_dir()?.join(name);
        if !dir.is_dir() {
            fs::create_dir_all(&dir)?;
        }
        Ok(dir)
    }

    /// Directory where the test plugin writes its output.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Deleted`] after [`Self::delete`].
    pub fn test_dir(&self) -> Result<PathBuf, ProjectError> {
        Ok(self.project_dir()?.join(&self.layout.test_dirname))
    }

    // ── authoring ────────────────────────────────────────────────────

    /// Remove every file and sub-directory of the docs directory.
    ///
    /// Returns the number of files removed.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Io`] if a removal fails.
    pub fn clear(&self) -> Result<usize, ProjectError> {
        let docs_dir = self.docs_dir()?;
        let removed = remove_dir_contents(&docs_dir)?;
        tracing::debug!(dir = %docs_dir.display(), removed, "Cleared docs directory");
        Ok(removed)
    }

    /// Write the config file under the first conventional name.
    ///
    /// See [`Self::make_config_as`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::make_config_as`].
    pub fn make_config(&mut self, content: &str, overrides: Mapping) -> Result<String, ProjectError> {
        let filename = self
            .layout
            .config_filenames
            .first()
            .cloned()
            .unwrap_or_else(|| mkt_config::CONFIG_FILENAMES[0].to_owned());
        self.make_config_as(&filename, content, overrides)
    }

    /// Write a config file and make it the project's config.
    ///
    /// `content` is YAML (dedented first, so it can be an indented literal);
    /// `overrides` entries win over it. The test plugin is always declared.
    /// Returns the YAML as written.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Config`] if `content` is not a YAML mapping
    /// and [`ProjectError::Io`] if the file cannot be written.
    pub fn make_config_as(
        &mut self,
        filename: &str,
        content: &str,
        overrides: Mapping,
    ) -> Result<String, ProjectError> {
        let yaml = render_config(content, overrides, &self.layout.plugin_name)?;
        let path = self.project_dir()?.join(filename);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &yaml)?;
        tracing::info!(path = %path.display(), "Wrote config file");

        self.config_file = Some(path);
        self.config = OnceCell::new();
        Ok(yaml)
    }

    /// Write a markdown page under the docs directory.
    ///
    /// `content` is dedented and trimmed. A non-empty `meta` becomes the
    /// YAML front matter. Returns the text as written.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Yaml`] if `meta` cannot be serialized and
    /// [`ProjectError::Io`] if the file cannot be written.
    pub fn add_source_page(
        &self,
        path: &str,
        content: &str,
        meta: &Mapping,
    ) -> Result<String, ProjectError> {
        let content = dedent(content);
        let page = if meta.is_empty() {
            content
        } else {
            let header = serde_yaml::to_string(meta)?;
            format!("---\n{}\n---\n\n{content}", header.trim())
        };

        let full_path = self.docs_dir()?.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, &page)?;
        tracing::debug!(path = %full_path.display(), "Wrote source page");
        Ok(page)
    }

    /// All files of the docs directory, relative and sorted.
    ///
    /// # Errors
    ///
    /// Same as [`Self::docs_dir`].
    pub fn source_pages(&self) -> Result<Vec<String>, ProjectError> {
        Ok(list_files(&self.docs_dir()?))
    }

    /// Delete the project directory with all its files.
    ///
    /// Not to be confused with [`Self::clear`]. If the current directory is
    /// inside the project, it moves to the project's parent first. The
    /// instance is unusable afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Deleted`] if already deleted and
    /// [`ProjectError::Io`] if the removal fails.
    pub fn delete(&mut self) -> Result<(), ProjectError> {
        let dir = self.project_dir()?.to_path_buf();
        let canonical = fs::canonicalize(&dir)?;
        if std::env::current_dir().is_ok_and(|cwd| cwd.starts_with(&canonical))
            && let Some(parent) = canonical.parent()
        {
            std::env::set_current_dir(parent)?;
        }
        fs::remove_dir_all(&dir)?;
        tracing::info!(project = %dir.display(), "Deleted project");

        self.project_dir = None;
        self.config_file = None;
        self.config = OnceCell::new();
        self.build_result = None;
        self.pages = OnceCell::new();
        self.log = OnceCell::new();
        Ok(())
    }

    // ── config ───────────────────────────────────────────────────────

    /// Path of the config file.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Config`] with [`ConfigError::NotFound`] if
    /// the project has no config file.
    pub fn config_file(&self) -> Result<PathBuf, ProjectError> {
        if let Some(path) = &self.config_file {
            return Ok(path.clone());
        }
        Ok(find_config_file(self.project_dir()?, &self.layout)?)
    }

    /// Parsed config; empty while the project has no config file.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Config`] if the file cannot be read or parsed.
    pub fn config(&self) -> Result<&MkDocsConfig, ProjectError> {
        if let Some(config) = self.config.get() {
            return Ok(config);
        }
        let config = match self.config_file() {
            Ok(path) => MkDocsConfig::load(&path)?,
            Err(ProjectError::Config(ConfigError::NotFound(_))) => return Ok(&*EMPTY_CONFIG),
            Err(e) => return Err(e),
        };
        Ok(self.config.get_or_init(|| config))
    }

    /// Options of a declared plugin (see [`MkDocsConfig::plugin`]).
    ///
    /// # Errors
    ///
    /// Same as [`Self::config`].
    pub fn plugin(&self, name: &str) -> Result<Option<Mapping>, ProjectError> {
        Ok(self.config()?.plugin(name))
    }

    // ── build ────────────────────────────────────────────────────────

    /// Run the build in the project directory.
    ///
    /// Previous pages and log are dropped. A failing build is returned as a
    /// result, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Spawn`] if the build command cannot be started.
    pub fn build(&mut self, options: BuildOptions) -> Result<&BuildResult, ProjectError> {
        let dir = self.project_dir()?.to_path_buf();
        let mut command = self.layout.build_command.clone();
        command.extend(options.args().into_iter().map(str::to_owned));

        tracing::info!(project = %dir.display(), "Building documentation");
        let result = run_command(&command, &dir)?;

        self.pages = OnceCell::new();
        self.log = OnceCell::new();
        Ok(&*self.build_result.insert(result))
    }

    /// Result of the last build.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NotBuilt`] before the first build.
    pub fn build_result(&self) -> Result<&BuildResult, ProjectError> {
        self.build_result.as_ref().ok_or(ProjectError::NotBuilt)
    }

    /// Whether the last build succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NotBuilt`] before the first build.
    pub fn success(&self) -> Result<bool, ProjectError> {
        Ok(self.build_result()?.success())
    }

    /// Raw build log (standard error of the build).
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NotBuilt`] before the first build.
    pub fn trace(&self) -> Result<&str, ProjectError> {
        Ok(&self.build_result()?.stderr)
    }

    // ── pages ────────────────────────────────────────────────────────

    /// Page map written by the test plugin.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::PageMapMissing`] if the file does not exist,
    /// which usually means the plugin is not declared in the config.
    pub fn page_map_file(&self) -> Result<PathBuf, ProjectError> {
        let path = self.test_dir()?.join(&self.layout.page_map_filename);
        if !path.is_file() {
            return Err(ProjectError::PageMapMissing {
                path,
                plugin: self.layout.plugin_name.clone(),
            });
        }
        Ok(path)
    }

    /// Pages of the last build.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NotBuilt`] before the first build,
    /// [`ProjectError::PageMapMissing`] or a page error.
    pub fn pages(&self) -> Result<&Pages, ProjectError> {
        self.build_result()?;
        if let Some(pages) = self.pages.get() {
            return Ok(pages);
        }
        let pages = Pages::load(&self.page_map_file()?)?;
        Ok(self.pages.get_or_init(|| pages))
    }

    /// Page by full or partial name (`index`, `second.md`, `guide/install`).
    ///
    /// # Errors
    ///
    /// Same as [`Self::pages`]. An unknown name is `Ok(None)`.
    pub fn get_page(&self, name: &str) -> Result<Option<&Page>, ProjectError> {
        Ok(self.pages()?.find(name))
    }

    // ── log ──────────────────────────────────────────────────────────

    /// Parsed build log.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NotBuilt`] before the first build.
    pub fn log(&self) -> Result<&[LogEntry], ProjectError> {
        let trace = self.trace()?;
        Ok(self.log.get_or_init(|| parse_log(trace)))
    }

    /// Severities found in the log, in order of first appearance.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NotBuilt`] before the first build.
    pub fn log_severities(&self) -> Result<Vec<String>, ProjectError> {
        Ok(severities(self.log()?))
    }

    /// Log entries matching `query`; all entries for an empty query.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NotBuilt`] before the first build and
    /// [`ProjectError::Log`] for an invalid pattern.
    pub fn find_entries(&self, query: &LogQuery) -> Result<Vec<&LogEntry>, ProjectError> {
        Ok(query.filter(self.log()?)?)
    }

    /// First log entry matching `query`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::find_entries`].
    pub fn find_entry(&self, query: &LogQuery) -> Result<Option<&LogEntry>, ProjectError> {
        Ok(query.first(self.log()?)?)
    }

    /// Post-build integrity checks.
    ///
    /// Every page must have markdown, a source file and a destination file.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Integrity`] describing the first failed
    /// check, or any error of [`Self::pages`].
    pub fn self_check(&self) -> Result<(), ProjectError> {
        for page in self.pages()? {
            let name = &page.file().name;
            if page.markdown().is_empty() {
                return Err(ProjectError::Integrity(format!("'{name}' is empty")));
            }
            if !page.is_src_file() {
                return Err(ProjectError::Integrity(format!(
                    "source (Markdown) of '{name}' is missing"
                )));
            }
            if !page.is_dest_file() {
                return Err(ProjectError::Integrity(format!(
                    "destination (HTML) of '{name}' is missing"
                )));
            }
        }
        Ok(())
    }
}

fn remove_dir_contents(dir: &Path) -> std::io::Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            removed += remove_dir_contents(&path)?;
            fs::remove_dir(&path)?;
        } else {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}
