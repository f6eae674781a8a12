//! Naming conventions shared by the project model and the build plugin.

/// Name under which the page-map exporting plugin is declared.
pub const DEFAULT_PLUGIN_NAME: &str = "test";

/// Directory (relative to the project) where the plugin writes its output.
pub const DEFAULT_TEST_DIRNAME: &str = "__test__";

/// Page-map file name inside the test directory.
pub const DEFAULT_PAGE_MAP_FILENAME: &str = "page_map.json";

/// Docs directory used when the config does not set `docs_dir`.
pub const DEFAULT_DOCS_DIRNAME: &str = "docs";

/// Recognized config file names, in lookup order.
pub const CONFIG_FILENAMES: [&str; 2] = ["mkdocs.yml", "mkdocs.yaml"];

/// Build command, run in the project directory.
pub const DEFAULT_BUILD_COMMAND: [&str; 2] = ["mkdocs", "build"];

/// Conventions of a documentation project under test.
///
/// The default reproduces the standard MkDocs setup. Tests may swap the
/// build command (e.g. for a script) without touching anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Plugin that exports the page map.
    pub plugin_name: String,
    /// Plugin output directory, relative to the project.
    pub test_dirname: String,
    /// Page-map file name inside [`Self::test_dirname`].
    pub page_map_filename: String,
    /// Fallback docs directory.
    pub docs_dirname: String,
    /// Config file names, in lookup order.
    pub config_filenames: Vec<String>,
    /// Program and arguments of the build.
    pub build_command: Vec<String>,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            plugin_name: DEFAULT_PLUGIN_NAME.to_owned(),
            test_dirname: DEFAULT_TEST_DIRNAME.to_owned(),
            page_map_filename: DEFAULT_PAGE_MAP_FILENAME.to_owned(),
            docs_dirname: DEFAULT_DOCS_DIRNAME.to_owned(),
            config_filenames: CONFIG_FILENAMES.iter().map(|s| (*s).to_owned()).collect(),
            build_command: DEFAULT_BUILD_COMMAND.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl ProjectLayout {
    /// Replace the build command.
    #[must_use]
    pub fn with_build_command<I, S>(mut self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.build_command = command.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `name` is one of the recognized config file names.
    #[must_use]
    pub fn is_config_filename(&self, name: &str) -> bool {
        self.config_filenames.iter().any(|c| c == name)
    }
}
