//! Project configuration.
//!
//! Loaded from `cubrir.toml`. Rebar-style key names (`erl_opts`,
//! `eunit_compile_opts`, `eunit_opts`) are accepted as aliases so projects
//! migrating from a rebar-based workflow can keep their option tables.

use crate::result::{CubrirError, CubrirResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// External tool commands used by the command-backed adapters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Compiler command
    pub compiler: String,
    /// Test-runner command
    pub runner: String,
    /// Coverage-engine command
    pub coverage: String,
    /// Installation directory of the optional property-testing extension
    pub extension_dir: Option<PathBuf>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            compiler: "erlc".to_string(),
            runner: "eunit-run".to_string(),
            coverage: "cover-tool".to_string(),
            extension_dir: None,
        }
    }
}

/// Project configuration consumed by the harness.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// General compiler options, in declaration order
    #[serde(alias = "erl_opts")]
    pub compile_opts: Vec<String>,
    /// Test-specific compiler options (e.g. extra source directories)
    #[serde(alias = "eunit_compile_opts")]
    pub test_compile_opts: Vec<String>,
    /// Test-runner options, in declaration order
    #[serde(alias = "eunit_opts")]
    pub runner_opts: Vec<String>,
    /// Whether to instrument artifacts and emit a coverage report
    pub cover_enabled: bool,
    /// Project source directory
    pub src_dir: PathBuf,
    /// Test source directory
    pub test_dir: PathBuf,
    /// Isolated output directory for compiled test artifacts and reports
    pub out_dir: PathBuf,
    /// Regex matched against test-source file names
    pub source_pattern: String,
    /// File extension of compiled artifacts
    pub artifact_ext: String,
    /// Optional single-suite filter (global option, CLI-overridable)
    pub suite: Option<String>,
    /// Global verbose flag (CLI-overridable)
    pub verbose: bool,
    /// External tool commands
    pub tools: ToolsConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            compile_opts: Vec::new(),
            test_compile_opts: Vec::new(),
            runner_opts: Vec::new(),
            cover_enabled: false,
            src_dir: PathBuf::from("src"),
            test_dir: PathBuf::from("test"),
            out_dir: PathBuf::from(".cubrir"),
            source_pattern: r"\.erl$".to_string(),
            artifact_ext: "beam".to_string(),
            suite: None,
            verbose: false,
            tools: ToolsConfig::default(),
        }
    }
}

impl ProjectConfig {
    /// Create a new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `CubrirError::Config` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> CubrirResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CubrirError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        toml::from_str(&content).map_err(|e| {
            CubrirError::config(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Set general compiler options
    #[must_use]
    pub fn with_compile_opts(mut self, opts: Vec<String>) -> Self {
        self.compile_opts = opts;
        self
    }

    /// Set test-specific compiler options
    #[must_use]
    pub fn with_test_compile_opts(mut self, opts: Vec<String>) -> Self {
        self.test_compile_opts = opts;
        self
    }

    /// Set test-runner options
    #[must_use]
    pub fn with_runner_opts(mut self, opts: Vec<String>) -> Self {
        self.runner_opts = opts;
        self
    }

    /// Enable or disable coverage
    #[must_use]
    pub const fn with_cover_enabled(mut self, enabled: bool) -> Self {
        self.cover_enabled = enabled;
        self
    }

    /// Set the output directory
    #[must_use]
    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    /// Set the test source directory
    #[must_use]
    pub fn with_test_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.test_dir = dir.into();
        self
    }

    /// Set the project source directory
    #[must_use]
    pub fn with_src_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.src_dir = dir.into();
        self
    }

    /// Set the single-suite filter
    #[must_use]
    pub fn with_suite(mut self, suite: impl Into<String>) -> Self {
        self.suite = Some(suite.into());
        self
    }

    /// Set the global verbose flag
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
