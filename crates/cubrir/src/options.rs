//! Effective option assembly.
//!
//! Merges the project configuration into the option vectors handed to the
//! compiler and the test runner. Order is significant and duplicates are
//! preserved; precedence between duplicate options belongs to the tool
//! that consumes them, not to us.

use crate::config::ProjectConfig;
use std::path::Path;

/// Marker definition injected for every test compilation
pub const TEST_DEFINE: &str = "-DTEST";

/// Debug-info flag injected for every test compilation
pub const DEBUG_INFO_OPT: &str = "+debug_info";

/// Marker definition injected when the property-testing extension is present
pub const EXTENSION_DEFINE: &str = "-DPROPER";

/// Header resource that must exist inside the extension's install directory
const EXTENSION_HEADER: &str = "include/proper.hrl";

/// Availability of the optional property-testing extension.
///
/// Probed once at startup and passed down; never re-checked mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionSupport {
    /// Extension installed and usable
    Available,
    /// Extension absent or incomplete
    Unavailable,
}

impl ExtensionSupport {
    /// Probe the host for the extension.
    ///
    /// Available only if the configured installation directory exists and
    /// contains the expected header resource.
    #[must_use]
    pub fn detect(config: &ProjectConfig) -> Self {
        match config.tools.extension_dir.as_deref() {
            Some(dir) => Self::detect_in(dir),
            None => Self::Unavailable,
        }
    }

    fn detect_in(dir: &Path) -> Self {
        if dir.is_dir() && dir.join(EXTENSION_HEADER).is_file() {
            Self::Available
        } else {
            Self::Unavailable
        }
    }

    /// Check availability
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Build the effective compiler options for a test compilation.
///
/// Always starts with the test-mode marker and the debug-info flag, then
/// appends the project's general options, its test-specific options, and
/// finally the extension marker when the extension is available.
#[must_use]
pub fn effective_compile_opts(
    config: &ProjectConfig,
    extension: ExtensionSupport,
) -> Vec<String> {
    let mut opts = vec![TEST_DEFINE.to_string(), DEBUG_INFO_OPT.to_string()];
    opts.extend(config.compile_opts.iter().cloned());
    opts.extend(config.test_compile_opts.iter().cloned());
    if extension.is_available() {
        opts.push(EXTENSION_DEFINE.to_string());
    }
    opts
}

/// Build the test-runner options.
///
/// A verbosity flag comes first when global verbose mode is requested,
/// followed by the configured runner options in declaration order.
#[must_use]
pub fn runner_opts(config: &ProjectConfig) -> Vec<String> {
    let mut opts = Vec::with_capacity(config.runner_opts.len() + 1);
    if config.verbose {
        opts.push("verbose".to_string());
    }
    opts.extend(config.runner_opts.iter().cloned());
    opts
}
