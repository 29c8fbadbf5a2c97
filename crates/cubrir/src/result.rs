//! Result and error types for Cubrir.

use thiserror::Error;

/// Result type for Cubrir operations
pub type CubrirResult<T> = Result<T, CubrirError>;

/// Errors that can occur while orchestrating a test/coverage run
#[derive(Debug, Error)]
pub enum CubrirError {
    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Output directory could not be created
    #[error("Failed to create output directory {path}: {message}")]
    OutputDir {
        /// Directory that failed
        path: String,
        /// Error message
        message: String,
    },

    /// The external compiler reported an error
    #[error("Compilation failed: {message}")]
    Compile {
        /// Error message
        message: String,
    },

    /// Coverage was requested but no artifact could be instrumented
    #[error("Cover enabled but no modules instrumented")]
    NoInstrumentedModules,

    /// A single artifact could not be instrumented
    #[error("Failed to instrument {module} for coverage: {message}")]
    Instrument {
        /// Module the artifact maps to
        module: String,
        /// Error message
        message: String,
    },

    /// The coverage engine could not analyze a module
    #[error("Coverage analysis of {module} failed: {message}")]
    Analyze {
        /// Module under analysis
        module: String,
        /// Error message
        message: String,
    },

    /// The test runner itself errored (distinct from tests failing)
    #[error("Test runner error: {message}")]
    Runner {
        /// Error message
        message: String,
    },

    /// Coverage report could not be generated
    #[error("Report generation failed: {message}")]
    Report {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CubrirError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a compile error
    #[must_use]
    pub fn compile(message: impl Into<String>) -> Self {
        Self::Compile {
            message: message.into(),
        }
    }

    /// Create a runner error
    #[must_use]
    pub fn runner(message: impl Into<String>) -> Self {
        Self::Runner {
            message: message.into(),
        }
    }

    /// Create a report generation error
    #[must_use]
    pub fn report(message: impl Into<String>) -> Self {
        Self::Report {
            message: message.into(),
        }
    }
}
