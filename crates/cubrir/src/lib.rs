//! Cubrir: unit-test execution with HTML code coverage
//!
//! Cubrir (Spanish: "to cover") compiles a project's test sources into an
//! isolated output directory, runs them through an external test runner,
//! and renders per-module coverage as HTML. The sequencing lives in
//! [`Harness`]; the compiler, runner, and coverage engine are trait-backed
//! collaborators so the whole pipeline is testable without external tools.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     CUBRIR Pipeline                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  discover ──► compile ──► instrument ──► run ──► analyze     │
//! │  sources      (Compiler)  (CoverageEngine) (TestRunner)      │
//! │                                                │             │
//! │                              index.html ◄── HtmlReport       │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod adapters;
mod artifact;
mod config;
mod coverage;
mod env_guard;
mod harness;
mod options;
mod report;
mod result;

pub use adapters::{
    CommandCompiler, CommandCoverageEngine, CommandTestRunner, Compiler, CoverageEngine,
    TestOutcome, TestRunner,
};
pub use artifact::{find_files, scan_artifacts, ArtifactRef, ModuleName};
pub use config::{ProjectConfig, ToolsConfig};
pub use coverage::{analyze_modules, percentage, CoverageStat};
pub use env_guard::{EnvGuard, DEFAULT_SEARCH_PATH_VAR};
pub use harness::Harness;
pub use options::{
    effective_compile_opts, runner_opts, ExtensionSupport, DEBUG_INFO_OPT, EXTENSION_DEFINE,
    TEST_DEFINE,
};
pub use report::{HtmlReport, DETAIL_SUFFIX, INDEX_FILE};
pub use result::{CubrirError, CubrirResult};
