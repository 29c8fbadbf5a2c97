//! Test/coverage run orchestration.
//!
//! The harness owns the sequencing: ensure the output directory, discover
//! test sources, compile, scan artifacts, instrument, run the tests inside
//! an environment guard, analyze coverage, write the report. Only setup
//! and compile errors abort the run; everything downstream of "tests ran"
//! degrades gracefully so a coverage bug never corrupts the pass/fail
//! signal.

use crate::adapters::{Compiler, CoverageEngine, TestOutcome, TestRunner};
use crate::artifact::{find_files, scan_artifacts, ArtifactRef, ModuleName};
use crate::config::ProjectConfig;
use crate::coverage::{analyze_modules, CoverageStat};
use crate::env_guard::{EnvGuard, DEFAULT_SEARCH_PATH_VAR};
use crate::options::{effective_compile_opts, runner_opts, ExtensionSupport};
use crate::report::{HtmlReport, INDEX_FILE};
use crate::result::{CubrirError, CubrirResult};
use regex::Regex;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Orchestrates one test/coverage run over three external collaborators.
#[derive(Debug)]
pub struct Harness<C, R, E> {
    config: ProjectConfig,
    compiler: C,
    runner: R,
    engine: E,
    extension: ExtensionSupport,
    stats: Vec<CoverageStat>,
}

impl<C: Compiler, R: TestRunner, E: CoverageEngine> Harness<C, R, E> {
    /// Create a harness.
    ///
    /// Extension availability is probed here, once, and carried for the
    /// lifetime of the harness.
    pub fn new(config: ProjectConfig, compiler: C, runner: R, engine: E) -> Self {
        let extension = ExtensionSupport::detect(&config);
        Self {
            config,
            compiler,
            runner,
            engine,
            extension,
            stats: Vec::new(),
        }
    }

    /// The configuration this harness runs with
    #[must_use]
    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Probed extension availability
    #[must_use]
    pub fn extension(&self) -> ExtensionSupport {
        self.extension
    }

    /// Where the coverage index page lands when coverage is enabled
    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        self.config.out_dir.join(INDEX_FILE)
    }

    /// Per-module stats collected by the most recent `run_tests`.
    ///
    /// Empty until a coverage-enabled run completes.
    #[must_use]
    pub fn coverage_stats(&self) -> &[CoverageStat] {
        &self.stats
    }

    /// Execute a full test run.
    ///
    /// Returns the test outcome; tests failing is a value, not an error.
    /// A runner error is converted into `TestOutcome::Failed`. Coverage
    /// analysis and report failures are logged and never change the
    /// outcome.
    ///
    /// # Errors
    ///
    /// Fatal cases only: output-directory creation, an invalid source
    /// pattern, compiler failure, artifact scanning, coverage reset, or
    /// zero successfully instrumented artifacts when coverage is on.
    pub fn run_tests(&mut self) -> CubrirResult<TestOutcome> {
        let out_dir = self.config.out_dir.clone();
        std::fs::create_dir_all(&out_dir).map_err(|e| CubrirError::OutputDir {
            path: out_dir.display().to_string(),
            message: e.to_string(),
        })?;

        let pattern = Regex::new(&self.config.source_pattern).map_err(|e| {
            CubrirError::config(format!(
                "invalid source_pattern {:?}: {e}",
                self.config.source_pattern
            ))
        })?;
        let mut sources = find_files(&self.config.test_dir, &pattern);
        sources.extend(find_files(&self.config.src_dir, &pattern));
        debug!(count = sources.len(), "discovered sources for test compilation");

        let compile_opts = effective_compile_opts(&self.config, self.extension);
        self.compiler.compile(&sources, &out_dir, &compile_opts)?;

        let artifacts = scan_artifacts(&out_dir, &self.config.artifact_ext)?;
        let modules: Vec<ModuleName> = artifacts.iter().map(ArtifactRef::module_name).collect();
        debug!(count = modules.len(), "scanned compiled artifacts");

        if self.config.cover_enabled {
            self.instrument_all(&artifacts)?;
        }

        let opts = runner_opts(&self.config);
        let outcome = self.run_guarded(&out_dir, &modules, &opts)?;

        if self.config.cover_enabled {
            let targets = self.target_modules(&modules);
            self.stats = analyze_modules(&self.engine, &targets);
            let report = HtmlReport::new(&self.stats);
            match report.write(&out_dir, &self.engine) {
                Ok(index) => info!(report = %index.display(), "coverage report written"),
                Err(e) => warn!(error = %e, "coverage report generation failed"),
            }
        }

        Ok(outcome)
    }

    /// Remove the output directory and everything in it.
    ///
    /// A missing directory is already clean.
    pub fn clean(&self) -> CubrirResult<()> {
        match std::fs::remove_dir_all(&self.config.out_dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Reset the engine, then instrument every artifact.
    ///
    /// Zero successes is fatal; individual failures are warnings. The
    /// suite filter never narrows instrumentation, only execution and
    /// analysis.
    fn instrument_all(&mut self, artifacts: &[ArtifactRef]) -> CubrirResult<()> {
        self.engine.reset()?;
        let mut instrumented = 0usize;
        for artifact in artifacts {
            match self.engine.instrument(artifact) {
                Ok(()) => instrumented += 1,
                Err(e) => {
                    warn!(module = %artifact.module_name(), error = %e, "instrumentation failed");
                }
            }
        }
        if instrumented == 0 {
            return Err(CubrirError::NoInstrumentedModules);
        }
        debug!(instrumented, total = artifacts.len(), "coverage instrumentation done");
        Ok(())
    }

    /// Run the tests with the output directory prefixed onto the search
    /// path and as the working directory. The guard restores both no
    /// matter how the runner exits; a runner error becomes `Failed`.
    fn run_guarded(
        &self,
        out_dir: &std::path::Path,
        modules: &[ModuleName],
        opts: &[String],
    ) -> CubrirResult<TestOutcome> {
        let _guard = EnvGuard::acquire(out_dir, DEFAULT_SEARCH_PATH_VAR)?;
        let result = match self.config.suite.as_deref() {
            Some(suite) => self.runner.run_suite(suite, opts),
            None => self.runner.run_modules(modules, opts),
        };
        Ok(match result {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "test runner errored; counting the run as failed");
                TestOutcome::Failed
            }
        })
    }

    /// Module set for analysis/reporting: the single filtered suite when
    /// one is configured, otherwise every scanned module.
    fn target_modules(&self, modules: &[ModuleName]) -> Vec<ModuleName> {
        match self.config.suite.as_deref() {
            Some(suite) => modules
                .iter()
                .filter(|m| m.as_str() == suite)
                .cloned()
                .collect(),
            None => modules.to_vec(),
        }
    }
}
