//! Collaborator interfaces: compiler, test runner, coverage engine.
//!
//! The harness only sequences these; the heavy lifting happens in external
//! tools reached through `std::process::Command`. Tests substitute
//! in-memory implementations.
//!
//! The runner adapter returns an explicit `CubrirResult<TestOutcome>`
//! rather than panicking or unwinding: a runner error is a distinct value
//! the harness can convert into a failed outcome.

use crate::artifact::{ArtifactRef, ModuleName};
use crate::result::{CubrirError, CubrirResult};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Outcome of a test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOutcome {
    /// Every executed test passed
    Passed,
    /// At least one test failed, or the runner itself errored
    Failed,
}

impl TestOutcome {
    /// Check for a passing run
    #[must_use]
    pub const fn is_passed(self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Compiles source files into object artifacts in a target directory.
pub trait Compiler {
    /// Compile `sources` into `out_dir` with the given options.
    ///
    /// # Errors
    ///
    /// Returns `CubrirError::Compile` on any compiler failure; the harness
    /// treats this as fatal.
    fn compile(&self, sources: &[PathBuf], out_dir: &Path, opts: &[String]) -> CubrirResult<()>;
}

/// Executes unit tests for a module set or a single named suite.
pub trait TestRunner {
    /// Run tests for every module in the list.
    fn run_modules(&self, modules: &[ModuleName], opts: &[String]) -> CubrirResult<TestOutcome>;

    /// Run only the named suite.
    fn run_suite(&self, suite: &str, opts: &[String]) -> CubrirResult<TestOutcome>;
}

/// Resets, instruments, analyzes, and reports per-module coverage.
pub trait CoverageEngine {
    /// Discard any coverage state from previous runs.
    fn reset(&mut self) -> CubrirResult<()>;

    /// Prepare a compiled artifact so line execution is recorded.
    fn instrument(&mut self, artifact: &ArtifactRef) -> CubrirResult<()>;

    /// Covered/uncovered line counts for an instrumented module.
    fn analyze(&self, module: &ModuleName) -> CubrirResult<(u64, u64)>;

    /// Write the per-module detail report to `path`.
    fn render_detail(&self, module: &ModuleName, path: &Path) -> CubrirResult<()>;
}

fn run_command(mut cmd: Command, what: &str) -> CubrirResult<std::process::Output> {
    cmd.output()
        .map_err(|e| CubrirError::runner(format!("failed to spawn {what}: {e}")))
}

/// Compiler adapter that shells out to an external compiler command.
///
/// Invocation shape: `<compiler> <opts..> -o <out_dir> <sources..>`.
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    program: String,
}

impl CommandCompiler {
    /// Create an adapter for the given compiler command
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Compiler for CommandCompiler {
    fn compile(&self, sources: &[PathBuf], out_dir: &Path, opts: &[String]) -> CubrirResult<()> {
        if sources.is_empty() {
            return Ok(());
        }
        let mut cmd = Command::new(&self.program);
        cmd.args(opts).arg("-o").arg(out_dir).args(sources);

        let output = cmd
            .output()
            .map_err(|e| CubrirError::compile(format!("failed to spawn {}: {e}", self.program)))?;
        if output.status.success() {
            Ok(())
        } else {
            Err(CubrirError::compile(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ))
        }
    }
}

/// Test-runner adapter that shells out to an external runner command.
///
/// Invocation shape: `<runner> <opts..> --module <m>..` or
/// `<runner> <opts..> --suite <name>`. A non-zero exit is a failed run;
/// a spawn error is a runner error for the harness to convert.
#[derive(Debug, Clone)]
pub struct CommandTestRunner {
    program: String,
}

impl CommandTestRunner {
    /// Create an adapter for the given runner command
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn outcome_of(output: &std::process::Output) -> TestOutcome {
        if output.status.success() {
            TestOutcome::Passed
        } else {
            TestOutcome::Failed
        }
    }
}

impl TestRunner for CommandTestRunner {
    fn run_modules(&self, modules: &[ModuleName], opts: &[String]) -> CubrirResult<TestOutcome> {
        let mut cmd = Command::new(&self.program);
        cmd.args(opts);
        for module in modules {
            cmd.arg("--module").arg(module.as_str());
        }
        let output = run_command(cmd, &self.program)?;
        Ok(Self::outcome_of(&output))
    }

    fn run_suite(&self, suite: &str, opts: &[String]) -> CubrirResult<TestOutcome> {
        let mut cmd = Command::new(&self.program);
        cmd.args(opts).arg("--suite").arg(suite);
        let output = run_command(cmd, &self.program)?;
        Ok(Self::outcome_of(&output))
    }
}

/// Coverage-engine adapter driving an external coverage tool.
///
/// Subcommand shape: `reset`, `instrument <artifact>`,
/// `analyze <module>` (prints `<covered> <uncovered>` on stdout), and
/// `detail <module> <path>`.
#[derive(Debug, Clone)]
pub struct CommandCoverageEngine {
    program: String,
}

impl CommandCoverageEngine {
    /// Create an adapter for the given coverage command
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[&str]) -> CubrirResult<std::process::Output> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        let output = run_command(cmd, &self.program)?;
        if output.status.success() {
            Ok(output)
        } else {
            Err(CubrirError::runner(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ))
        }
    }
}

impl CoverageEngine for CommandCoverageEngine {
    fn reset(&mut self) -> CubrirResult<()> {
        self.run(&["reset"]).map(|_| ())
    }

    fn instrument(&mut self, artifact: &ArtifactRef) -> CubrirResult<()> {
        let path = artifact.path().to_string_lossy();
        self.run(&["instrument", &path])
            .map(|_| ())
            .map_err(|e| CubrirError::Instrument {
                module: artifact.module_name().to_string(),
                message: e.to_string(),
            })
    }

    fn analyze(&self, module: &ModuleName) -> CubrirResult<(u64, u64)> {
        let output = self.run(&["analyze", module.as_str()])?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_analysis(stdout.trim()).ok_or_else(|| CubrirError::Analyze {
            module: module.to_string(),
            message: format!("unparseable analysis output: {stdout:?}"),
        })
    }

    fn render_detail(&self, module: &ModuleName, path: &Path) -> CubrirResult<()> {
        let out = path.to_string_lossy();
        self.run(&["detail", module.as_str(), &out]).map(|_| ())
    }
}

fn parse_analysis(line: &str) -> Option<(u64, u64)> {
    let mut parts = line.split_whitespace();
    let covered = parts.next()?.parse().ok()?;
    let uncovered = parts.next()?.parse().ok()?;
    Some((covered, uncovered))
}
