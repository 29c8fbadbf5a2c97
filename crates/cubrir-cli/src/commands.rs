//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Cubridor: CLI for Cubrir - unit-test execution with HTML code coverage
#[derive(Parser, Debug)]
#[command(name = "cubridor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the project configuration file
    #[arg(short, long, default_value = "cubrir.toml", global = true)]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile and run tests, optionally with coverage
    Test(TestArgs),

    /// Remove the output directory
    Clean,
}

/// Arguments for the test command
#[derive(Parser, Debug)]
pub struct TestArgs {
    /// Run only the named suite
    #[arg(short, long)]
    pub suite: Option<String>,

    /// Enable coverage instrumentation and HTML report generation
    #[arg(long)]
    pub cover: bool,

    /// Override the output directory
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Summary output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Summary output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}
