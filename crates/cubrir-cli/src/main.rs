//! Cubridor: command-line interface for Cubrir
//!
//! ## Usage
//!
//! ```bash
//! cubridor test                      # Compile and run all tests
//! cubridor test --suite foo_tests    # Run a single suite
//! cubridor test --cover              # Collect coverage and write HTML
//! cubridor clean                     # Remove the output directory
//! ```

use clap::Parser;
use cubridor::{handlers, verbosity_of, Cli, CliResult, Commands, Verbosity};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbosity = verbosity_of(&cli);
    init_tracing(verbosity);

    match run(cli, verbosity) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, verbosity: Verbosity) -> CliResult<()> {
    match cli.command {
        Commands::Test(args) => handlers::execute_test(&cli.config, &args, verbosity),
        Commands::Clean => handlers::execute_clean(&cli.config, verbosity),
    }
}

fn init_tracing(verbosity: Verbosity) {
    use tracing_subscriber::EnvFilter;

    // RUST_LOG, when set, wins over the flag-derived level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
