//! Cubridor CLI library
//!
//! Command-line interface for the Cubrir test/coverage harness.

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
pub mod handlers;

pub use commands::{Cli, Commands, OutputFormat, TestArgs};
pub use config::{verbosity_of, Verbosity};
pub use error::{CliError, CliResult};
