//! Command handlers - extracted from main.rs for testability
//!
//! Each handler module contains:
//! - The execution logic for a CLI command
//! - Pure helper functions
//! - Comprehensive tests

pub mod clean;

// Re-export handlers for convenient access
pub use clean::execute_clean;
pub use test::{apply_overrides, execute_test, load_project_config, TestSummary};
