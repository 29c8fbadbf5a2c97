//! Handler for the `clean` command.

use crate::config::Verbosity;
use crate::error::CliResult;
use crate::handlers::test::load_project_config;
use std::path::Path;

/// Execute the `clean` command: remove the output directory.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the
/// directory cannot be removed. A directory that is already gone is
/// success.
pub fn execute_clean(config_path: &Path, verbosity: Verbosity) -> CliResult<()> {
    let config = load_project_config(config_path)?;
    match std::fs::remove_dir_all(&config.out_dir) {
        Ok(()) => {
            if !verbosity.is_quiet() {
                println!("Removed {}", config.out_dir.display());
            }
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
