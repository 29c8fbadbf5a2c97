//! Scoped mutation of the process search path and working directory.
//!
//! The harness runs tests from inside the output directory with that
//! directory prefixed onto the search path. Both values are process-wide,
//! so the mutation is held in an RAII guard whose `Drop` restores the
//! snapshot on every exit path, panics included.

use crate::result::CubrirResult;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Default search-path variable mutated around test execution
pub const DEFAULT_SEARCH_PATH_VAR: &str = "CUBRIR_PATH";

/// RAII guard over the search-path variable and the working directory.
#[derive(Debug)]
pub struct EnvGuard {
    var: String,
    saved_search_path: Option<OsString>,
    saved_cwd: PathBuf,
}

impl EnvGuard {
    /// Snapshot the environment, then prefix `out_dir` onto the named
    /// search-path variable and change the working directory to `out_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be read or the
    /// change into `out_dir` fails; nothing is mutated in that case.
    pub fn acquire(out_dir: &Path, var: &str) -> CubrirResult<Self> {
        let saved_cwd = env::current_dir()?;
        let saved_search_path = env::var_os(var);

        env::set_current_dir(out_dir)?;
        env::set_var(var, prefixed(out_dir, saved_search_path.as_deref()));

        Ok(Self {
            var: var.to_string(),
            saved_search_path,
            saved_cwd,
        })
    }
}

fn prefixed(out_dir: &Path, existing: Option<&std::ffi::OsStr>) -> OsString {
    let mut paths = vec![out_dir.to_path_buf()];
    if let Some(existing) = existing {
        paths.extend(env::split_paths(existing));
    }
    // join_paths only fails on entries containing the separator; the
    // snapshot came from split_paths, so fall back to the bare out_dir
    env::join_paths(paths).unwrap_or_else(|_| out_dir.as_os_str().to_os_string())
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.saved_search_path.take() {
            Some(value) => env::set_var(&self.var, value),
            None => env::remove_var(&self.var),
        }
        // Best effort: the saved directory may have been deleted meanwhile
        let _ = env::set_current_dir(&self.saved_cwd);
    }
}

/// Serializes tests that mutate the process working directory.
#[cfg(test)]
pub(crate) fn cwd_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
