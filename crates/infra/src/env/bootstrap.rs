//! `.env` bootstrap
//!
//! Loads variables from a `.env` file into the process environment before
//! the ambient source is constructed. Variables already present in the
//! process environment are never overridden. A missing file is not an
//! error; a file that exists but cannot be parsed is.

use std::path::{Path, PathBuf};

use envarc_domain::{EnvError, Result};

/// Load `.env` from the current directory hierarchy
///
/// Returns the path of the loaded file, or `None` when no file was found.
///
/// # Errors
/// Returns `EnvError::Bootstrap` when a file exists but cannot be parsed.
pub fn load_dotenv() -> Result<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::info!(path = %path.display(), "loaded .env file");
            Ok(Some(path))
        }
        Err(err) if err.not_found() => {
            tracing::debug!("no .env file found");
            Ok(None)
        }
        Err(err) => Err(EnvError::bootstrap(format!("failed to load .env file: {err}"))),
    }
}

/// Load variables from a specific `.env` file
///
/// # Errors
/// Returns `EnvError::Bootstrap` when the file is missing or cannot be
/// parsed; unlike [`load_dotenv`], an explicit path is expected to exist.
pub fn load_dotenv_from(path: &Path) -> Result<PathBuf> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "loaded .env file");
            Ok(path.to_path_buf())
        }
        Err(err) => Err(EnvError::bootstrap(format!(
            "failed to load .env file {}: {err}",
            path.display()
        ))),
    }
}
