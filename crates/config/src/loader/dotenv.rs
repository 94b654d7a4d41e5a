//! `.env` file loading.
//!
//! Invariants:
//! - A missing `.env` file is silently ignored.
//! - Variables already present in the process environment are never overridden.
//! - Error messages never include raw .env line contents.

use std::path::Path;

use super::error::ConfigError;
use crate::constants::{DOTENV_DISABLED, DOTENV_FILE_NAME};

/// Check if dotenv loading is disabled via environment variable.
pub fn dotenv_disabled() -> bool {
    matches!(
        std::env::var(DOTENV_DISABLED).ok().as_deref(),
        Some("true") | Some("1")
    )
}

/// Load environment variables from `<dir>/.env` if present.
///
/// If `DOTENV_DISABLED` is set to "true" or "1", nothing is loaded.
///
/// # Errors
///
/// Returns an error if:
/// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
/// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
pub fn load_dotenv(dir: &Path) -> Result<(), ConfigError> {
    if dotenv_disabled() {
        tracing::debug!("dotenv loading disabled");
        return Ok(());
    }

    let path = dir.join(DOTENV_FILE_NAME);
    match dotenvy::from_path(&path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "loaded dotenv file");
            Ok(())
        }
        Err(e) if is_not_found(&e) => {
            tracing::debug!(path = %path.display(), "no dotenv file, skipping");
            Ok(())
        }
        Err(dotenvy::Error::LineParse(_, idx)) => {
            Err(ConfigError::DotenvParse { error_index: idx })
        }
        Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
            kind: io_err.kind(),
        }),
        Err(_) => Err(ConfigError::DotenvUnknown),
    }
}

/// Check if a dotenv error indicates the file was not found.
fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}
