//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for every configuration failure a bootstrap can hit.
//!
//! Invariants:
//! - All error variants include context for debugging (variable names, schemes).
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.
//! - Values of variables are never echoed back, only their names.

use std::io::ErrorKind;
use thiserror::Error;

/// Errors that can occur while loading or consuming configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// The coerced value of a variable is not of the type the caller needs.
    #[error("Env var {var} is expected to contain {expected}")]
    UnexpectedType { var: String, expected: &'static str },

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Unsupported scheme '{scheme}' in {var}")]
    UnsupportedScheme { var: String, scheme: String },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    ///
    /// SAFETY: This error does not include any raw dotenv content.
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

impl ConfigError {
    pub(crate) fn unexpected_type(var: &str, expected: &'static str) -> Self {
        ConfigError::UnexpectedType {
            var: var.to_string(),
            expected,
        }
    }

    /// Returns true for errors raised while reading the `.env` file.
    pub fn is_dotenv(&self) -> bool {
        matches!(
            self,
            ConfigError::DotenvParse { .. } | ConfigError::DotenvIo { .. } | ConfigError::DotenvUnknown
        )
    }
}
