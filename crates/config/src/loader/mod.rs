//! Environment loading and typed access.
//!
//! Responsibilities:
//! - Load `.env` files into the process environment.
//! - Coerce raw environment strings into typed `EnvValue`s.
//! - Provide the `Env` accessor with fail-fast typed getters.
//!
//! Does NOT handle:
//! - Deciding which layer reads which variable (see `envlayer-layers`).
//! - Request facts and proxy trust (see `proxy.rs`).
//!
//! Invariants / Assumptions:
//! - The process environment is consulted before the fallback source.
//! - `load_dotenv()` never overrides variables that are already set.
//! - The `DOTENV_DISABLED` variable is checked before any file is read.

mod dotenv;
mod env;
mod error;
mod value;

#[cfg(test)]
mod tests;

pub use dotenv::{dotenv_disabled, load_dotenv};
pub use env::{Env, EnvSource, MapSource, ProcessEnv};
pub use error::ConfigError;
pub use value::{EnvValue, coerce};
