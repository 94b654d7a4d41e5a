//! CLI command implementations.

pub mod env;
pub mod plan;
pub mod url;
