//! Environment-driven configuration primitives for envlayer.
//!
//! This crate provides the typed environment accessor, the resource URL
//! parser, the `.env` loader and the trusted-proxy request resolver that the
//! layer orchestrator builds on.

pub mod constants;
mod loader;
pub mod proxy;
pub mod types;

pub use loader::{
    ConfigError, Env, EnvSource, EnvValue, MapSource, ProcessEnv, coerce, dotenv_disabled,
    load_dotenv,
};
pub use proxy::resolve_proxy_facts;
pub use types::{RequestContext, ResourceUrl};
