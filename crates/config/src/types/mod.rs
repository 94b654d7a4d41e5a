//! Structured configuration values.
//!
//! Responsibilities:
//! - Define `ResourceUrl`, the parsed form of connection-string variables.
//! - Define `RequestContext`, the request facts the proxy resolver adjusts.
//!
//! Does NOT handle:
//! - Reading variables from the environment (see `loader` module).
//! - Deciding whether forwarded headers are trusted (see `proxy` module).
//!
//! Invariants:
//! - Passwords are held in `secrecy::SecretString` and redacted when serialized.

mod request;
mod resource_url;

pub use request::RequestContext;
pub use resource_url::ResourceUrl;
