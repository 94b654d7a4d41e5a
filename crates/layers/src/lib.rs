//! Layered, environment-driven configuration of a CMS instance.
//!
//! This crate provides the `Layer` contract, the orchestrator that applies or
//! defers layers against the host's extension system, the bootstrap entry
//! point, and the layer payloads shipped by default.

mod bootstrap;
pub mod host;
mod layer;
pub mod layers;
mod orchestrator;

pub use bootstrap::{EnvLayer, InstancePaths, Layout};
pub use host::{Host, SimulatedHost};
pub use layer::Layer;
pub use orchestrator::{Orchestrator, apply_if_active};
