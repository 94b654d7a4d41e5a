//! Ordered application of layers.
//!
//! Responsibilities:
//! - Walk the layer list in composition order.
//! - Apply immediate layers synchronously.
//! - Register deferred layers with the host scheduler at default priority.
//!
//! Does NOT handle:
//! - Firing triggers; the host decides when a deferred layer runs.
//! - Recovering from layer failures.
//!
//! Invariants:
//! - `apply` never runs when `is_active` returned false at the same point.
//! - The first failing immediate layer aborts the remaining layers.
//! - Each deferred layer registers exactly one callback.

use std::sync::Arc;

use envlayer_config::{ConfigError, Env};
use serde_json::Value;
use tracing::debug;

use crate::host::{DEFAULT_PRIORITY, Host};
use crate::layer::Layer;

/// The fixed, ordered set of layers for one deployment.
pub struct Orchestrator {
    layers: Vec<Arc<dyn Layer>>,
}

impl Orchestrator {
    pub fn new(layers: Vec<Arc<dyn Layer>>) -> Self {
        Self { layers }
    }

    pub fn layers(&self) -> &[Arc<dyn Layer>] {
        &self.layers
    }

    /// Applies or schedules every layer in order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by an immediate layer. Errors raised by
    /// deferred layers surface from the host when their trigger fires.
    pub fn bootstrap(&self, env: Arc<Env>, host: &mut dyn Host) -> Result<(), ConfigError> {
        for layer in &self.layers {
            match layer.trigger() {
                None => {
                    apply_if_active(layer.as_ref(), &env, host)?;
                }
                Some(trigger) => {
                    debug!(layer = layer.name(), trigger, "scheduled layer");
                    let layer = Arc::clone(layer);
                    let env = Arc::clone(&env);
                    host.add_action(
                        trigger,
                        DEFAULT_PRIORITY,
                        Box::new(move |host: &mut dyn Host, _: &[Value]| {
                            apply_if_active(layer.as_ref(), &env, host).map(|_| ())
                        }),
                    );
                }
            }
        }
        Ok(())
    }
}

/// Applies `layer` when it is active right now. Returns whether it applied.
pub fn apply_if_active(
    layer: &dyn Layer,
    env: &Arc<Env>,
    host: &mut dyn Host,
) -> Result<bool, ConfigError> {
    if !layer.is_active(env, &*host)? {
        debug!(layer = layer.name(), "skipped inactive layer");
        return Ok(false);
    }
    layer.apply(env, host)?;
    debug!(layer = layer.name(), "applied layer");
    Ok(true)
}
