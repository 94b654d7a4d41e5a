//! The unit of configuration the orchestrator composes.

use std::sync::Arc;

use envlayer_config::{ConfigError, Env};

use crate::host::Host;

/// A self-contained configuration concern.
///
/// A layer either applies during orchestration or, when it names a
/// [`trigger`](Layer::trigger), once the host reaches that execution point.
/// Activation is evaluated at the moment the layer would run, never earlier.
pub trait Layer: Send + Sync {
    /// Stable name used in logs and plans.
    fn name(&self) -> &'static str;

    /// Host execution point to defer to, or `None` to apply immediately.
    fn trigger(&self) -> Option<&'static str> {
        None
    }

    /// Whether the layer applies to the current request.
    ///
    /// Reading a mistyped variable is an error, not an inactive layer.
    fn is_active(&self, env: &Env, host: &dyn Host) -> Result<bool, ConfigError>;

    /// Performs the layer's side effects against `host`.
    ///
    /// Not required to be idempotent. Callbacks registered here may keep a
    /// clone of `env`.
    fn apply(&self, env: &Arc<Env>, host: &mut dyn Host) -> Result<(), ConfigError>;
}
