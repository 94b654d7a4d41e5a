//! Hardening that applies to every request.

use std::sync::Arc;

use envlayer_config::{ConfigError, Env};
use serde_json::json;

use crate::host::hooks::{MUPLUGINS_LOADED, THE_GENERATOR};
use crate::host::{DEFAULT_PRIORITY, Host, constant_filter};
use crate::layer::Layer;

pub struct SecurityLayer;

impl Layer for SecurityLayer {
    fn name(&self) -> &'static str {
        "security"
    }

    fn trigger(&self) -> Option<&'static str> {
        Some(MUPLUGINS_LOADED)
    }

    fn is_active(&self, _env: &Env, _host: &dyn Host) -> Result<bool, ConfigError> {
        Ok(true)
    }

    fn apply(&self, _env: &Arc<Env>, host: &mut dyn Host) -> Result<(), ConfigError> {
        // Hides the exact host version from the generator meta tag.
        host.add_filter(THE_GENERATOR, DEFAULT_PRIORITY, constant_filter(json!("")));
        Ok(())
    }
}
