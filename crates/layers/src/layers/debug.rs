//! Debug-mode helpers for administrators.

use std::sync::Arc;

use envlayer_config::constants::WP_DEBUG;
use envlayer_config::{ConfigError, Env};
use serde_json::Value;

use super::escape_html;
use crate::host::hooks::{ADMIN_NOTICES, MUPLUGINS_LOADED};
use crate::host::{DEFAULT_PRIORITY, Host};
use crate::layer::Layer;

pub struct DebugLayer;

impl Layer for DebugLayer {
    fn name(&self) -> &'static str {
        "debug"
    }

    fn trigger(&self) -> Option<&'static str> {
        Some(MUPLUGINS_LOADED)
    }

    fn is_active(&self, _env: &Env, host: &dyn Host) -> Result<bool, ConfigError> {
        Ok(host.constant(WP_DEBUG) == Some(Value::Bool(true)))
    }

    fn apply(&self, _env: &Arc<Env>, host: &mut dyn Host) -> Result<(), ConfigError> {
        if !host.is_admin() {
            return Ok(());
        }
        host.add_action(
            ADMIN_NOTICES,
            DEFAULT_PRIORITY,
            Box::new(|host: &mut dyn Host, _: &[Value]| {
                if let Some(error) = host.last_error() {
                    host.output(&format!(
                        "<div class=\"notice notice-warning is-dismissible\">\
                         <p><strong>An unhandled error occurred</strong></p>\
                         <p>{}</p><p><code>{}:{}</code></p></div>",
                        escape_html(&error.message),
                        escape_html(&error.file),
                        error.line,
                    ));
                }
                Ok(())
            }),
        );
        Ok(())
    }
}
