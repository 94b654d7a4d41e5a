//! Layer payloads shipped with envlayer.
//!
//! Each module translates one group of environment variables into host
//! calls. `default_layers` returns them in the order a standard deployment
//! needs: error tracking first so later failures are reported, constants
//! before anything that reads them, roles after multisite.

mod admin;
mod constants;
mod debug;
mod features;
mod mail;
mod multisite;
mod roles;
mod security;
mod sentry;
mod tracking;

use std::sync::Arc;

pub use admin::AdminLayer;
pub use constants::{ConstantsLayer, is_secret_constant};
pub use debug::DebugLayer;
pub use features::FeatureLayer;
pub use mail::{MAILER_FROM_FILTER_PRIORITY, MailLayer};
pub use multisite::MultisiteLayer;
pub use roles::RolesLayer;
pub use security::SecurityLayer;
pub use sentry::SentryLayer;
pub use tracking::TrackingLayer;

use crate::bootstrap::InstancePaths;
use crate::layer::Layer;

/// The default composition for an instance.
pub fn default_layers(paths: &InstancePaths) -> Vec<Arc<dyn Layer>> {
    vec![
        Arc::new(SentryLayer::new()),
        Arc::new(ConstantsLayer::new(paths)),
        Arc::new(MultisiteLayer::new(paths)),
        Arc::new(DebugLayer),
        Arc::new(SecurityLayer),
        Arc::new(MailLayer),
        Arc::new(FeatureLayer),
        Arc::new(TrackingLayer),
        Arc::new(RolesLayer),
        Arc::new(AdminLayer),
    ]
}

/// Escapes text for use in HTML content and attribute values.
pub(crate) fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
pub(crate) mod test_support {
    use envlayer_config::{Env, MapSource};
    use std::sync::Arc;

    /// An accessor over exactly `vars`, isolated from the process environment.
    pub fn env_from(vars: &[(&str, &str)]) -> Arc<Env> {
        let source: MapSource = vars.iter().copied().collect();
        Arc::new(Env::new(source, MapSource::new()))
    }
}
