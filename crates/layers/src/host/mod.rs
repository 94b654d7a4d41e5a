//! Capabilities the host application exposes to layers.
//!
//! Responsibilities:
//! - Define the scheduling surface (actions, filters) layers register against.
//! - Define the host state layers read and mutate (constants, options, roles,
//!   request/runtime facts).
//! - Provide an in-memory implementation for previews and tests.
//!
//! Does NOT handle:
//! - Deciding when callbacks fire; that belongs to the host.
//!
//! Invariants:
//! - Callbacks with equal priority run in registration order.
//! - Lower priorities run first.

pub mod hooks;
mod simulated;

use envlayer_config::ConfigError;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub use simulated::{HookSummary, RemovedCallback, SimulatedHost};

/// Priority used when a caller has no ordering preference.
pub const DEFAULT_PRIORITY: i32 = 10;

/// A callback run when an action fires. Receives the action arguments.
pub type ActionCallback = Box<dyn FnMut(&mut dyn Host, &[Value]) -> Result<(), ConfigError>>;

/// A callback that transforms a filtered value. Receives the extra arguments.
pub type FilterCallback =
    Box<dyn Fn(&dyn Host, Value, &[Value]) -> Result<Value, ConfigError>>;

/// Returns a filter that ignores its input and yields `value`.
pub fn constant_filter(value: Value) -> FilterCallback {
    Box::new(move |_, _, _| Ok(value.clone()))
}

/// Registration surface of the host's extension system.
pub trait Scheduler {
    /// Registers `callback` on `hook`. Lower priorities run first; ties run
    /// in registration order. A callback added while `hook` is firing runs
    /// in that same pass only if its priority is later than the running one.
    fn add_action(&mut self, hook: &str, priority: i32, callback: ActionCallback);

    fn add_filter(&mut self, hook: &str, priority: i32, filter: FilterCallback);

    /// Removes a callback the host registered itself under `name`.
    fn remove_callback(&mut self, hook: &str, name: &str, priority: i32);
}

/// Process-wide named constants. The first definition wins.
pub trait Constants {
    /// Defines `name`, returning false when it was already defined.
    fn define(&mut self, name: &str, value: Value) -> bool;

    fn constant(&self, name: &str) -> Option<Value>;

    fn is_defined(&self, name: &str) -> bool {
        self.constant(name).is_some()
    }
}

/// Key-value option store scoped to the current site.
pub trait OptionStore {
    fn option(&self, name: &str) -> Option<String>;

    fn update_option(&mut self, name: &str, value: &str, autoload: bool);
}

/// A user role and its capability grants (`true`) and denials (`false`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    pub name: String,
    pub display_name: String,
    pub capabilities: BTreeMap<String, bool>,
}

/// Role and capability storage scoped to the current site.
pub trait RoleStore {
    fn role(&self, name: &str) -> Option<Role>;

    fn add_role(&mut self, name: &str, display_name: &str, capabilities: BTreeMap<String, bool>);

    fn add_cap(&mut self, role: &str, cap: &str, grant: bool);

    fn remove_cap(&mut self, role: &str, cap: &str);
}

/// The last unhandled error the host recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastError {
    pub message: String,
    pub file: String,
    pub line: u32,
}

/// Facts about the running request and side channels into the host runtime.
pub trait Runtime {
    fn is_admin(&self) -> bool;

    fn is_multisite(&self) -> bool;

    fn is_user_logged_in(&self) -> bool;

    /// Host application version, for display.
    fn version(&self) -> String;

    fn environment_type(&self) -> String;

    fn site_url(&self) -> String;

    fn site_ids(&self, limit: usize) -> Vec<u64>;

    fn switch_to_site(&mut self, site_id: u64);

    fn restore_current_site(&mut self);

    fn last_error(&self) -> Option<LastError>;

    /// Writes an HTML fragment to the response.
    fn output(&mut self, html: &str);

    fn log_error(&mut self, message: &str);

    /// Removes an element of the admin interface, e.g. `menu:edit-comments.php`.
    fn remove_admin_ui(&mut self, element: &str);

    fn add_admin_bar_node(&mut self, node: Value);

    fn init_error_tracking(&mut self, options: &Value);

    fn capture_message(&mut self, message: &str);
}

/// Everything a layer may touch.
pub trait Host: Scheduler + Constants + OptionStore + RoleStore + Runtime {}

impl<T: Scheduler + Constants + OptionStore + RoleStore + Runtime> Host for T {}
