//! In-memory host used to preview a bootstrap and to test layers.
//!
//! The simulated host keeps every registered callback, fires them on demand
//! and records every side effect a layer produces so it can be inspected.

use envlayer_config::ConfigError;
use envlayer_config::constants::{DEFAULT_ENVIRONMENT_TYPE, WP_ENVIRONMENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use super::hooks::{
    ADMIN_BAR_MENU, ADMIN_FOOTER_TEXT, ADMIN_INIT, ADMIN_NOTICES, LIFECYCLE, WP_BODY_OPEN, WP_HEAD,
};
use super::{
    ActionCallback, Constants, FilterCallback, LastError, OptionStore, Role, RoleStore, Runtime,
    Scheduler,
};

/// Site that is current before any switch.
const MAIN_SITE_ID: u64 = 1;

struct Registered<C> {
    priority: i32,
    callback: C,
}

/// Inserts after every entry with priority lower than or equal to `entry`'s.
fn insert_by_priority<C>(list: &mut Vec<Registered<C>>, entry: Registered<C>) {
    let pos = list
        .iter()
        .position(|r| r.priority > entry.priority)
        .unwrap_or(list.len());
    list.insert(pos, entry);
}

#[derive(Debug, Clone)]
struct StoredOption {
    value: String,
    autoload: bool,
}

#[derive(Debug, Clone, Default)]
struct SiteState {
    options: BTreeMap<String, StoredOption>,
    roles: BTreeMap<String, Role>,
}

/// One registered callback, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookSummary {
    pub hook: String,
    pub kind: &'static str,
    pub priority: i32,
}

/// A host callback removed by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovedCallback {
    pub hook: String,
    pub name: String,
    pub priority: i32,
}

pub struct SimulatedHost {
    actions: BTreeMap<String, Vec<Registered<ActionCallback>>>,
    filters: BTreeMap<String, Vec<Registered<FilterCallback>>>,
    removed: Vec<RemovedCallback>,
    constants: Vec<(String, Value)>,
    sites: BTreeMap<u64, SiteState>,
    current_site: u64,
    site_stack: Vec<u64>,
    admin: bool,
    multisite: bool,
    logged_in: bool,
    version: String,
    site_url: String,
    last_error: Option<LastError>,
    output: Vec<String>,
    error_log: Vec<String>,
    captured_messages: Vec<String>,
    error_tracking: Option<Value>,
    admin_bar: Vec<Value>,
    removed_admin_ui: Vec<String>,
    fired: Vec<String>,
    option_writes: usize,
    role_writes: usize,
}

impl fmt::Debug for SimulatedHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedHost")
            .field("admin", &self.admin)
            .field("multisite", &self.multisite)
            .field("current_site", &self.current_site)
            .field("constants", &self.constants.len())
            .finish_non_exhaustive()
    }
}

impl Default for SimulatedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedHost {
    /// A single-site, front-end, anonymous request.
    pub fn new() -> Self {
        let mut sites = BTreeMap::new();
        sites.insert(MAIN_SITE_ID, SiteState::default());
        Self {
            actions: BTreeMap::new(),
            filters: BTreeMap::new(),
            removed: Vec::new(),
            constants: Vec::new(),
            sites,
            current_site: MAIN_SITE_ID,
            site_stack: Vec::new(),
            admin: false,
            multisite: false,
            logged_in: false,
            version: "6.5".to_string(),
            site_url: String::new(),
            last_error: None,
            output: Vec::new(),
            error_log: Vec::new(),
            captured_messages: Vec::new(),
            error_tracking: None,
            admin_bar: Vec::new(),
            removed_admin_ui: Vec::new(),
            fired: Vec::new(),
            option_writes: 0,
            role_writes: 0,
        }
    }

    pub fn with_admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }

    pub fn with_logged_in(mut self, logged_in: bool) -> Self {
        self.logged_in = logged_in;
        self
    }

    /// Turns the host into a network of `site_ids` (the main site is always present).
    pub fn with_multisite(mut self, site_ids: impl IntoIterator<Item = u64>) -> Self {
        self.multisite = true;
        for id in site_ids {
            self.sites.entry(id).or_default();
        }
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = site_url.into();
        self
    }

    pub fn with_last_error(mut self, error: LastError) -> Self {
        self.last_error = Some(error);
        self
    }

    /// Seeds a role on the main site without counting it as a layer write.
    pub fn with_role(mut self, role: Role) -> Self {
        self.site_mut(MAIN_SITE_ID)
            .roles
            .insert(role.name.clone(), role);
        self
    }

    pub fn with_constant(mut self, name: &str, value: Value) -> Self {
        self.define(name, value);
        self
    }

    fn site_mut(&mut self, id: u64) -> &mut SiteState {
        self.sites.entry(id).or_default()
    }

    fn current(&self) -> Option<&SiteState> {
        self.sites.get(&self.current_site)
    }

    /// Runs every callback registered for `hook`, in priority order.
    ///
    /// Callbacks added to `hook` while it fires run in the same pass when
    /// their priority is later than the running callback's; the others wait
    /// for the next run. The first failing callback stops the run and its
    /// error is returned.
    pub fn do_action(&mut self, hook: &str, args: &[Value]) -> Result<(), ConfigError> {
        self.fired.push(hook.to_string());
        let mut callbacks = self.actions.remove(hook).unwrap_or_default();
        let mut deferred = Vec::new();

        let mut result = Ok(());
        let mut i = 0;
        while i < callbacks.len() {
            let running = callbacks[i].priority;
            let outcome = (callbacks[i].callback)(&mut *self, args);

            for entry in self.actions.remove(hook).unwrap_or_default() {
                if entry.priority > running {
                    insert_by_priority(&mut callbacks, entry);
                } else {
                    deferred.push(entry);
                }
            }
            if let Err(e) = outcome {
                result = Err(e);
                break;
            }
            i += 1;
        }

        for entry in deferred {
            insert_by_priority(&mut callbacks, entry);
        }
        self.actions.insert(hook.to_string(), callbacks);
        result
    }

    /// Passes `value` through every filter registered for `hook`.
    pub fn apply_filters(
        &self,
        hook: &str,
        value: Value,
        args: &[Value],
    ) -> Result<Value, ConfigError> {
        let Some(filters) = self.filters.get(hook) else {
            return Ok(value);
        };
        filters
            .iter()
            .try_fold(value, |value, entry| (entry.callback)(self, value, args))
    }

    /// Fires the lifecycle points a request passes through, in host order.
    pub fn boot(&mut self) -> Result<(), ConfigError> {
        for hook in LIFECYCLE {
            self.do_action(hook, &[])?;
        }
        if self.admin {
            self.do_action(ADMIN_INIT, &[])?;
        }
        Ok(())
    }

    /// Fires the page-rendering points for the current request kind.
    pub fn render(&mut self) -> Result<(), ConfigError> {
        if self.admin {
            self.do_action(ADMIN_BAR_MENU, &[])?;
            self.do_action(ADMIN_NOTICES, &[])
        } else {
            self.do_action(WP_HEAD, &[])?;
            self.do_action(WP_BODY_OPEN, &[])
        }
    }

    /// The admin footer as rendered after filtering.
    pub fn footer_text(&self) -> Result<String, ConfigError> {
        let value = self.apply_filters(ADMIN_FOOTER_TEXT, Value::String(String::new()), &[])?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    pub fn hook_summaries(&self) -> Vec<HookSummary> {
        let actions = self.actions.iter().flat_map(|(hook, list)| {
            list.iter().map(move |r| HookSummary {
                hook: hook.clone(),
                kind: "action",
                priority: r.priority,
            })
        });
        let filters = self.filters.iter().flat_map(|(hook, list)| {
            list.iter().map(move |r| HookSummary {
                hook: hook.clone(),
                kind: "filter",
                priority: r.priority,
            })
        });
        actions.chain(filters).collect()
    }

    pub fn action_count(&self, hook: &str) -> usize {
        self.actions.get(hook).map_or(0, Vec::len)
    }

    pub fn filter_count(&self, hook: &str) -> usize {
        self.filters.get(hook).map_or(0, Vec::len)
    }

    pub fn constants(&self) -> &[(String, Value)] {
        &self.constants
    }

    pub fn removed_callbacks(&self) -> &[RemovedCallback] {
        &self.removed
    }

    pub fn was_removed(&self, hook: &str, name: &str) -> bool {
        self.removed.iter().any(|r| r.hook == hook && r.name == name)
    }

    pub fn output_fragments(&self) -> &[String] {
        &self.output
    }

    pub fn error_log(&self) -> &[String] {
        &self.error_log
    }

    pub fn captured_messages(&self) -> &[String] {
        &self.captured_messages
    }

    pub fn error_tracking(&self) -> Option<&Value> {
        self.error_tracking.as_ref()
    }

    pub fn admin_bar_nodes(&self) -> &[Value] {
        &self.admin_bar
    }

    pub fn removed_admin_ui(&self) -> &[String] {
        &self.removed_admin_ui
    }

    pub fn fired(&self) -> &[String] {
        &self.fired
    }

    /// Number of option writes across all sites.
    pub fn option_writes(&self) -> usize {
        self.option_writes
    }

    /// Number of role and capability mutations across all sites.
    pub fn role_writes(&self) -> usize {
        self.role_writes
    }

    pub fn site_option(&self, site_id: u64, name: &str) -> Option<&str> {
        self.sites
            .get(&site_id)
            .and_then(|s| s.options.get(name))
            .map(|o| o.value.as_str())
    }

    pub fn is_autoloaded(&self, site_id: u64, name: &str) -> bool {
        self.sites
            .get(&site_id)
            .and_then(|s| s.options.get(name))
            .is_some_and(|o| o.autoload)
    }

    pub fn site_role(&self, site_id: u64, name: &str) -> Option<&Role> {
        self.sites.get(&site_id).and_then(|s| s.roles.get(name))
    }
}

impl Scheduler for SimulatedHost {
    fn add_action(&mut self, hook: &str, priority: i32, callback: ActionCallback) {
        let list = self.actions.entry(hook.to_string()).or_default();
        insert_by_priority(list, Registered { priority, callback });
    }

    fn add_filter(&mut self, hook: &str, priority: i32, filter: FilterCallback) {
        let list = self.filters.entry(hook.to_string()).or_default();
        insert_by_priority(
            list,
            Registered {
                priority,
                callback: filter,
            },
        );
    }

    fn remove_callback(&mut self, hook: &str, name: &str, priority: i32) {
        self.removed.push(RemovedCallback {
            hook: hook.to_string(),
            name: name.to_string(),
            priority,
        });
    }
}

impl Constants for SimulatedHost {
    fn define(&mut self, name: &str, value: Value) -> bool {
        if self.is_defined(name) {
            return false;
        }
        self.constants.push((name.to_string(), value));
        true
    }

    fn constant(&self, name: &str) -> Option<Value> {
        self.constants
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }
}

impl OptionStore for SimulatedHost {
    fn option(&self, name: &str) -> Option<String> {
        self.current()
            .and_then(|s| s.options.get(name))
            .map(|o| o.value.clone())
    }

    fn update_option(&mut self, name: &str, value: &str, autoload: bool) {
        self.option_writes += 1;
        let site = self.current_site;
        self.site_mut(site).options.insert(
            name.to_string(),
            StoredOption {
                value: value.to_string(),
                autoload,
            },
        );
    }
}

impl RoleStore for SimulatedHost {
    fn role(&self, name: &str) -> Option<Role> {
        self.current().and_then(|s| s.roles.get(name)).cloned()
    }

    fn add_role(&mut self, name: &str, display_name: &str, capabilities: BTreeMap<String, bool>) {
        self.role_writes += 1;
        let site = self.current_site;
        self.site_mut(site)
            .roles
            .entry(name.to_string())
            .or_insert_with(|| Role {
                name: name.to_string(),
                display_name: display_name.to_string(),
                capabilities,
            });
    }

    fn add_cap(&mut self, role: &str, cap: &str, grant: bool) {
        self.role_writes += 1;
        let site = self.current_site;
        if let Some(role) = self.site_mut(site).roles.get_mut(role) {
            role.capabilities.insert(cap.to_string(), grant);
        }
    }

    fn remove_cap(&mut self, role: &str, cap: &str) {
        self.role_writes += 1;
        let site = self.current_site;
        if let Some(role) = self.site_mut(site).roles.get_mut(role) {
            role.capabilities.remove(cap);
        }
    }
}

impl Runtime for SimulatedHost {
    fn is_admin(&self) -> bool {
        self.admin
    }

    fn is_multisite(&self) -> bool {
        self.multisite
    }

    fn is_user_logged_in(&self) -> bool {
        self.logged_in
    }

    fn version(&self) -> String {
        self.version.clone()
    }

    fn environment_type(&self) -> String {
        self.constant(WP_ENVIRONMENT_TYPE)
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT_TYPE.to_string())
    }

    fn site_url(&self) -> String {
        self.site_url.clone()
    }

    fn site_ids(&self, limit: usize) -> Vec<u64> {
        if self.multisite {
            self.sites.keys().copied().take(limit).collect()
        } else {
            vec![self.current_site]
        }
    }

    fn switch_to_site(&mut self, site_id: u64) {
        self.site_stack.push(self.current_site);
        self.current_site = site_id;
        self.site_mut(site_id);
    }

    fn restore_current_site(&mut self) {
        if let Some(previous) = self.site_stack.pop() {
            self.current_site = previous;
        }
    }

    fn last_error(&self) -> Option<LastError> {
        self.last_error.clone()
    }

    fn output(&mut self, html: &str) {
        self.output.push(html.to_string());
    }

    fn log_error(&mut self, message: &str) {
        self.error_log.push(message.to_string());
    }

    fn remove_admin_ui(&mut self, element: &str) {
        self.removed_admin_ui.push(element.to_string());
    }

    fn add_admin_bar_node(&mut self, node: Value) {
        self.admin_bar.push(node);
    }

    fn init_error_tracking(&mut self, options: &Value) {
        self.error_tracking = Some(options.clone());
    }

    fn capture_message(&mut self, message: &str) {
        self.captured_messages.push(message.to_string());
    }
}
