//! Role and capability patches from `WP_ROLES_PATCH`.
//!
//! The patch is a JSON object of role name to instructions:
//!
//! ```json
//! {"editor": {"add_cap": "edit_theme_options", "deny_cap": ["delete_posts"]},
//!  "shop_manager": {"display_name": "Shop Manager", "add_cap": ["read"]},
//!  "legacy": {"remove_role": true}}
//! ```
//!
//! Invariants:
//! - A site is patched only when its stored version marker differs from the
//!   SHA-256 digest of the patch, so an unchanged patch never touches the host.
//! - On a network, every site up to `MAX_PATCHED_SITES` is patched separately.
//! - The whole patch is validated before any role is touched, so a bad entry
//!   anywhere leaves every site unchanged.

use std::collections::BTreeMap;
use std::sync::Arc;

use envlayer_config::constants::{MAX_PATCHED_SITES, ROLES_PATCH_VERSION_OPTION, WP_ROLES_PATCH};
use envlayer_config::{ConfigError, Env};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::host::hooks::INIT;
use crate::host::Host;
use crate::layer::Layer;

pub struct RolesLayer;

impl Layer for RolesLayer {
    fn name(&self) -> &'static str {
        "roles"
    }

    fn trigger(&self) -> Option<&'static str> {
        Some(INIT)
    }

    fn is_active(&self, _env: &Env, _host: &dyn Host) -> Result<bool, ConfigError> {
        Ok(true)
    }

    fn apply(&self, env: &Arc<Env>, host: &mut dyn Host) -> Result<(), ConfigError> {
        let Some(patch) = env.get_non_empty(WP_ROLES_PATCH)? else {
            return Ok(());
        };
        let version = hex::encode(Sha256::digest(patch.as_bytes()));
        let roles = parse_patch(&patch)?;

        if !host.is_multisite() {
            patch_site(host, &roles, &version);
            return Ok(());
        }
        for site_id in host.site_ids(MAX_PATCHED_SITES) {
            host.switch_to_site(site_id);
            patch_site(host, &roles, &version);
            host.restore_current_site();
        }
        Ok(())
    }
}

/// One role's validated instructions.
#[derive(Debug)]
struct RolePatch {
    display_name: Option<String>,
    remove_role: bool,
    add_caps: Vec<String>,
    remove_caps: Vec<String>,
    deny_caps: Vec<String>,
}

/// Applies the patch to the current site unless it already carries `version`.
fn patch_site(host: &mut dyn Host, roles: &BTreeMap<String, RolePatch>, version: &str) {
    if host.option(ROLES_PATCH_VERSION_OPTION).as_deref() == Some(version) {
        debug!("roles patch already applied");
        return;
    }

    for (name, role_patch) in roles {
        apply_role_patch(host, name, role_patch);
    }
    host.update_option(ROLES_PATCH_VERSION_OPTION, version, true);
    debug!(roles = roles.len(), "applied roles patch");
}

/// Parses and validates every role before any of them is applied.
fn parse_patch(patch: &str) -> Result<BTreeMap<String, RolePatch>, ConfigError> {
    let Ok(Value::Object(roles)) = serde_json::from_str::<Value>(patch) else {
        return Err(invalid("contains unexpected JSON"));
    };
    roles
        .iter()
        .map(|(name, role)| Ok((name.clone(), parse_role(role)?)))
        .collect()
}

fn parse_role(role: &Value) -> Result<RolePatch, ConfigError> {
    let Value::Object(role) = role else {
        return Err(invalid("contains unexpected JSON"));
    };
    Ok(RolePatch {
        display_name: role
            .get("display_name")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        remove_role: role.get("remove_role") == Some(&Value::Bool(true)),
        add_caps: parse_caps(role.get("add_cap"))?,
        remove_caps: parse_caps(role.get("remove_cap"))?,
        deny_caps: parse_caps(role.get("deny_cap"))?,
    })
}

fn apply_role_patch(host: &mut dyn Host, name: &str, patch: &RolePatch) {
    if host.role(name).is_none() {
        if patch.remove_role {
            return;
        }
        let display_name = patch.display_name.as_deref().unwrap_or(name);

        // Denials win over grants of the same capability.
        let mut capabilities = BTreeMap::new();
        for cap in &patch.add_caps {
            capabilities.insert(cap.clone(), true);
        }
        for cap in &patch.deny_caps {
            capabilities.insert(cap.clone(), false);
        }
        host.add_role(name, display_name, capabilities);
        return;
    }

    for cap in &patch.add_caps {
        host.add_cap(name, cap, true);
    }
    for cap in &patch.remove_caps {
        host.remove_cap(name, cap);
    }
    for cap in &patch.deny_caps {
        host.add_cap(name, cap, false);
    }
}

/// A capability field is a non-empty string or a list of non-empty strings.
/// An absent or `null` field grants nothing.
fn parse_caps(value: Option<&Value>) -> Result<Vec<String>, ConfigError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(cap)) if !cap.is_empty() => Ok(vec![cap.clone()]),
        Some(Value::Array(caps)) => caps
            .iter()
            .map(|cap| match cap {
                Value::String(cap) if !cap.is_empty() => Ok(cap.clone()),
                _ => Err(invalid("contains invalid capabilities")),
            })
            .collect(),
        Some(_) => Err(invalid("contains invalid capabilities")),
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        var: WP_ROLES_PATCH.to_string(),
        message: message.to_string(),
    }
}
