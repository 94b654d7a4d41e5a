//! URL fixes for a network whose core files live in a subdirectory.

use std::sync::Arc;

use envlayer_config::{ConfigError, Env};
use serde_json::Value;

use crate::bootstrap::InstancePaths;
use crate::host::hooks::{
    MUPLUGINS_LOADED, NETWORK_SITE_URL, OPTION_HOME, OPTION_SITEURL, SCRIPT_LOADER_SRC,
    STYLE_LOADER_SRC,
};
use crate::host::{DEFAULT_PRIORITY, FilterCallback, Host};
use crate::layer::Layer;

pub struct MultisiteLayer {
    instance: String,
    abs_path: String,
}

impl MultisiteLayer {
    pub fn new(paths: &InstancePaths) -> Self {
        Self {
            instance: paths.instance.to_string_lossy().trim_end_matches('/').to_string(),
            abs_path: paths.abs_path.to_string_lossy().trim_end_matches('/').to_string(),
        }
    }

    /// The core directory relative to the instance, e.g. `/wp`.
    ///
    /// `None` when the core files are not in a strict subdirectory.
    fn install_dir(&self, host: &dyn Host) -> Option<String> {
        let abs_path = host
            .constant("ABSPATH")
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| format!("{}/", self.abs_path));
        let instance = format!("{}/", self.instance);

        if abs_path == instance || !abs_path.starts_with(&instance) {
            return None;
        }
        let relative = &abs_path[self.instance.len()..];
        Some(relative.trim_end_matches('/').to_string())
    }
}

impl Layer for MultisiteLayer {
    fn name(&self) -> &'static str {
        "multisite"
    }

    fn trigger(&self) -> Option<&'static str> {
        Some(MUPLUGINS_LOADED)
    }

    fn is_active(&self, _env: &Env, host: &dyn Host) -> Result<bool, ConfigError> {
        Ok(host.is_multisite())
    }

    fn apply(&self, _env: &Arc<Env>, host: &mut dyn Host) -> Result<(), ConfigError> {
        let Some(install_dir) = self.install_dir(&*host) else {
            return Ok(());
        };

        host.add_filter(OPTION_HOME, DEFAULT_PRIORITY, home_url_filter(install_dir.clone()));
        host.add_filter(OPTION_SITEURL, DEFAULT_PRIORITY, site_url_filter(install_dir.clone()));
        host.add_filter(
            NETWORK_SITE_URL,
            DEFAULT_PRIORITY,
            network_site_url_filter(install_dir.clone()),
        );
        host.add_filter(STYLE_LOADER_SRC, DEFAULT_PRIORITY, loader_src_filter(install_dir.clone()));
        host.add_filter(SCRIPT_LOADER_SRC, DEFAULT_PRIORITY, loader_src_filter(install_dir));
        Ok(())
    }
}

/// `https://example.com/wp` becomes `https://example.com`.
fn home_url_filter(install_dir: String) -> FilterCallback {
    Box::new(move |_: &dyn Host, value: Value, _: &[Value]| {
        let stripped = value
            .as_str()
            .and_then(|url| url.strip_suffix(install_dir.as_str()))
            .map(str::to_string);
        Ok(stripped.map_or(value, Value::String))
    })
}

/// `https://example.com/site` becomes `https://example.com/site/wp`.
fn site_url_filter(install_dir: String) -> FilterCallback {
    Box::new(move |_: &dyn Host, value: Value, _: &[Value]| {
        let extended = value
            .as_str()
            .filter(|url| !url.ends_with(install_dir.as_str()))
            .map(|url| format!("{url}{install_dir}"));
        Ok(extended.map_or(value, Value::String))
    })
}

/// Inserts the core directory before the path: `https://example.com/wp-admin/network/`
/// becomes `https://example.com/wp/wp-admin/network/`. Arguments: `[path, scheme]`.
fn network_site_url_filter(install_dir: String) -> FilterCallback {
    Box::new(move |_: &dyn Host, value: Value, args: &[Value]| {
        let Some(url) = value.as_str().map(str::to_string) else {
            return Ok(value);
        };
        let path = args.first().and_then(Value::as_str).unwrap_or_default();
        let path = format!("/{}", path.trim_start_matches('/'));

        let base = url.strip_suffix(path.as_str()).unwrap_or(&url);
        let base = if base.ends_with(install_dir.as_str()) {
            base.to_string()
        } else {
            format!("{base}{install_dir}")
        };
        Ok(Value::String(format!("{base}{path}")))
    })
}

/// Rewrites asset sources under the site URL to root-relative core paths.
fn loader_src_filter(install_dir: String) -> FilterCallback {
    Box::new(move |host: &dyn Host, value: Value, _: &[Value]| {
        let site_url = host.site_url();
        if site_url.is_empty() {
            return Ok(value);
        }
        let rewritten = value
            .as_str()
            .and_then(|src| src.strip_prefix(site_url.as_str()))
            .map(|rest| format!("{install_dir}{rest}"));
        Ok(rewritten.map_or(value, Value::String))
    })
}
