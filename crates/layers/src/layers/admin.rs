//! Admin screen additions: support footer and environment badge.

use std::sync::Arc;

use envlayer_config::constants::{ADMIN_DISPLAY_ENV, ADMIN_SUPPORT_NAME, ADMIN_SUPPORT_URL};
use envlayer_config::{ConfigError, Env};
use serde_json::{Value, json};

use super::escape_html;
use crate::host::hooks::{ADMIN_BAR_MENU, ADMIN_FOOTER_TEXT, ADMIN_INIT, UPDATE_FOOTER};
use crate::host::{DEFAULT_PRIORITY, Host};
use crate::layer::Layer;

/// Registered ahead of the default admin bar callbacks.
const BADGE_PRIORITY: i32 = 1;

/// Badge `(background, foreground)` colors per environment type.
fn badge_colors(environment_type: &str) -> Option<(&'static str, &'static str)> {
    match environment_type {
        "local" => Some(("#2271b1", "#ffffff")),
        "development" => Some(("#00a32a", "#ffffff")),
        "staging" => Some(("#dba617", "#1d2327")),
        "production" => Some(("#d63638", "#ffffff")),
        _ => None,
    }
}

pub struct AdminLayer;

impl Layer for AdminLayer {
    fn name(&self) -> &'static str {
        "admin"
    }

    fn trigger(&self) -> Option<&'static str> {
        Some(ADMIN_INIT)
    }

    fn is_active(&self, _env: &Env, host: &dyn Host) -> Result<bool, ConfigError> {
        Ok(host.is_admin())
    }

    fn apply(&self, env: &Arc<Env>, host: &mut dyn Host) -> Result<(), ConfigError> {
        host.remove_callback(UPDATE_FOOTER, "core_update_footer", DEFAULT_PRIORITY);

        let footer_env = Arc::clone(env);
        host.add_filter(
            ADMIN_FOOTER_TEXT,
            DEFAULT_PRIORITY,
            Box::new(move |host: &dyn Host, _: Value, _: &[Value]| {
                Ok(Value::String(footer_text(&footer_env, host)?))
            }),
        );

        if env.get_bool(ADMIN_DISPLAY_ENV, false)? {
            host.add_action(
                ADMIN_BAR_MENU,
                BADGE_PRIORITY,
                Box::new(|host: &mut dyn Host, _: &[Value]| {
                    if let Some(node) = environment_badge(&host.environment_type()) {
                        host.add_admin_bar_node(node);
                    }
                    Ok(())
                }),
            );
        }
        Ok(())
    }
}

/// `Support name | WordPress 6.5`, with the support name linked when a URL is set.
fn footer_text(env: &Env, host: &dyn Host) -> Result<String, ConfigError> {
    let mut facts = Vec::new();

    if let Some(name) = env.get_non_empty(ADMIN_SUPPORT_NAME)? {
        let name = escape_html(&name);
        facts.push(match env.get_non_empty(ADMIN_SUPPORT_URL)? {
            Some(url) => format!(
                r#"<a href="{}" target="_blank" rel="noopener">{name}</a>"#,
                escape_html(&url)
            ),
            None => name,
        });
    }
    facts.push(format!("WordPress {}", escape_html(&host.version())));
    Ok(facts.join(" | "))
}

fn environment_badge(environment_type: &str) -> Option<Value> {
    let (background, color) = badge_colors(environment_type)?;
    let mut title = environment_type.to_string();
    if let Some(first) = title.get_mut(..1) {
        first.make_ascii_uppercase();
    }
    Some(json!({
        "id": "envlayer-env",
        "parent": "top-secondary",
        "title": title,
        "meta": {
            "class": "envlayer-admin-bar-env",
            "html": format!(
                "<style>.envlayer-admin-bar-env, .envlayer-admin-bar-env .ab-item {{ \
                 background: {background} !important; color: {color} !important; }}</style>"
            ),
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SimulatedHost;
    use crate::layers::test_support::env_from;
    use envlayer_config::constants::WP_ENVIRONMENT_TYPE;

    fn admin_host() -> SimulatedHost {
        SimulatedHost::new().with_admin(true).with_version("6.5.2")
    }

    #[test]
    fn test_active_only_in_admin() {
        let env = env_from(&[]);
        assert!(AdminLayer.is_active(&env, &admin_host()).unwrap());
        assert!(!AdminLayer.is_active(&env, &SimulatedHost::new()).unwrap());
    }

    #[test]
    fn test_footer_shows_host_version() {
        let mut host = admin_host();
        AdminLayer.apply(&env_from(&[]), &mut host).unwrap();
        assert_eq!(host.footer_text().unwrap(), "WordPress 6.5.2");
        assert!(host.was_removed(UPDATE_FOOTER, "core_update_footer"));
    }

    #[test]
    fn test_footer_links_support() {
        let mut host = admin_host();
        let env = env_from(&[
            (ADMIN_SUPPORT_NAME, "Acme & Co"),
            (ADMIN_SUPPORT_URL, "https://acme.example/help"),
        ]);
        AdminLayer.apply(&env, &mut host).unwrap();
        assert_eq!(
            host.footer_text().unwrap(),
            r#"<a href="https://acme.example/help" target="_blank" rel="noopener">Acme &amp; Co</a> | WordPress 6.5.2"#
        );
    }

    #[test]
    fn test_environment_badge() {
        let mut host = admin_host().with_constant(WP_ENVIRONMENT_TYPE, json!("staging"));
        AdminLayer
            .apply(&env_from(&[(ADMIN_DISPLAY_ENV, "true")]), &mut host)
            .unwrap();
        host.render().unwrap();

        let nodes = host.admin_bar_nodes();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0]["title"], json!("Staging"));
        assert!(nodes[0]["meta"]["html"].as_str().unwrap().contains("#dba617"));
    }

    #[test]
    fn test_badge_is_opt_in() {
        let mut host = admin_host();
        AdminLayer.apply(&env_from(&[]), &mut host).unwrap();
        assert_eq!(host.action_count(ADMIN_BAR_MENU), 0);
        assert!(environment_badge("qa").is_none());
    }
}
