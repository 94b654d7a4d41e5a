//! Switches for built-in host features.
//!
//! Comments, emoji and oEmbed are on unless disabled; XML-RPC is off unless
//! enabled.

use std::sync::Arc;

use envlayer_config::constants::{FEATURE_COMMENTS, FEATURE_EMOJI, FEATURE_OEMBED, FEATURE_XMLRPC};
use envlayer_config::{ConfigError, Env};
use serde_json::{Value, json};

use crate::host::hooks::{
    ADMIN_INIT, ADMIN_MENU, ADMIN_PRINT_SCRIPTS, ADMIN_PRINT_STYLES, BEFORE_ADMIN_BAR_RENDER,
    COMMENT_TEXT_RSS, COMMENTS_ARRAY, COMMENTS_OPEN, EMBED_OEMBED_DISCOVER, INIT,
    MUPLUGINS_LOADED, PINGS_OPEN, RESOURCE_HINTS, REST_API_INIT, THE_CONTENT_FEED,
    TINY_MCE_PLUGINS, WP_HEAD, WP_MAIL, WP_PRINT_STYLES, XMLRPC_ENABLED,
};
use crate::host::{DEFAULT_PRIORITY, Host, constant_filter};
use crate::layer::Layer;

const EMOJI_URL_PREFIX: &str = "https://s.w.org/images/core/emoji/";

/// Host callbacks that add emoji support, with their registration priority.
const EMOJI_CALLBACKS: [(&str, &str, i32); 7] = [
    (ADMIN_PRINT_SCRIPTS, "print_emoji_detection_script", DEFAULT_PRIORITY),
    (ADMIN_PRINT_STYLES, "print_emoji_styles", DEFAULT_PRIORITY),
    (WP_HEAD, "print_emoji_detection_script", 7),
    (WP_PRINT_STYLES, "print_emoji_styles", DEFAULT_PRIORITY),
    (COMMENT_TEXT_RSS, "wp_staticize_emoji", DEFAULT_PRIORITY),
    (THE_CONTENT_FEED, "wp_staticize_emoji", DEFAULT_PRIORITY),
    (WP_MAIL, "wp_staticize_emoji_for_email", DEFAULT_PRIORITY),
];

pub struct FeatureLayer;

impl Layer for FeatureLayer {
    fn name(&self) -> &'static str {
        "features"
    }

    fn trigger(&self) -> Option<&'static str> {
        Some(MUPLUGINS_LOADED)
    }

    fn is_active(&self, _env: &Env, _host: &dyn Host) -> Result<bool, ConfigError> {
        Ok(true)
    }

    fn apply(&self, env: &Arc<Env>, host: &mut dyn Host) -> Result<(), ConfigError> {
        if !env.get_bool(FEATURE_COMMENTS, true)? {
            disable_comments(host);
        }
        if !env.get_bool(FEATURE_EMOJI, true)? {
            disable_emoji(host);
        }
        if !env.get_bool(FEATURE_OEMBED, true)? {
            disable_oembed(host);
        }
        if !env.get_bool(FEATURE_XMLRPC, false)? {
            host.add_filter(XMLRPC_ENABLED, DEFAULT_PRIORITY, constant_filter(json!(false)));
        }
        Ok(())
    }
}

fn disable_comments(host: &mut dyn Host) {
    host.add_filter(COMMENTS_OPEN, DEFAULT_PRIORITY, constant_filter(json!(false)));
    host.add_filter(PINGS_OPEN, DEFAULT_PRIORITY, constant_filter(json!(false)));
    host.add_filter(COMMENTS_ARRAY, DEFAULT_PRIORITY, constant_filter(json!([])));

    host.add_action(
        ADMIN_MENU,
        DEFAULT_PRIORITY,
        Box::new(|host: &mut dyn Host, _: &[Value]| {
            host.remove_admin_ui("menu:edit-comments.php");
            Ok(())
        }),
    );
    host.add_action(
        BEFORE_ADMIN_BAR_RENDER,
        DEFAULT_PRIORITY,
        Box::new(|host: &mut dyn Host, _: &[Value]| {
            host.remove_admin_ui("admin-bar:comments");
            Ok(())
        }),
    );
    host.add_action(
        ADMIN_INIT,
        DEFAULT_PRIORITY,
        Box::new(|host: &mut dyn Host, _: &[Value]| {
            host.remove_admin_ui("meta-box:commentstatusdiv:post");
            host.remove_admin_ui("meta-box:commentstatusdiv:page");
            host.remove_admin_ui("meta-box:dashboard_recent_comments:dashboard");
            Ok(())
        }),
    );
}

fn disable_emoji(host: &mut dyn Host) {
    host.add_action(
        INIT,
        DEFAULT_PRIORITY,
        Box::new(|host: &mut dyn Host, _: &[Value]| {
            for (hook, name, priority) in EMOJI_CALLBACKS {
                host.remove_callback(hook, name, priority);
            }
            Ok(())
        }),
    );

    // Arguments: `[relation_type]`.
    host.add_filter(
        RESOURCE_HINTS,
        DEFAULT_PRIORITY,
        Box::new(|_: &dyn Host, value: Value, args: &[Value]| {
            let is_dns_prefetch = args.first().and_then(Value::as_str) == Some("dns-prefetch");
            Ok(match value {
                Value::Array(urls) if is_dns_prefetch => Value::Array(
                    urls.into_iter()
                        .filter(|url| !url.as_str().is_some_and(|u| u.starts_with(EMOJI_URL_PREFIX)))
                        .collect(),
                ),
                other => other,
            })
        }),
    );

    host.add_filter(
        TINY_MCE_PLUGINS,
        DEFAULT_PRIORITY,
        Box::new(|_: &dyn Host, value: Value, _: &[Value]| {
            Ok(match value {
                Value::Array(plugins) => Value::Array(
                    plugins.into_iter().filter(|p| p != "wpemoji").collect(),
                ),
                other => other,
            })
        }),
    );
}

fn disable_oembed(host: &mut dyn Host) {
    host.remove_callback(REST_API_INIT, "wp_oembed_register_route", DEFAULT_PRIORITY);
    host.add_filter(EMBED_OEMBED_DISCOVER, DEFAULT_PRIORITY, constant_filter(json!(false)));
    host.remove_callback(WP_HEAD, "wp_oembed_add_discovery_links", DEFAULT_PRIORITY);
    host.remove_callback(WP_HEAD, "wp_oembed_add_host_js", DEFAULT_PRIORITY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SimulatedHost;
    use crate::layers::test_support::env_from;

    fn applied(vars: &[(&str, &str)]) -> SimulatedHost {
        let mut host = SimulatedHost::new();
        FeatureLayer.apply(&env_from(vars), &mut host).unwrap();
        host
    }

    #[test]
    fn test_defaults_only_disable_xmlrpc() {
        let host = applied(&[]);
        let summaries = host.hook_summaries();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].hook, XMLRPC_ENABLED);
        assert_eq!(
            host.apply_filters(XMLRPC_ENABLED, json!(true), &[]).unwrap(),
            json!(false)
        );
    }

    #[test]
    fn test_xmlrpc_can_be_enabled() {
        let host = applied(&[(FEATURE_XMLRPC, "true")]);
        assert_eq!(host.filter_count(XMLRPC_ENABLED), 0);
    }

    #[test]
    fn test_disabling_comments_closes_and_hides_them() {
        let mut host = applied(&[(FEATURE_COMMENTS, "false")]).with_admin(true);
        assert_eq!(host.apply_filters(COMMENTS_OPEN, json!(true), &[]).unwrap(), json!(false));
        assert_eq!(
            host.apply_filters(COMMENTS_ARRAY, json!([{"id": 1}]), &[]).unwrap(),
            json!([])
        );

        host.boot().unwrap();
        host.do_action(ADMIN_MENU, &[]).unwrap();
        assert!(host.removed_admin_ui().contains(&"menu:edit-comments.php".to_string()));
        assert!(host
            .removed_admin_ui()
            .contains(&"meta-box:dashboard_recent_comments:dashboard".to_string()));
    }

    #[test]
    fn test_disabling_emoji() {
        let mut host = applied(&[(FEATURE_EMOJI, "false")]);
        host.boot().unwrap();
        assert!(host.was_removed(WP_HEAD, "print_emoji_detection_script"));
        assert_eq!(host.removed_callbacks().len(), EMOJI_CALLBACKS.len());

        let hints = host
            .apply_filters(
                RESOURCE_HINTS,
                json!(["https://s.w.org/images/core/emoji/15/svg/", "https://fonts.example"]),
                &[json!("dns-prefetch")],
            )
            .unwrap();
        assert_eq!(hints, json!(["https://fonts.example"]));

        let preconnect = host
            .apply_filters(
                RESOURCE_HINTS,
                json!(["https://s.w.org/images/core/emoji/15/svg/"]),
                &[json!("preconnect")],
            )
            .unwrap();
        assert_eq!(preconnect, json!(["https://s.w.org/images/core/emoji/15/svg/"]));

        let plugins = host
            .apply_filters(TINY_MCE_PLUGINS, json!(["wpemoji", "lists"]), &[])
            .unwrap();
        assert_eq!(plugins, json!(["lists"]));
    }

    #[test]
    fn test_disabling_oembed_removes_discovery() {
        let host = applied(&[(FEATURE_OEMBED, "false")]);
        assert!(host.was_removed(REST_API_INIT, "wp_oembed_register_route"));
        assert!(host.was_removed(WP_HEAD, "wp_oembed_add_host_js"));
        assert_eq!(
            host.apply_filters(EMBED_OEMBED_DISCOVER, json!(true), &[]).unwrap(),
            json!(false)
        );
    }

    #[test]
    fn test_mistyped_flag_is_fatal() {
        let mut host = SimulatedHost::new();
        let err = FeatureLayer
            .apply(&env_from(&[(FEATURE_EMOJI, "off")]), &mut host)
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnexpectedType { ref var, .. } if var == FEATURE_EMOJI));
    }
}
