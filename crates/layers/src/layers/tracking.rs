//! Visitor analytics snippets for anonymous front-end requests.

use std::sync::Arc;

use envlayer_config::constants::{TRACKING_FATHOM, TRACKING_GTM};
use envlayer_config::{ConfigError, Env};
use serde_json::Value;

use super::escape_html;
use crate::host::hooks::{SETUP_THEME, WP_BODY_OPEN, WP_HEAD};
use crate::host::{DEFAULT_PRIORITY, Host};
use crate::layer::Layer;

pub struct TrackingLayer;

impl Layer for TrackingLayer {
    fn name(&self) -> &'static str {
        "tracking"
    }

    fn trigger(&self) -> Option<&'static str> {
        Some(SETUP_THEME)
    }

    fn is_active(&self, _env: &Env, host: &dyn Host) -> Result<bool, ConfigError> {
        Ok(!host.is_admin())
    }

    fn apply(&self, env: &Arc<Env>, host: &mut dyn Host) -> Result<(), ConfigError> {
        // Logged-in users are editors, not visitors.
        if host.is_user_logged_in() {
            return Ok(());
        }

        if let Some(site_id) = env.get_non_empty(TRACKING_FATHOM)? {
            emit(host, WP_HEAD, fathom_snippet(&site_id));
        }
        if let Some(container_id) = env.get_non_empty(TRACKING_GTM)? {
            emit(host, WP_HEAD, gtm_head_snippet(&container_id));
            emit(host, WP_BODY_OPEN, gtm_body_snippet(&container_id));
        }
        Ok(())
    }
}

fn emit(host: &mut dyn Host, hook: &str, html: String) {
    host.add_action(
        hook,
        DEFAULT_PRIORITY,
        Box::new(move |host: &mut dyn Host, _: &[Value]| {
            host.output(&html);
            Ok(())
        }),
    );
}

fn fathom_snippet(site_id: &str) -> String {
    format!(
        r#"<script src="https://cdn.usefathom.com/script.js" data-site="{}" defer></script>"#,
        escape_html(site_id)
    )
}

fn gtm_head_snippet(container_id: &str) -> String {
    format!(
        "<script>(function(w,d,s,l,i){{w[l]=w[l]||[];w[l].push({{'gtm.start':\
         new Date().getTime(),event:'gtm.js'}});var f=d.getElementsByTagName(s)[0],\
         j=d.createElement(s),dl=l!='dataLayer'?'&l='+l:'';j.async=true;j.src=\
         'https://www.googletagmanager.com/gtm.js?id='+i+dl;f.parentNode.insertBefore(j,f);\
         }})(window,document,'script','dataLayer','{}');</script>",
        escape_html(container_id)
    )
}

fn gtm_body_snippet(container_id: &str) -> String {
    format!(
        "<noscript><iframe src=\"https://www.googletagmanager.com/ns.html?id={}\" \
         height=\"0\" width=\"0\" style=\"display:none;visibility:hidden\"></iframe></noscript>",
        escape_html(container_id)
    )
}
