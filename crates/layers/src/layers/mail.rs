//! Outgoing mail: sender overrides and SMTP transport from `MAILER_URL`.
//!
//! The host hands its mailer to `phpmailer_init` as a JSON object; the
//! transport callback returns it with the SMTP fields set.

use std::sync::Arc;

use envlayer_config::constants::{
    DEFAULT_SMTPS_PORT, DEFAULT_STARTTLS_PORT, MAILER_FROM_ADDRESS, MAILER_FROM_NAME,
    MAILER_SCHEME, MAILER_URL,
};
use envlayer_config::{ConfigError, Env, ResourceUrl};
use secrecy::ExposeSecret;
use serde_json::{Map, Value, json};

use crate::host::hooks::{
    MUPLUGINS_LOADED, PHPMAILER_INIT, WP_MAIL_FAILED, WP_MAIL_FROM, WP_MAIL_FROM_NAME,
};
use crate::host::{DEFAULT_PRIORITY, FilterCallback, Host, constant_filter};
use crate::layer::Layer;

/// Priority of the sender forced by the `from` query parameter of `MAILER_URL`.
/// Runs after plugins that set a sender at ordinary priorities.
pub const MAILER_FROM_FILTER_PRIORITY: i32 = 10_001;

pub struct MailLayer;

impl Layer for MailLayer {
    fn name(&self) -> &'static str {
        "mail"
    }

    fn trigger(&self) -> Option<&'static str> {
        Some(MUPLUGINS_LOADED)
    }

    fn is_active(&self, _env: &Env, _host: &dyn Host) -> Result<bool, ConfigError> {
        Ok(true)
    }

    fn apply(&self, env: &Arc<Env>, host: &mut dyn Host) -> Result<(), ConfigError> {
        host.add_filter(
            WP_MAIL_FROM,
            DEFAULT_PRIORITY,
            env_override_filter(Arc::clone(env), MAILER_FROM_ADDRESS),
        );
        host.add_filter(
            WP_MAIL_FROM_NAME,
            DEFAULT_PRIORITY,
            env_override_filter(Arc::clone(env), MAILER_FROM_NAME),
        );

        if let Some(mailer) = env.get_url(MAILER_URL)? {
            attach_transport(mailer, host)?;
        }

        host.add_action(
            WP_MAIL_FAILED,
            DEFAULT_PRIORITY,
            Box::new(|host: &mut dyn Host, args: &[Value]| {
                let message = args.first().and_then(Value::as_str).unwrap_or_default();
                host.log_error(&format!("wp_mail_failed: {message}"));
                Ok(())
            }),
        );
        Ok(())
    }
}

/// Replaces the filtered string with `key` when it is set.
fn env_override_filter(env: Arc<Env>, key: &'static str) -> FilterCallback {
    Box::new(move |_: &dyn Host, value: Value, _: &[Value]| {
        let current = value.as_str().unwrap_or_default();
        Ok(Value::String(env.get_string(key, current)?))
    })
}

fn attach_transport(mailer: ResourceUrl, host: &mut dyn Host) -> Result<(), ConfigError> {
    if mailer.scheme != MAILER_SCHEME {
        return Err(ConfigError::UnsupportedScheme {
            var: MAILER_URL.to_string(),
            scheme: mailer.scheme,
        });
    }

    if let Some(from) = mailer.query_param("from").filter(|from| !from.is_empty()) {
        host.add_filter(WP_MAIL_FROM, MAILER_FROM_FILTER_PRIORITY, constant_filter(json!(from)));
    }

    host.add_filter(
        PHPMAILER_INIT,
        DEFAULT_PRIORITY,
        Box::new(move |_: &dyn Host, value: Value, _: &[Value]| {
            let fields = match value {
                Value::Object(fields) => fields,
                _ => Map::new(),
            };
            Ok(Value::Object(smtp_fields(&mailer, fields)))
        }),
    );
    Ok(())
}

/// STARTTLS unless `encryption=ssl`; the port defaults to match.
fn smtp_fields(mailer: &ResourceUrl, mut fields: Map<String, Value>) -> Map<String, Value> {
    let starttls = mailer.query_param("encryption") != Some("ssl");
    let default_port = if starttls {
        DEFAULT_STARTTLS_PORT
    } else {
        DEFAULT_SMTPS_PORT
    };

    fields.insert("Mailer".into(), json!("smtp"));
    fields.insert("SMTPSecure".into(), json!(if starttls { "tls" } else { "ssl" }));
    fields.insert("Host".into(), json!(mailer.host_name));
    fields.insert("Port".into(), json!(mailer.port.unwrap_or(default_port)));

    if !mailer.user_name.is_empty() {
        fields.insert("Username".into(), json!(mailer.user_name));
        fields.insert("Password".into(), json!(mailer.password.expose_secret()));
        fields.insert("SMTPAuth".into(), json!(true));
    }
    fields
}
