//! Error reporting for the backend and the browser.

use std::sync::{Arc, OnceLock};

use envlayer_config::constants::{
    DEFAULT_ENVIRONMENT_TYPE, RELEASE_VERSION, SERVICE_SENTRY_DSN, WP_ENVIRONMENT_TYPE,
};
use envlayer_config::{ConfigError, Env};
use serde_json::{Value, json};

use crate::host::hooks::{MUPLUGINS_LOADED, WP_HEAD, WP_MAIL_FAILED};
use crate::host::{DEFAULT_PRIORITY, Host};
use crate::layer::Layer;

const BROWSER_BUNDLE: &str = concat!(
    r#"<script src="https://browser.sentry-cdn.com/9.19.0/bundle.min.js" "#,
    r#"integrity="sha384-a5/JEdXBrJvePlxBAPLiPOjOu08fCqCX0LAknGJgSMUUJmeDd3dJM3yhAgdH1qFb" "#,
    r#"crossorigin="anonymous"></script>"#,
);

/// Runs before `wp_enqueue_scripts` so the SDK loads ahead of site scripts.
const WP_HEAD_PRIORITY: i32 = 0;

pub struct SentryLayer {
    dsn: OnceLock<Option<String>>,
}

impl Default for SentryLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentryLayer {
    pub fn new() -> Self {
        Self {
            dsn: OnceLock::new(),
        }
    }

    /// The DSN, read once per layer.
    fn dsn(&self, env: &Env) -> Result<Option<String>, ConfigError> {
        if let Some(dsn) = self.dsn.get() {
            return Ok(dsn.clone());
        }
        let dsn = env.get_non_empty(SERVICE_SENTRY_DSN)?;
        Ok(self.dsn.get_or_init(|| dsn).clone())
    }

    fn options(&self, env: &Env) -> Result<Value, ConfigError> {
        Ok(json!({
            "dsn": self.dsn(env)?,
            "environment": env.get_string(WP_ENVIRONMENT_TYPE, DEFAULT_ENVIRONMENT_TYPE)?,
            "release": env.get_non_empty(RELEASE_VERSION)?,
        }))
    }
}

impl Layer for SentryLayer {
    fn name(&self) -> &'static str {
        "sentry"
    }

    fn is_active(&self, env: &Env, _host: &dyn Host) -> Result<bool, ConfigError> {
        Ok(self.dsn(env)?.is_some())
    }

    fn apply(&self, env: &Arc<Env>, host: &mut dyn Host) -> Result<(), ConfigError> {
        let options = self.options(env)?;
        host.init_error_tracking(&options);

        host.add_action(
            MUPLUGINS_LOADED,
            DEFAULT_PRIORITY,
            Box::new(move |host: &mut dyn Host, _: &[Value]| {
                host.add_action(
                    WP_MAIL_FAILED,
                    DEFAULT_PRIORITY,
                    Box::new(|host: &mut dyn Host, args: &[Value]| {
                        let message = args.first().and_then(Value::as_str).unwrap_or_default();
                        host.capture_message(&format!("WP_Error: {message}"));
                        Ok(())
                    }),
                );

                if !host.is_admin() {
                    let snippet = browser_snippet(&options);
                    host.add_action(
                        WP_HEAD,
                        WP_HEAD_PRIORITY,
                        Box::new(move |host: &mut dyn Host, _: &[Value]| {
                            host.output(&snippet);
                            Ok(())
                        }),
                    );
                }
                Ok(())
            }),
        );
        Ok(())
    }
}

fn browser_snippet(options: &Value) -> String {
    // A "</" inside the JSON would close the inline script.
    let options = options.to_string().replace("</", "<\\/");
    format!("{BROWSER_BUNDLE}<script>Sentry.init({options})</script>")
}
