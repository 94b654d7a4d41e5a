//! Shared test utilities for envlayer integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Clear every variable a layer reads so host settings cannot leak in.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.

use assert_cmd::Command;

/// A database URL accepted by the constants layer.
#[allow(dead_code)]
pub const DATABASE_URL: &str = "mysql://app:hunter2@db:3306/site";

const LAYER_VARIABLES: &[&str] = &[
    "ENVLAYER_TRUSTED_PROXIES",
    "WP_HOME",
    "WP_SITEURL",
    "DATABASE_URL",
    "DATABASE_PREFIX",
    "DATABASE_CHARSET",
    "DATABASE_COLLATE",
    "WP_ENVIRONMENT_TYPE",
    "WP_DEBUG",
    "WP_CRON",
    "WP_POST_REVISIONS",
    "WP_ALLOW_REPAIR",
    "WP_CACHE",
    "WP_DEFAULT_THEME",
    "MULTISITE_ALLOW",
    "MULTISITE_ENABLE",
    "MULTISITE_TYPE",
    "MULTISITE_DOMAIN",
    "MULTISITE_PATH",
    "PLUGIN_ACF_PRO_LICENSE",
    "FEATURE_COMMENTS",
    "FEATURE_EMOJI",
    "FEATURE_OEMBED",
    "FEATURE_XMLRPC",
    "MAILER_URL",
    "MAILER_FROM_ADDRESS",
    "MAILER_FROM_NAME",
    "TRACKING_FATHOM",
    "TRACKING_GTM",
    "SERVICE_SENTRY_DSN",
    "RELEASE_VERSION",
    "WP_ROLES_PATCH",
    "ADMIN_DISPLAY_ENV",
    "ADMIN_SUPPORT_NAME",
    "ADMIN_SUPPORT_URL",
    "REMOTE_ADDR",
    "SERVER_PORT",
    "REQUEST_SCHEME",
    "HTTPS",
    "HTTP_X_FORWARDED_FOR",
    "HTTP_X_FORWARDED_PORT",
    "HTTP_X_FORWARDED_PROTO",
];

/// Returns a hermetic `envlayer` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - Layer variables are cleared to ensure no leakage from the host.
pub fn envlayer_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("envlayer");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    for var in LAYER_VARIABLES {
        cmd.env_remove(var);
    }
    for (key, _) in std::env::vars() {
        if key.starts_with("SALT_") {
            cmd.env_remove(&key);
        }
    }
    cmd
}

/// Returns a hermetic command with dotenv loading enabled again.
#[allow(dead_code)]
pub fn envlayer_cmd_with_dotenv() -> Command {
    let mut cmd = envlayer_cmd();
    cmd.env_remove("DOTENV_DISABLED");
    cmd
}
