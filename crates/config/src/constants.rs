//! Centralized environment variable names and defaults.
//!
//! Every variable a layer reads is listed here so operators have one place
//! to look up the configuration surface.

// =============================================================================
// Bootstrap
// =============================================================================

/// Name of the dotenv file looked up in the dotenv directory.
pub const DOTENV_FILE_NAME: &str = ".env";

/// Set to `1` or `true` to skip `.env` loading entirely.
pub const DOTENV_DISABLED: &str = "DOTENV_DISABLED";

/// Comma-separated list of proxy addresses allowed to rewrite request facts.
pub const TRUSTED_PROXIES: &str = "ENVLAYER_TRUSTED_PROXIES";

// =============================================================================
// Request facts
// =============================================================================

pub const REMOTE_ADDR: &str = "REMOTE_ADDR";
pub const SERVER_PORT: &str = "SERVER_PORT";
pub const REQUEST_SCHEME: &str = "REQUEST_SCHEME";
pub const HTTPS: &str = "HTTPS";
pub const HTTP_X_FORWARDED_FOR: &str = "HTTP_X_FORWARDED_FOR";
pub const HTTP_X_FORWARDED_PORT: &str = "HTTP_X_FORWARDED_PORT";
pub const HTTP_X_FORWARDED_PROTO: &str = "HTTP_X_FORWARDED_PROTO";

// =============================================================================
// Paths & database
// =============================================================================

pub const WP_HOME: &str = "WP_HOME";
pub const WP_SITEURL: &str = "WP_SITEURL";
pub const DATABASE_URL: &str = "DATABASE_URL";
pub const DATABASE_PREFIX: &str = "DATABASE_PREFIX";
pub const DATABASE_CHARSET: &str = "DATABASE_CHARSET";
pub const DATABASE_COLLATE: &str = "DATABASE_COLLATE";

/// Default table prefix.
pub const DEFAULT_DATABASE_PREFIX: &str = "wp_";

/// Default database character set.
pub const DEFAULT_DATABASE_CHARSET: &str = "utf8mb4";

/// The only scheme accepted for `DATABASE_URL`.
pub const DATABASE_SCHEME: &str = "mysql";

/// Salt used when a `SALT_*` variable is unset, matching the stock sample config.
pub const DEFAULT_SALT: &str = "put your unique phrase here";

/// Host secret constants paired with the variable each is read from.
pub const SALTS: [(&str, &str); 8] = [
    ("AUTH_KEY", "SALT_AUTH_KEY"),
    ("SECURE_AUTH_KEY", "SALT_SECURE_AUTH_KEY"),
    ("LOGGED_IN_KEY", "SALT_LOGGED_IN_KEY"),
    ("NONCE_KEY", "SALT_NONCE_KEY"),
    ("AUTH_SALT", "SALT_AUTH_SALT"),
    ("SECURE_AUTH_SALT", "SALT_SECURE_AUTH_SALT"),
    ("LOGGED_IN_SALT", "SALT_LOGGED_IN_SALT"),
    ("NONCE_SALT", "SALT_NONCE_SALT"),
];

// =============================================================================
// Environment & features
// =============================================================================

pub const WP_ENVIRONMENT_TYPE: &str = "WP_ENVIRONMENT_TYPE";

/// Environment types the host recognizes, in display order.
pub const ENVIRONMENT_TYPES: [&str; 4] = ["local", "development", "staging", "production"];

/// Environment type assumed when `WP_ENVIRONMENT_TYPE` is unset.
pub const DEFAULT_ENVIRONMENT_TYPE: &str = "production";

pub const WP_DEBUG: &str = "WP_DEBUG";
pub const WP_CRON: &str = "WP_CRON";
pub const WP_POST_REVISIONS: &str = "WP_POST_REVISIONS";
pub const WP_ALLOW_REPAIR: &str = "WP_ALLOW_REPAIR";
pub const WP_CACHE: &str = "WP_CACHE";
pub const WP_DEFAULT_THEME: &str = "WP_DEFAULT_THEME";

pub const MULTISITE_ALLOW: &str = "MULTISITE_ALLOW";
pub const MULTISITE_ENABLE: &str = "MULTISITE_ENABLE";
pub const MULTISITE_TYPE: &str = "MULTISITE_TYPE";
pub const MULTISITE_DOMAIN: &str = "MULTISITE_DOMAIN";
pub const MULTISITE_PATH: &str = "MULTISITE_PATH";

pub const PLUGIN_ACF_PRO_LICENSE: &str = "PLUGIN_ACF_PRO_LICENSE";

pub const FEATURE_COMMENTS: &str = "FEATURE_COMMENTS";
pub const FEATURE_EMOJI: &str = "FEATURE_EMOJI";
pub const FEATURE_OEMBED: &str = "FEATURE_OEMBED";
pub const FEATURE_XMLRPC: &str = "FEATURE_XMLRPC";

// =============================================================================
// Mail
// =============================================================================

pub const MAILER_URL: &str = "MAILER_URL";
pub const MAILER_FROM_ADDRESS: &str = "MAILER_FROM_ADDRESS";
pub const MAILER_FROM_NAME: &str = "MAILER_FROM_NAME";

/// The only scheme accepted for `MAILER_URL`.
pub const MAILER_SCHEME: &str = "smtp";

/// SMTP submission port used with STARTTLS.
pub const DEFAULT_STARTTLS_PORT: u16 = 587;

/// SMTP port used with implicit TLS.
pub const DEFAULT_SMTPS_PORT: u16 = 465;

// =============================================================================
// Tracking, monitoring, roles, admin
// =============================================================================

pub const TRACKING_FATHOM: &str = "TRACKING_FATHOM";
pub const TRACKING_GTM: &str = "TRACKING_GTM";

pub const SERVICE_SENTRY_DSN: &str = "SERVICE_SENTRY_DSN";
pub const RELEASE_VERSION: &str = "RELEASE_VERSION";

pub const WP_ROLES_PATCH: &str = "WP_ROLES_PATCH";

/// Option key holding the digest of the last applied roles patch.
pub const ROLES_PATCH_VERSION_OPTION: &str = "envlayer_roles_patch_version";

/// Upper bound on the number of sites a roles patch is applied to.
pub const MAX_PATCHED_SITES: usize = 1024;

pub const ADMIN_DISPLAY_ENV: &str = "ADMIN_DISPLAY_ENV";
pub const ADMIN_SUPPORT_NAME: &str = "ADMIN_SUPPORT_NAME";
pub const ADMIN_SUPPORT_URL: &str = "ADMIN_SUPPORT_URL";
