//! End-to-end tests of the bootstrap entry point.
//!
//! Invariants / Assumptions:
//! - Tests that load `.env` files or read the process environment are
//!   `#[serial]` and restore every variable they touch via `temp_env`.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use envlayer_config::constants::{
    DATABASE_URL, DOTENV_DISABLED, HTTP_X_FORWARDED_FOR, HTTP_X_FORWARDED_PROTO, REMOTE_ADDR,
    SERVICE_SENTRY_DSN, TRUSTED_PROXIES, WP_DEBUG, WP_HOME,
};
use envlayer_config::{ConfigError, Env, RequestContext};
use envlayer_layers::host::{Constants, Host};
use envlayer_layers::{EnvLayer, Layer, SimulatedHost};
use serde_json::json;
use serial_test::serial;
use tempfile::TempDir;

/// Records the client address layers observe.
struct SeenAddress;

impl Layer for SeenAddress {
    fn name(&self) -> &'static str {
        "seen-address"
    }

    fn is_active(&self, _env: &Env, _host: &dyn Host) -> Result<bool, ConfigError> {
        Ok(true)
    }

    fn apply(&self, env: &Arc<Env>, host: &mut dyn Host) -> Result<(), ConfigError> {
        host.define("SEEN_ADDR", json!(env.get_string(REMOTE_ADDR, "")?));
        Ok(())
    }
}

fn instance(dir: &TempDir) -> std::path::PathBuf {
    let instance = dir.path().join("public");
    fs::create_dir_all(&instance).unwrap();
    instance
}

fn write_dotenv(dir: &Path, content: &str) {
    fs::write(dir.join(".env"), content).unwrap();
}

#[test]
#[serial]
fn test_bootstrap_reads_dotenv_from_instance_parent() {
    let dir = TempDir::new().unwrap();
    let instance = instance(&dir);
    write_dotenv(
        dir.path(),
        "DATABASE_URL=mysql://app:secret@db/site\nWP_HOME=https://example.com\nWP_DEBUG=true\n",
    );

    temp_env::with_vars(
        [
            (DOTENV_DISABLED, None::<&str>),
            (DATABASE_URL, None),
            (WP_HOME, None),
            (WP_DEBUG, None),
            (SERVICE_SENTRY_DSN, None),
            (TRUSTED_PROXIES, None),
        ],
        || {
            let mut host = SimulatedHost::new();
            EnvLayer::create_with_defaults(&instance)
                .bootstrap(RequestContext::new(), &mut host)
                .unwrap();

            assert_eq!(host.constant("DB_NAME"), Some(json!("site")));
            assert_eq!(host.constant(WP_DEBUG), Some(json!(true)));
            let content_dir = instance.join("content");
            assert_eq!(
                host.constant("WP_CONTENT_DIR"),
                Some(json!(content_dir.to_string_lossy()))
            );
            assert_eq!(
                host.constant("WP_CONTENT_URL"),
                Some(json!("https://example.com/content"))
            );
        },
    );
}

#[test]
#[serial]
fn test_bedrock_layout_uses_app_dir() {
    let dir = TempDir::new().unwrap();
    let instance = instance(&dir);

    temp_env::with_vars(
        [
            (DOTENV_DISABLED, Some("1")),
            (DATABASE_URL, Some("mysql://root@localhost/app")),
            (WP_HOME, Some("https://example.com")),
            (WP_DEBUG, None),
            (SERVICE_SENTRY_DSN, None),
        ],
        || {
            let mut host = SimulatedHost::new();
            EnvLayer::create_with_bedrock_defaults(&instance)
                .bootstrap(RequestContext::new(), &mut host)
                .unwrap();
            assert_eq!(
                host.constant("WP_CONTENT_URL"),
                Some(json!("https://example.com/app"))
            );
        },
    );
}

#[test]
#[serial]
fn test_malformed_dotenv_fails_before_any_layer() {
    let dir = TempDir::new().unwrap();
    write_dotenv(dir.path(), "INVALID_LINE_WITHOUT_EQUALS");

    temp_env::with_var_unset(DOTENV_DISABLED, || {
        let mut host = SimulatedHost::new();
        let layer = EnvLayer::new(dir.path(), vec![Arc::new(SeenAddress)]);
        let err = layer.bootstrap(RequestContext::new(), &mut host).unwrap_err();

        assert!(matches!(err, ConfigError::DotenvParse { .. }));
        assert!(host.constants().is_empty());
    });
}

#[test]
#[serial]
fn test_trusted_proxy_facts_reach_layers() {
    let dir = TempDir::new().unwrap();
    let request = RequestContext::new()
        .with(REMOTE_ADDR, "10.0.0.1")
        .with(HTTP_X_FORWARDED_FOR, "203.0.113.5, 10.0.0.1")
        .with(HTTP_X_FORWARDED_PROTO, "https");

    temp_env::with_vars(
        [
            (DOTENV_DISABLED, Some("1")),
            (TRUSTED_PROXIES, Some("10.0.0.1")),
            (REMOTE_ADDR, None),
        ],
        || {
            let mut host = SimulatedHost::new();
            let layer = EnvLayer::new(dir.path(), vec![Arc::new(SeenAddress)]);
            let resolved = layer.bootstrap(request.clone(), &mut host).unwrap();

            assert_eq!(resolved.remote_addr(), "203.0.113.5");
            assert!(resolved.is_secure());
            assert_eq!(host.constant("SEEN_ADDR"), Some(json!("203.0.113.5")));
        },
    );
}

#[test]
#[serial]
fn test_untrusted_peer_keeps_its_address() {
    let dir = TempDir::new().unwrap();
    let request = RequestContext::new()
        .with(REMOTE_ADDR, "198.51.100.7")
        .with(HTTP_X_FORWARDED_FOR, "203.0.113.5");

    temp_env::with_vars(
        [
            (DOTENV_DISABLED, Some("1")),
            (TRUSTED_PROXIES, Some("10.0.0.1")),
            (REMOTE_ADDR, None),
        ],
        || {
            let mut host = SimulatedHost::new();
            let layer = EnvLayer::new(dir.path(), vec![Arc::new(SeenAddress)]);
            let resolved = layer.bootstrap(request.clone(), &mut host).unwrap();

            assert_eq!(resolved, request);
            assert_eq!(host.constant("SEEN_ADDR"), Some(json!("198.51.100.7")));
        },
    );
}
