//! Request facts as seen by the bootstrapped application.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::constants::{HTTPS, REMOTE_ADDR, SERVER_PORT};
use crate::loader::MapSource;

/// Server-side facts about the current request (peer address, port, scheme
/// and raw `HTTP_*` headers), keyed by their CGI names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequestContext {
    facts: BTreeMap<String, String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.facts.get(key).map(String::as_str)
    }

    /// Returns the fact only when it is present and non-empty.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.facts.insert(key.into(), value.into());
    }

    pub fn remote_addr(&self) -> &str {
        self.get(REMOTE_ADDR).unwrap_or("")
    }

    pub fn server_port(&self) -> Option<&str> {
        self.get(SERVER_PORT)
    }

    /// Mirrors the host's notion of a secure request: `HTTPS` is `on` or `1`.
    pub fn is_secure(&self) -> bool {
        matches!(
            self.get(HTTPS).map(str::to_ascii_lowercase).as_deref(),
            Some("on") | Some("1")
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.facts.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The facts as an environment fallback source.
    pub fn to_source(&self) -> MapSource {
        self.facts.clone().into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            facts: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
