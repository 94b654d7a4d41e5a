//! Trusted proxy resolution.
//!
//! Responsibilities:
//! - Decide whether the immediate peer is a trusted proxy.
//! - Rewrite client address, port and scheme from `X-Forwarded-*` headers
//!   when, and only when, the peer is trusted.
//!
//! Invariants:
//! - Forwarded headers from untrusted peers are never consulted.
//! - Peer matching is an exact string comparison against the allow-list.
//! - Empty allow-list entries never match, so an absent peer address is
//!   never trusted.

use crate::constants::{
    HTTP_X_FORWARDED_FOR, HTTP_X_FORWARDED_PORT, HTTP_X_FORWARDED_PROTO, HTTPS, REMOTE_ADDR,
    REQUEST_SCHEME, SERVER_PORT, TRUSTED_PROXIES,
};
use crate::loader::{ConfigError, Env};
use crate::types::RequestContext;

/// Returns the adjusted request context.
///
/// The allow-list is read from `ENVLAYER_TRUSTED_PROXIES` through `env`.
pub fn resolve_proxy_facts(
    mut request: RequestContext,
    env: &Env,
) -> Result<RequestContext, ConfigError> {
    let trusted = env.get_string(TRUSTED_PROXIES, "")?;
    let peer = request.remote_addr().to_string();

    let is_trusted = split_list(&trusted).any(|entry| !entry.is_empty() && entry == peer);
    if !is_trusted {
        if request.non_empty(HTTP_X_FORWARDED_FOR).is_some() {
            tracing::warn!(peer = %peer, "ignoring forwarded headers from untrusted peer");
        }
        return Ok(request);
    }

    // Leftmost entry is the originating client.
    let client = request
        .non_empty(HTTP_X_FORWARDED_FOR)
        .and_then(|forwarded_for| split_list(forwarded_for).next())
        .filter(|client| !client.is_empty())
        .map(str::to_string);
    if let Some(client) = client {
        tracing::debug!(peer = %peer, client = %client, "client address from trusted proxy");
        request.set(REMOTE_ADDR, client);
    }

    let port = request.non_empty(HTTP_X_FORWARDED_PORT).map(str::to_string);
    if let Some(port) = port {
        request.set(SERVER_PORT, port);
    }

    let https = request.non_empty(HTTP_X_FORWARDED_PROTO).map(|proto| proto == "https");
    if let Some(https) = https {
        request.set(REQUEST_SCHEME, if https { "https" } else { "http" });
        request.set(HTTPS, if https { "on" } else { "" });
    }

    Ok(request)
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim)
}
