//! `envlayer plan`: bootstrap an instance against the simulated host.
//!
//! Responsibilities:
//! - Build the request context and host flags from arguments.
//! - Run the bootstrap, fire the lifecycle triggers and render a page.
//! - Report defined constants, registered hooks and resolved request facts.
//!
//! Does NOT handle:
//! - Talking to a real CMS. Everything runs in memory.
//!
//! Invariants:
//! - Values of secret constants (passwords, salts, licenses) are never printed.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use envlayer_config::RequestContext;
use envlayer_config::constants::REMOTE_ADDR;
use envlayer_layers::layers::is_secret_constant;
use envlayer_layers::{EnvLayer, InstancePaths, Layout, SimulatedHost};
use serde_json::Value;
use tracing::info;

use crate::args::LayoutArg;
use crate::formatters::{ConstantOutput, OutputFormat, PlanOutput, REDACTED, get_formatter};

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Instance directory; `.env` is read from its parent
    pub instance: PathBuf,

    /// Directory layout of the instance
    #[arg(long, value_enum, default_value_t = LayoutArg::Default)]
    pub layout: LayoutArg,

    /// Simulate an admin screen request
    #[arg(long)]
    pub admin: bool,

    /// Simulate a network install
    #[arg(long)]
    pub multisite: bool,

    /// Additional network site ID (implies --multisite)
    #[arg(long = "site", value_name = "ID")]
    pub sites: Vec<u64>,

    /// Simulate a logged-in user
    #[arg(long)]
    pub logged_in: bool,

    /// Host version reported by the simulated host
    #[arg(long, default_value = "6.5")]
    pub host_version: String,

    /// Site URL reported by the simulated host
    #[arg(long)]
    pub site_url: Option<String>,

    /// Address of the peer sending the request
    #[arg(long)]
    pub remote_addr: Option<String>,

    /// Request header, e.g. X-Forwarded-For=203.0.113.5
    #[arg(long = "header", value_name = "KEY=VALUE", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,
}

pub fn run(args: PlanArgs, output_format: OutputFormat) -> Result<()> {
    let layout = match args.layout {
        LayoutArg::Default => Layout::Standard,
        LayoutArg::Bedrock => Layout::Bedrock,
    };
    let env_layer = EnvLayer::with_layout(&args.instance, layout);
    let mut host = simulated_host(&args);

    info!(instance = %args.instance.display(), "planning bootstrap");
    let request = env_layer
        .bootstrap(request_context(&args), &mut host)
        .context("Bootstrap failed")?;
    host.boot().context("Lifecycle trigger failed")?;
    host.render().context("Rendering failed")?;

    let plan = PlanOutput {
        instance: args.instance.display().to_string(),
        dotenv_dir: InstancePaths::new(&args.instance, layout)
            .dotenv_dir
            .display()
            .to_string(),
        layers: env_layer
            .layers()
            .iter()
            .map(|layer| layer.name().to_string())
            .collect(),
        request: request
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        constants: host
            .constants()
            .iter()
            .map(|(name, value)| ConstantOutput {
                name: name.clone(),
                value: redact(name, value),
            })
            .collect(),
        hooks: host.hook_summaries(),
        removed_callbacks: host.removed_callbacks().to_vec(),
        fired: host.fired().to_vec(),
    };

    print!("{}", get_formatter(output_format).format_plan(&plan)?);
    Ok(())
}

fn simulated_host(args: &PlanArgs) -> SimulatedHost {
    let mut host = SimulatedHost::new()
        .with_admin(args.admin)
        .with_logged_in(args.logged_in)
        .with_version(args.host_version.clone());
    if args.multisite || !args.sites.is_empty() {
        host = host.with_multisite(args.sites.iter().copied());
    }
    if let Some(site_url) = &args.site_url {
        host = host.with_site_url(site_url.clone());
    }
    host
}

fn request_context(args: &PlanArgs) -> RequestContext {
    let mut request: RequestContext = args
        .headers
        .iter()
        .map(|(name, value)| (header_fact_name(name), value.clone()))
        .collect();
    if let Some(addr) = &args.remote_addr {
        request.set(REMOTE_ADDR, addr.clone());
    }
    request
}

/// `X-Forwarded-For` becomes `HTTP_X_FORWARDED_FOR`.
fn header_fact_name(name: &str) -> String {
    let name = name.trim().to_ascii_uppercase().replace('-', "_");
    if name.starts_with("HTTP_") {
        name
    } else {
        format!("HTTP_{name}")
    }
}

fn parse_header(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{input}'")),
    }
}

fn redact(name: &str, value: &Value) -> Value {
    let is_blank = match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    };
    if is_secret_constant(name) && !is_blank {
        Value::String(REDACTED.to_string())
    } else {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_names_become_server_facts() {
        assert_eq!(header_fact_name("X-Forwarded-For"), "HTTP_X_FORWARDED_FOR");
        assert_eq!(header_fact_name("http_x_forwarded_proto"), "HTTP_X_FORWARDED_PROTO");
    }

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("X-Forwarded-Port=8443").unwrap(),
            ("X-Forwarded-Port".to_string(), "8443".to_string())
        );
        assert_eq!(parse_header("X-Empty=").unwrap().1, "");
        assert!(parse_header("no-equals").is_err());
        assert!(parse_header("=value").is_err());
    }

    #[test]
    fn test_secrets_are_redacted_unless_blank() {
        assert_eq!(redact("DB_PASSWORD", &json!("hunter2")), json!(REDACTED));
        assert_eq!(redact("DB_PASSWORD", &Value::Null), Value::Null);
        assert_eq!(redact("AUTH_KEY", &json!("")), json!(""));
        assert_eq!(redact("DB_USER", &json!("app")), json!("app"));
    }
}
