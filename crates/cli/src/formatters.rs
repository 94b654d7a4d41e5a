//! Output formatters for CLI commands.
//!
//! Provides table and JSON output. Table output is meant for people, JSON
//! for scripts.

use std::collections::BTreeMap;
use std::fmt::Write;

use anyhow::Result;
use clap::ValueEnum;
use envlayer_config::{EnvValue, ResourceUrl};
use envlayer_layers::host::{HookSummary, RemovedCallback};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;

/// Placeholder printed instead of secret values.
pub const REDACTED: &str = "********";

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// One defined constant. Secret values are already redacted.
#[derive(Debug, Clone, Serialize)]
pub struct ConstantOutput {
    pub name: String,
    pub value: Value,
}

/// Result of `envlayer plan`.
#[derive(Debug, Clone, Serialize)]
pub struct PlanOutput {
    pub instance: String,
    pub dotenv_dir: String,
    pub layers: Vec<String>,
    pub request: BTreeMap<String, String>,
    pub constants: Vec<ConstantOutput>,
    pub hooks: Vec<HookSummary>,
    pub removed_callbacks: Vec<RemovedCallback>,
    pub fired: Vec<String>,
}

/// Result of `envlayer env get`.
#[derive(Debug, Clone, Serialize)]
pub struct EnvValueOutput {
    pub key: String,
    #[serde(rename = "type")]
    pub value_type: &'static str,
    pub value: EnvValue,
}

/// Formatter trait for different output types.
pub trait Formatter {
    fn format_plan(&self, plan: &PlanOutput) -> Result<String>;

    fn format_env_value(&self, value: &EnvValueOutput) -> Result<String>;

    fn format_url(&self, url: &ResourceUrl) -> Result<String>;
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_plan(&self, plan: &PlanOutput) -> Result<String> {
        Ok(serde_json::to_string_pretty(plan)?)
    }

    fn format_env_value(&self, value: &EnvValueOutput) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    fn format_url(&self, url: &ResourceUrl) -> Result<String> {
        Ok(serde_json::to_string_pretty(url)?)
    }
}

/// Plain-text table formatter.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_plan(&self, plan: &PlanOutput) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "Instance:   {}", plan.instance)?;
        writeln!(output, ".env dir:   {}", plan.dotenv_dir)?;
        writeln!(output, "Layers:     {}", plan.layers.join(", "))?;
        writeln!(output, "Fired:      {}", plan.fired.join(", "))?;

        output.push_str("\nRequest:\n");
        let rows: Vec<_> = plan
            .request
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        write_rows(&mut output, &rows)?;

        output.push_str("\nConstants:\n");
        let rows: Vec<_> = plan
            .constants
            .iter()
            .map(|c| (c.name.clone(), display_value(&c.value)))
            .collect();
        write_rows(&mut output, &rows)?;

        output.push_str("\nHooks:\n");
        let rows: Vec<_> = plan
            .hooks
            .iter()
            .map(|h| (h.hook.clone(), format!("{} @ {}", h.kind, h.priority)))
            .collect();
        write_rows(&mut output, &rows)?;

        if !plan.removed_callbacks.is_empty() {
            output.push_str("\nRemoved:\n");
            let rows: Vec<_> = plan
                .removed_callbacks
                .iter()
                .map(|r| (r.hook.clone(), format!("{} @ {}", r.name, r.priority)))
                .collect();
            write_rows(&mut output, &rows)?;
        }
        Ok(output)
    }

    fn format_env_value(&self, value: &EnvValueOutput) -> Result<String> {
        Ok(format!("{}\n", value.value))
    }

    fn format_url(&self, url: &ResourceUrl) -> Result<String> {
        let password = if url.password.expose_secret().is_empty() {
            String::new()
        } else {
            REDACTED.to_string()
        };
        let mut rows = vec![
            ("scheme".to_string(), url.scheme.clone()),
            ("user".to_string(), url.user_name.clone()),
            ("password".to_string(), password),
            ("host".to_string(), url.host_name.clone()),
            (
                "port".to_string(),
                url.port.map(|p| p.to_string()).unwrap_or_default(),
            ),
            ("path".to_string(), url.path.clone()),
        ];
        rows.extend(
            url.query
                .iter()
                .map(|(k, v)| (format!("query.{k}"), v.clone())),
        );

        let mut output = String::new();
        write_rows(&mut output, &rows)?;
        Ok(output)
    }
}

/// Writes `name  value` rows with the names padded to a common width.
fn write_rows(output: &mut String, rows: &[(String, String)]) -> Result<()> {
    if rows.is_empty() {
        output.push_str("  (none)\n");
        return Ok(());
    }
    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, value) in rows {
        writeln!(output, "  {name:<width$}  {value}")?;
    }
    Ok(())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Get a formatter for the specified output format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
