//! `envlayer url parse`: show how a resource URL is understood.

use anyhow::{Result, bail};
use envlayer_config::ResourceUrl;

use crate::formatters::{OutputFormat, get_formatter};

pub fn run_parse(value: &str, output_format: OutputFormat) -> Result<()> {
    // The input may carry a password, so it is never echoed back.
    let Some(url) = ResourceUrl::parse(value) else {
        bail!("Failed to parse resource URL");
    };
    print!("{}", get_formatter(output_format).format_url(&url)?);
    Ok(())
}
