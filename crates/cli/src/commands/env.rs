//! `envlayer env get`: print a typed environment value.

use anyhow::{Result, anyhow};
use envlayer_config::{Env, EnvValue, coerce};

use crate::args::ValueType;
use crate::formatters::{EnvValueOutput, OutputFormat, get_formatter};

pub fn run_get(
    env: &Env,
    key: &str,
    value_type: ValueType,
    default: Option<&str>,
    output_format: OutputFormat,
) -> Result<()> {
    let value = lookup(env, key, value_type, default)?;
    let output = EnvValueOutput {
        key: key.to_string(),
        value_type: value.type_name(),
        value,
    };
    print!("{}", get_formatter(output_format).format_env_value(&output)?);
    Ok(())
}

/// Reads `key` through the typed getter matching `value_type`.
///
/// The default is coerced with the same grammar as real values, so
/// `--default 5 --type int` behaves like an exported `5`.
fn lookup(
    env: &Env,
    key: &str,
    value_type: ValueType,
    default: Option<&str>,
) -> Result<EnvValue> {
    let default = default.map_or(EnvValue::Null, coerce);
    let bad_default = |expected: &str| anyhow!("--default for {key} must be {expected}");

    let value = match value_type {
        ValueType::Raw => env.get(key, default)?,
        ValueType::Bool => {
            let default = match default {
                EnvValue::Bool(b) => b,
                EnvValue::Null => false,
                _ => return Err(bad_default("a bool")),
            };
            EnvValue::Bool(env.get_bool(key, default)?)
        }
        ValueType::Int => {
            let default = match default {
                EnvValue::Int(n) => n,
                EnvValue::Null => 0,
                _ => return Err(bad_default("an int")),
            };
            EnvValue::Int(env.get_int(key, default)?)
        }
        ValueType::String => {
            let default = match default {
                EnvValue::String(s) => s,
                EnvValue::Int(n) => n.to_string(),
                EnvValue::Null => String::new(),
                _ => return Err(bad_default("a string")),
            };
            EnvValue::String(env.get_string(key, &default)?)
        }
    };
    Ok(value)
}
