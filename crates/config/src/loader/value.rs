//! Coercion of raw environment strings into typed values.
//!
//! Rules, applied in order:
//! 1. Case-insensitive `true` / `false` / `null` become `Bool` / `Null`.
//! 2. A non-empty string of ASCII digits becomes `Int`.
//! 3. A value wrapped in double quotes is JSON-decoded and coerced again.
//! 4. Anything else stays a `String`.

use serde::Serialize;
use std::fmt;

/// A coerced environment value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EnvValue {
    String(String),
    Int(i64),
    Bool(bool),
    Null,
}

impl EnvValue {
    /// Name of the variant as used in type-mismatch messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            EnvValue::String(_) => "string",
            EnvValue::Int(_) => "int",
            EnvValue::Bool(_) => "bool",
            EnvValue::Null => "null",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, EnvValue::Null)
    }
}

impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvValue::String(s) => f.write_str(s),
            EnvValue::Int(i) => write!(f, "{i}"),
            EnvValue::Bool(b) => write!(f, "{b}"),
            EnvValue::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for EnvValue {
    fn from(value: &str) -> Self {
        EnvValue::String(value.to_string())
    }
}

impl From<String> for EnvValue {
    fn from(value: String) -> Self {
        EnvValue::String(value)
    }
}

impl From<i64> for EnvValue {
    fn from(value: i64) -> Self {
        EnvValue::Int(value)
    }
}

impl From<bool> for EnvValue {
    fn from(value: bool) -> Self {
        EnvValue::Bool(value)
    }
}

/// Coerce a raw environment string. Total and deterministic.
pub fn coerce(raw: &str) -> EnvValue {
    if raw.eq_ignore_ascii_case("true") {
        return EnvValue::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return EnvValue::Bool(false);
    }
    if raw.eq_ignore_ascii_case("null") {
        return EnvValue::Null;
    }
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        // Digit-only input can only fail to parse by overflowing.
        return EnvValue::Int(raw.parse().unwrap_or(i64::MAX));
    }
    if raw.starts_with('"') && raw.ends_with('"') {
        // Undecodable JSON strings coerce as the empty string.
        let decoded = serde_json::from_str::<String>(raw).unwrap_or_default();
        return coerce(&decoded);
    }
    EnvValue::String(raw.to_string())
}
