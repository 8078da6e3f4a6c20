use serde_json::Value;

use super::source::{ConfigSource, Table};
use super::ConfigError;

/// Loads configuration options from environment variables.
///
/// Only variables whose name starts with the prefix are taken, and they keep
/// their full name as the option key (`AUTH0_BASE_PATH` stays
/// `AUTH0_BASE_PATH`).
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
    /// Reads from the process environment when the configuration is built.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            vars: None,
        }
    }

    /// Reads from a captured set of variables instead of the process
    /// environment.
    pub fn from_vars<I, K, V>(prefix: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            prefix: prefix.into(),
            vars: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl ConfigSource for EnvSource {
    fn load(&self) -> Result<Table, ConfigError> {
        let vars = match &self.vars {
            Some(vars) => vars.clone(),
            None => std::env::vars().collect(),
        };

        Ok(vars
            .into_iter()
            .filter(|(key, _)| key.len() > self.prefix.len() && key.starts_with(&self.prefix))
            .map(|(key, value)| {
                let value = coerce_value(&value);
                (key, value)
            })
            .collect())
    }
}

fn coerce_value(s: &str) -> Value {
    // Try boolean first (case-insensitive)
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    if looks_like_integer(s) {
        if let Ok(i) = s.parse::<i64>() {
            return Value::from(i);
        }
    }

    if s.contains('.') {
        if let Ok(f) = s.parse::<f64>() {
            if let Some(n) = serde_json::Number::from_f64(f) {
                return Value::Number(n);
            }
        }
    }

    // Objects such as keyword mappings can be passed as inline JSON
    if s.trim_start().starts_with('{') {
        if let Ok(value @ Value::Object(_)) = serde_json::from_str(s) {
            return value;
        }
    }

    Value::String(s.to_string())
}

fn looks_like_integer(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
