//! Keyword placeholder substitution for resource files.
//!
//! Two placeholder forms are recognized:
//!
//! - `##KEY##` is replaced with the mapped value as plain text (strings are
//!   inserted without quotes).
//! - `@@KEY@@` is replaced with the mapped value serialized as JSON, which
//!   allows injecting arrays and objects into a resource file.
//!
//! Placeholders whose key has no mapping are left verbatim. Replacement text
//! is never rescanned.
//!
//! [`KeywordMappings::replace_json`] is used for resource files: `##KEY##`
//! string values are escaped as the body of a JSON string literal, so quotes
//! and backslashes in a value (Windows paths, for instance) keep the file
//! parseable.

use serde_json::{Map, Value};

use crate::config::{keys, Configuration};

/// Placeholder name to replacement value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordMappings(Map<String, Value>);

impl KeywordMappings {
    pub fn new(mappings: Map<String, Value>) -> Self {
        Self(mappings)
    }

    /// Reads the mappings configured under `AUTH0_KEYWORD_REPLACE_MAPPINGS`.
    pub fn from_config(config: &Configuration) -> Self {
        config
            .get_object(keys::KEYWORD_REPLACE_MAPPINGS)
            .cloned()
            .map(Self)
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Replaces every known placeholder in `input`.
    pub fn replace(&self, input: &str) -> String {
        self.replace_with(input, false)
    }

    /// Like [`replace`](Self::replace), for JSON text: `##KEY##` string values
    /// are JSON-escaped without surrounding quotes.
    pub fn replace_json(&self, input: &str) -> String {
        self.replace_with(input, true)
    }

    fn replace_with(&self, input: &str, escape: bool) -> String {
        if self.is_empty() {
            return input.to_string();
        }

        let mut result = String::with_capacity(input.len());
        let mut rest = input;

        while let Some((start, delimiter)) = next_opening(rest) {
            result.push_str(&rest[..start]);
            let after = &rest[start + DELIMITER_LEN..];

            let replacement = after.find(delimiter.as_str()).and_then(|end| {
                let key = &after[..end];
                self.render(key, delimiter, escape).map(|text| (end, text))
            });

            match replacement {
                Some((end, text)) => {
                    result.push_str(&text);
                    rest = &after[end + DELIMITER_LEN..];
                }
                None => {
                    // Not a known placeholder, keep the delimiter and move on
                    result.push_str(delimiter.as_str());
                    rest = after;
                }
            }
        }

        result.push_str(rest);
        result
    }

    fn render(&self, key: &str, delimiter: Delimiter, escape: bool) -> Option<String> {
        if key.is_empty() {
            return None;
        }
        let value = self.0.get(key)?;
        Some(match (delimiter, value) {
            (Delimiter::Text, Value::String(_)) if escape => {
                let quoted = value.to_string();
                quoted[1..quoted.len() - 1].to_string()
            }
            (Delimiter::Text, Value::String(s)) => s.clone(),
            _ => value.to_string(),
        })
    }
}

/// Merges environment variables into `existing`. Keys already present in
/// `existing` keep their value.
pub fn merge_mappings<I, K, V>(existing: KeywordMappings, env: I) -> KeywordMappings
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut merged = existing;
    for (key, value) in env {
        merged
            .0
            .entry(key.into())
            .or_insert_with(|| Value::String(value.into()));
    }
    merged
}

const DELIMITER_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    /// `##KEY##`
    Text,
    /// `@@KEY@@`
    Json,
}

impl Delimiter {
    fn as_str(self) -> &'static str {
        match self {
            Self::Text => "##",
            Self::Json => "@@",
        }
    }
}

/// Finds the earliest opening delimiter in `s`.
fn next_opening(s: &str) -> Option<(usize, Delimiter)> {
    let text = s.find(Delimiter::Text.as_str()).map(|i| (i, Delimiter::Text));
    let json = s.find(Delimiter::Json.as_str()).map(|i| (i, Delimiter::Json));
    match (text, json) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    }
}
