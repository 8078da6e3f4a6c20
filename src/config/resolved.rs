use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::builder::ConfigBuilder;
use super::source::Table;
use super::ConfigError;

/// The merged view of every configuration layer.
///
/// Built once per invocation by [`ConfigBuilder`] and read by key afterwards.
/// Nothing downstream looks at an individual layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configuration {
    values: Table,
}

impl Configuration {
    /// Creates a new configuration builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn from_table(values: Table) -> Self {
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key).filter(|v| !v.is_null())
    }

    /// Returns the value only if it is stored as a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Renders scalar values as a string, so `"42"` and `42` read the same.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Reads a flag. Booleans and the strings `"true"`/`"false"` are
    /// accepted; anything else reads as unset.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }

    pub fn get_object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.get(key).and_then(Value::as_object)
    }

    /// Returns a copy of this configuration with `key` set to `value`.
    pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Deserializes the whole configuration into a typed view.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        serde_json::from_value(Value::Object(self.values.clone())).map_err(ConfigError::from)
    }

    pub fn as_table(&self) -> &Table {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn config(value: Value) -> Configuration {
        match value {
            Value::Object(map) => Configuration::from_table(map),
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_get_string_renders_scalars() {
        let config = config(json!({ "id": 42, "name": "abc", "flag": true, "obj": {} }));

        assert_eq!(config.get_string("id").as_deref(), Some("42"));
        assert_eq!(config.get_string("name").as_deref(), Some("abc"));
        assert_eq!(config.get_string("flag").as_deref(), Some("true"));
        assert_eq!(config.get_string("obj"), None);
        assert_eq!(config.get_str("id"), None);
    }

    #[test]
    fn test_get_bool_accepts_strings() {
        let config = config(json!({ "a": true, "b": "TRUE", "c": "false", "d": "yes" }));

        assert_eq!(config.get_bool("a"), Some(true));
        assert_eq!(config.get_bool("b"), Some(true));
        assert_eq!(config.get_bool("c"), Some(false));
        assert_eq!(config.get_bool("d"), None);
        assert_eq!(config.get_bool("missing"), None);
    }

    #[test]
    fn test_null_reads_as_unset() {
        let config = config(json!({ "AUTH0_CONFIG_FILE": null }));
        assert!(config.get("AUTH0_CONFIG_FILE").is_none());
    }

    #[test]
    fn test_deserialize_typed_view() {
        #[derive(Deserialize)]
        struct Tenant {
            #[serde(rename = "AUTH0_DOMAIN")]
            domain: String,
        }

        let config = config(json!({ "AUTH0_DOMAIN": "tenant.example.com", "OTHER": 1 }));
        let tenant: Tenant = config.deserialize().unwrap();

        assert_eq!(tenant.domain, "tenant.example.com");
    }

    #[test]
    fn test_with_value_replaces_key() {
        let config = config(json!({ "AUTH0_CLIENT_SECRET": "old" }))
            .with_value("AUTH0_CLIENT_SECRET", json!("new"));

        assert_eq!(config.get_str("AUTH0_CLIENT_SECRET"), Some("new"));
    }
}
