use serde_json::{Map, Value};

use super::ConfigError;

/// A flat-or-nested table of configuration values keyed by option name.
pub type Table = Map<String, Value>;

/// One layer of the configuration pipeline.
pub trait ConfigSource: Send + Sync + std::fmt::Debug {
    /// Produces this layer's values. Layers that have nothing to contribute
    /// return an empty table.
    fn load(&self) -> Result<Table, ConfigError>;
}

/// An in-memory layer, used for built-in defaults and explicit overrides.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    table: Table,
}

impl MemorySource {
    pub fn new(table: Table) -> Self {
        Self { table }
    }
}

impl ConfigSource for MemorySource {
    fn load(&self) -> Result<Table, ConfigError> {
        Ok(self.table.clone())
    }
}

/// Merges `overlay` into `base`. Nested objects merge recursively; any other
/// value (including arrays) replaces what was there.
pub fn deep_merge(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Object(base_table)), Value::Object(overlay_table)) => {
                deep_merge(base_table, overlay_table);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(value: Value) -> Table {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_deep_merge_nested_objects() {
        let mut base = table(json!({
            "AUTH0_KEYWORD_REPLACE_MAPPINGS": { "ENV": "dev", "REGION": "eu" },
            "AUTH0_BASE_PATH": "/base"
        }));
        let overlay = table(json!({
            "AUTH0_KEYWORD_REPLACE_MAPPINGS": { "ENV": "prod" }
        }));

        deep_merge(&mut base, overlay);

        assert_eq!(
            Value::Object(base),
            json!({
                "AUTH0_KEYWORD_REPLACE_MAPPINGS": { "ENV": "prod", "REGION": "eu" },
                "AUTH0_BASE_PATH": "/base"
            })
        );
    }

    #[test]
    fn test_deep_merge_replaces_arrays() {
        let mut base = table(json!({ "list": [1, 2, 3] }));
        deep_merge(&mut base, table(json!({ "list": [4] })));
        assert_eq!(base["list"], json!([4]));
    }

    #[test]
    fn test_memory_source_returns_table() {
        let source = MemorySource::new(table(json!({ "key": "value" })));
        assert_eq!(source.load().unwrap()["key"], json!("value"));
    }
}
