//! File-based configuration source.

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::source::{ConfigSource, Table};
use super::ConfigError;

/// A configuration source that loads from a JSON or TOML file.
///
/// The format is chosen from the extension: `.toml` is read as TOML, anything
/// else as JSON. Required files that don't exist cause an error; optional
/// files that don't exist are silently skipped.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    required: bool,
}

impl FileSource {
    /// Creates a new file source.
    ///
    /// If `required` is true, the build will fail if the file doesn't exist.
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }
}

impl ConfigSource for FileSource {
    fn load(&self) -> Result<Table, ConfigError> {
        Ok(load_config_file(&self.path, self.required)?.unwrap_or_default())
    }
}

/// Loads and parses a config file.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
fn load_config_file(path: &Path, required: bool) -> Result<Option<Table>, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return if required {
                Err(ConfigError::FileNotFound(path.to_path_buf()))
            } else {
                Ok(None)
            };
        }
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    let value = if is_toml(path) {
        let table: toml::Table = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            format: "TOML",
            message: e.to_string(),
        })?;
        serde_json::to_value(table).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            format: "TOML",
            message: e.to_string(),
        })?
    } else {
        serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            format: "JSON",
            message: e.to_string(),
        })?
    };

    match value {
        Value::Object(table) => Ok(Some(table)),
        _ => Err(ConfigError::NotATable(path.to_path_buf())),
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[test]
    fn test_file_source_loads_json_file() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{ "AUTH0_DOMAIN": "tenant.example.com" }}"#).unwrap();

        let table = FileSource::new(file.path(), true).load().unwrap();

        assert_eq!(table["AUTH0_DOMAIN"], json!("tenant.example.com"));
    }

    #[test]
    fn test_file_source_loads_toml_file() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "AUTH0_DOMAIN = \"tenant.example.com\"").unwrap();
        writeln!(file, "[AUTH0_KEYWORD_REPLACE_MAPPINGS]").unwrap();
        writeln!(file, "ENV = \"prod\"").unwrap();

        let table = FileSource::new(file.path(), true).load().unwrap();

        assert_eq!(table["AUTH0_DOMAIN"], json!("tenant.example.com"));
        assert_eq!(table["AUTH0_KEYWORD_REPLACE_MAPPINGS"]["ENV"], json!("prod"));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{ not json").unwrap();

        let result = FileSource::new(file.path(), true).load();

        assert!(matches!(
            result,
            Err(ConfigError::ParseError { format: "JSON", .. })
        ));
    }

    #[test]
    fn test_file_source_rejects_non_table() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, "[1, 2, 3]").unwrap();

        let result = FileSource::new(file.path(), true).load();

        assert!(matches!(result, Err(ConfigError::NotATable(_))));
    }

    #[test]
    fn test_file_source_required_missing() {
        let source = FileSource::new("/nonexistent/path/config.json", true);
        let result = source.load();

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_file_source_optional_missing() {
        let source = FileSource::new("/nonexistent/path/config.json", false);
        let table = source.load().unwrap();

        assert!(table.is_empty());
    }
}
