//! Builds the per-invocation [`Context`] from import parameters, the
//! environment and an optional config file.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use super::Context;
use crate::config::{keys, ConfigError, Configuration, EnvSource, Table};
use crate::directory::exists_must_be_dir;
use crate::keywords::{merge_mappings, KeywordMappings};
use crate::{Error, Result};

/// Parameters of one import invocation.
#[derive(Debug, Clone, Default)]
pub struct ImportParams {
    /// Root of the directory tree, relative to `base_path` unless absolute.
    pub input_file: Option<PathBuf>,
    pub base_path: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    /// Explicit options, applied above every other layer.
    pub config: Option<Table>,
    /// Merge the process environment into the keyword mappings.
    pub env: bool,
    /// Client secret that wins over every configured value.
    pub secret: Option<String>,
}

/// Assembles a context using the current process environment.
pub fn assemble(params: &ImportParams) -> Result<Context> {
    let env: Vec<(String, String)> = std::env::vars().collect();
    assemble_with_env(params, &env)
}

/// Assembles a context using `env` in place of the process environment.
pub fn assemble_with_env(params: &ImportParams, env: &[(String, String)]) -> Result<Context> {
    let config = build_configuration(params, env)?;
    let file_path = resolve_input_path(&config)?;

    Context::builder()
        .with_file_path(file_path)
        .with_config(config)
        .build()
}

/// Merges defaults, environment, config file and overrides, in increasing
/// precedence, then applies the secret override and the environment keyword
/// mappings.
pub fn build_configuration(
    params: &ImportParams,
    env: &[(String, String)],
) -> std::result::Result<Configuration, ConfigError> {
    let mut builder = Configuration::builder()
        .with_defaults(defaults())
        .with_env(EnvSource::from_vars(keys::ENV_PREFIX, env.iter().cloned()));

    if let Some(config_file) = &params.config_file {
        builder = builder.with_file(config_file, true);
    }

    let mut config = builder.with_overrides(overrides(params)).build()?;

    if let Some(secret) = &params.secret {
        config = config.with_value(keys::CLIENT_SECRET, Value::String(secret.clone()));
    }

    if params.env {
        let mappings = merge_mappings(
            KeywordMappings::from_config(&config),
            env.iter().cloned(),
        );
        tracing::debug!(count = mappings.len(), "merged environment into keyword mappings");
        config = config.with_value(keys::KEYWORD_REPLACE_MAPPINGS, mappings.into_value());
    }

    Ok(config)
}

fn defaults() -> Table {
    let mut table = Table::new();
    table.insert(keys::KEYWORD_REPLACE_MAPPINGS.into(), json!({}));
    table.insert(keys::ALLOW_AUTO_ENABLE_DATABASE_CONNECTION.into(), json!(false));
    table.insert(
        keys::DATABASE_CONNECTION_CLIENT_METAKEY.into(),
        json!(keys::DEFAULT_DATABASE_CONNECTION_CLIENT_METAKEY),
    );
    table
}

fn overrides(params: &ImportParams) -> Table {
    let mut table = Table::new();
    let paths = [
        (keys::INPUT_FILE, &params.input_file),
        (keys::BASE_PATH, &params.base_path),
        (keys::CONFIG_FILE, &params.config_file),
    ];
    for (key, path) in paths {
        if let Some(path) = path {
            table.insert(key.into(), Value::String(path.display().to_string()));
        }
    }

    if let Some(config) = &params.config {
        table.extend(config.clone());
    }
    table
}

/// Resolves the directory tree root, checking that it is an existing
/// directory.
fn resolve_input_path(config: &Configuration) -> Result<PathBuf> {
    let input = config
        .get_string(keys::INPUT_FILE)
        .map(PathBuf::from)
        .ok_or(ConfigError::MissingKey(keys::INPUT_FILE))?;

    let path = match config.get_string(keys::BASE_PATH) {
        Some(base) if input.is_relative() => Path::new(&base).join(input),
        _ => input,
    };

    if !exists_must_be_dir(&path)? {
        return Err(Error::Config(ConfigError::InputPathNotFound(path)));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::handlers::ResourceKind;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::io::Write;
    use tempfile::{Builder, TempDir};

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn table(value: Value) -> Table {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_precedence_overrides_file_env_defaults() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(
            file,
            r#"{{ "AUTH0_DOMAIN": "file.example.com", "AUTH0_CLIENT_ID": "file-id" }}"#
        )
        .unwrap();

        let params = ImportParams {
            config_file: Some(file.path().to_path_buf()),
            config: Some(table(json!({ "AUTH0_CLIENT_ID": "explicit-id" }))),
            ..Default::default()
        };
        let env = vars(&[
            ("AUTH0_DOMAIN", "env.example.com"),
            ("AUTH0_CLIENT_ID", "env-id"),
            ("AUTH0_AUDIENCE", "env-audience"),
        ]);

        let config = build_configuration(&params, &env).unwrap();

        assert_eq!(config.get_str("AUTH0_CLIENT_ID"), Some("explicit-id"));
        assert_eq!(config.get_str("AUTH0_DOMAIN"), Some("file.example.com"));
        assert_eq!(config.get_str("AUTH0_AUDIENCE"), Some("env-audience"));
        assert_eq!(
            config.get_bool("AUTH0_ALLOW_AUTO_ENABLE_DATABASE_CONNECTION"),
            Some(false)
        );
    }

    #[test]
    fn test_secret_wins_over_every_layer() {
        let params = ImportParams {
            config: Some(table(json!({ "AUTH0_CLIENT_SECRET": "explicit" }))),
            secret: Some("from-argument".into()),
            ..Default::default()
        };
        let env = vars(&[("AUTH0_CLIENT_SECRET", "from-env")]);

        let config = build_configuration(&params, &env).unwrap();

        assert_eq!(config.get_str("AUTH0_CLIENT_SECRET"), Some("from-argument"));
    }

    #[test]
    fn test_env_flag_merges_environment_into_mappings() {
        let params = ImportParams {
            config: Some(table(json!({
                "AUTH0_KEYWORD_REPLACE_MAPPINGS": { "ENV": "prod" }
            }))),
            env: true,
            ..Default::default()
        };
        let env = vars(&[("ENV", "from-env"), ("REGION", "eu")]);

        let config = build_configuration(&params, &env).unwrap();
        let mappings = KeywordMappings::from_config(&config);

        assert_eq!(mappings.get("ENV"), Some(&json!("prod")));
        assert_eq!(mappings.get("REGION"), Some(&json!("eu")));
    }

    #[test]
    fn test_environment_not_merged_without_flag() {
        let params = ImportParams::default();
        let env = vars(&[("REGION", "eu")]);

        let config = build_configuration(&params, &env).unwrap();

        assert!(KeywordMappings::from_config(&config).is_empty());
    }

    #[test]
    fn test_missing_config_file_is_configuration_error() {
        let params = ImportParams {
            config_file: Some("/nonexistent/config.json".into()),
            ..Default::default()
        };

        let result = build_configuration(&params, &[]);

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_assemble_resolves_input_against_base_path() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("tenant")).unwrap();

        let params = ImportParams {
            input_file: Some("tenant".into()),
            base_path: Some(temp.path().to_path_buf()),
            ..Default::default()
        };

        let ctx = assemble_with_env(&params, &[]).unwrap();

        assert_eq!(ctx.file_path(), temp.path().join("tenant"));
        assert!(ctx.assets().is_empty());
    }

    #[test]
    fn test_assemble_missing_input_path() {
        let temp = TempDir::new().unwrap();
        let params = ImportParams {
            input_file: Some(temp.path().join("missing")),
            ..Default::default()
        };

        let result = assemble_with_env(&params, &[]);

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InputPathNotFound(_)))
        ));
    }

    #[test]
    fn test_assemble_input_path_must_be_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("tenant.yaml");
        fs::write(&file, "clients: []").unwrap();

        let params = ImportParams {
            input_file: Some(file),
            ..Default::default()
        };

        assert!(matches!(
            assemble_with_env(&params, &[]),
            Err(Error::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_assemble_input_path_from_environment() {
        let temp = TempDir::new().unwrap();
        let env = vec![(
            "AUTH0_INPUT_FILE".to_string(),
            temp.path().display().to_string(),
        )];

        let ctx = assemble_with_env(&ImportParams::default(), &env).unwrap();

        assert_eq!(ctx.file_path(), temp.path());
    }

    #[test]
    fn test_numeric_additional_directory_from_environment() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("2024")).unwrap();
        fs::write(temp.path().join("2024/app.json"), r#"{ "name": "app" }"#).unwrap();
        let params = ImportParams {
            input_file: Some(temp.path().to_path_buf()),
            ..Default::default()
        };

        let mut ctx = assemble_with_env(
            &params,
            &vars(&[("AUTH0_ADDITIONAL_CLIENTS_DIRECTORY", "2024")]),
        )
        .unwrap();
        ctx.load().unwrap();

        let clients = ctx.assets().get(ResourceKind::Clients).unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0]["name"], json!("app"));
    }
}
