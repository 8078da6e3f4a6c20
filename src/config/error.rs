use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("required config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {format} config file '{path}': {message}")]
    ParseError {
        path: PathBuf,
        format: &'static str,
        message: String,
    },

    #[error("config file '{0}' must contain a table at the top level")]
    NotATable(PathBuf),

    #[error("failed to deserialize config: {0}")]
    DeserializeError(#[from] serde_json::Error),

    #[error("required configuration key is not set: {0}")]
    MissingKey(&'static str),

    #[error("input path does not exist: {0}")]
    InputPathNotFound(PathBuf),
}
