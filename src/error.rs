use std::path::PathBuf;

use crate::api::ApiError;
use crate::config::ConfigError;
use thiserror::Error;

/// Top-level error type for the tenant-sync library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("context requires a configuration")]
    MissingConfig,

    #[error("expected a directory at '{0}'")]
    InvalidLayout(PathBuf),

    #[error("malformed resource file '{path}': {source}")]
    MalformedResource {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("resource file '{0}' must contain a JSON object")]
    NotAnObject(PathBuf),

    #[error("{kind} '{first}' and '{second}' both map to file name '{file_name}'")]
    NameCollision {
        kind: &'static str,
        first: String,
        second: String,
        file_name: String,
    },

    #[error("{kind} at position {index} has no usable name")]
    MissingIdentifier { kind: &'static str, index: usize },

    #[error("failed to serialize '{path}': {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("management API call failed: {0}")]
    Api(#[source] ApiError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for tenant-sync operations.
pub type Result<T> = std::result::Result<T, Error>;
