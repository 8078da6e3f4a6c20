//! Directory layout helpers shared by the resource handlers.

pub mod handlers;
mod sanitize;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::keywords::KeywordMappings;
use crate::{Error, Result};

pub use sanitize::{sanitize, MAX_NAME_LENGTH};

/// Returns `true` if `path` is an existing directory and `false` if nothing
/// exists there. Anything else at `path` is a layout error.
pub fn exists_must_be_dir(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(true),
        Ok(_) => Err(Error::InvalidLayout(path.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(path, e)),
    }
}

pub fn is_file(path: &Path) -> bool {
    path.is_file()
}

/// Lists the files directly inside `dir` whose extension is one of
/// `extensions` (compared case-insensitively), sorted by file name.
pub fn get_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));
        if matches {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Reads a JSON object from `path`, substituting keyword placeholders in the
/// raw text before parsing.
pub fn load_json(path: &Path, mappings: &KeywordMappings) -> Result<Map<String, Value>> {
    let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let text = mappings.replace_json(&raw);

    let value: Value = serde_json::from_str(&text).map_err(|source| Error::MalformedResource {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(Error::NotAnObject(path.to_path_buf())),
    }
}

pub fn load_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    tracing::info!("Writing {}", path.display());
    fs::write(path, contents).map_err(|e| Error::io(path, e))
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}
