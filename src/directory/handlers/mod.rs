//! Per-kind `parse`/`dump` between the directory tree and [`Assets`].
//!
//! Every kind stores one JSON file per resource in its own directory. The
//! kinds differ only in their [`KindSpec`]: directory names, the optional
//! sidecar field and which array fields are normalized on dump.
//!
//! [`Assets`]: crate::context::Assets

mod clients;
mod resource_servers;
mod rules;

use std::collections::hash_map::{Entry, HashMap};
use std::fmt;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use serde_json::Value;

use crate::context::{Context, Resource};
use crate::directory::{
    ensure_dir, exists_must_be_dir, get_files, is_file, load_json, load_text, sanitize, write_text,
};
use crate::{Error, Result};

/// A category of tenant configuration with its own directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    Clients,
    ResourceServers,
    Rules,
}

impl ResourceKind {
    /// Every kind, in the order [`Context::load`] and [`Context::dump`]
    /// process them.
    pub const ALL: [Self; 3] = [Self::Clients, Self::ResourceServers, Self::Rules];

    pub fn spec(self) -> &'static KindSpec {
        match self {
            Self::Clients => &clients::SPEC,
            Self::ResourceServers => &resource_servers::SPEC,
            Self::Rules => &rules::SPEC,
        }
    }

    /// Name used for this kind in the assets mapping, e.g. `clients`.
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Reads every resource of this kind from the context's directory tree.
    ///
    /// Returns `None` when no resource file exists at all, which is distinct
    /// from `Some` of an empty collection.
    pub fn parse(self, context: &Context) -> Result<Option<Vec<Resource>>> {
        let spec = self.spec();

        let mut found = Vec::new();
        for dir in candidate_dirs(spec, context) {
            if exists_must_be_dir(&dir)? {
                found.extend(get_files(&dir, &["json"])?);
            }
        }

        if found.is_empty() {
            tracing::debug!(kind = spec.name, "no resource files found, skipping");
            return Ok(None);
        }

        let mut resources = Vec::with_capacity(found.len());
        for file in &found {
            let mut resource = load_json(file, context.mappings())?;
            if let Some(sidecar) = &spec.sidecar {
                inline_sidecar(sidecar, file, &mut resource)?;
            }
            if !resource.is_empty() {
                resources.push(resource);
            }
        }

        tracing::debug!(kind = spec.name, count = resources.len(), "parsed resources");
        Ok(Some(resources))
    }

    /// Writes this kind's loaded resources into the context's directory tree.
    ///
    /// Does nothing if the kind was never loaded.
    pub fn dump(self, context: &mut Context) -> Result<()> {
        let root = context.file_path().to_path_buf();
        match context.assets_mut().get_mut(self) {
            Some(resources) => dump_resources(self.spec(), &root, resources),
            None => Ok(()),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static description of how one kind is laid out on disk.
#[derive(Debug)]
pub struct KindSpec {
    pub name: &'static str,
    pub directory: &'static str,
    /// Configuration key naming an extra directory to read from.
    pub additional_directory_key: &'static str,
    pub sidecar: Option<Sidecar>,
    /// Array fields that are written as `[]` when present but null.
    pub transient_arrays: &'static [&'static str],
}

/// A large text field stored in its own file next to the resource JSON.
#[derive(Debug)]
pub struct Sidecar {
    pub field: &'static str,
    /// Appended to the sanitized resource name to form the file name.
    pub suffix: &'static str,
}

impl Sidecar {
    pub fn file_name(&self, name: &str) -> String {
        format!("{name}{}", self.suffix)
    }
}

fn candidate_dirs(spec: &KindSpec, context: &Context) -> Vec<PathBuf> {
    let mut dirs = vec![context.file_path().join(spec.directory)];
    if let Some(additional) = context.config().get_string(spec.additional_directory_key) {
        let extra = context.file_path().join(additional);
        if !dirs.contains(&extra) {
            dirs.push(extra);
        }
    }
    dirs
}

/// Replaces the sidecar field with the referenced file's contents when that
/// file exists next to the resource.
fn inline_sidecar(sidecar: &Sidecar, file: &Path, resource: &mut Resource) -> Result<()> {
    let Some(Value::String(reference)) = resource.get(sidecar.field) else {
        return Ok(());
    };
    let (Some(dir), Some(file_name)) = (file.parent(), sidecar_file_name(reference)) else {
        return Ok(());
    };

    let sidecar_path = dir.join(file_name);
    if is_file(&sidecar_path) {
        let contents = load_text(&sidecar_path)?;
        resource.insert(sidecar.field.to_string(), Value::String(contents));
    }
    Ok(())
}

/// Returns the bare file name a sidecar reference points at, or `None` when
/// the reference leaves the resource's directory.
fn sidecar_file_name(reference: &str) -> Option<&OsStr> {
    let reference = reference.strip_prefix("./").unwrap_or(reference);
    let mut components = Path::new(reference).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => Some(name),
        _ => None,
    }
}

fn dump_resources(spec: &KindSpec, root: &Path, resources: &mut [Resource]) -> Result<()> {
    // Every name is checked before anything is written
    let names = plan_file_names(spec, resources)?;

    let dir = root.join(spec.directory);
    ensure_dir(&dir)?;

    for (resource, name) in resources.iter_mut().zip(names) {
        let Some(name) = name else {
            continue;
        };

        if let Some(sidecar) = &spec.sidecar {
            externalize_sidecar(sidecar, &dir, &name, resource)?;
        }
        normalize_transient_arrays(spec.transient_arrays, resource);

        let file = dir.join(format!("{name}.json"));
        let json = serde_json::to_string_pretty(resource).map_err(|source| Error::Serialize {
            path: file.clone(),
            source,
        })?;
        write_text(&file, &json)?;
    }

    Ok(())
}

/// Computes the file stem for every resource. Empty records map to `None`
/// and are skipped.
///
/// Names are compared case-insensitively since common filesystems are.
fn plan_file_names(spec: &KindSpec, resources: &[Resource]) -> Result<Vec<Option<String>>> {
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut planned = Vec::with_capacity(resources.len());

    for (index, resource) in resources.iter().enumerate() {
        if resource.is_empty() {
            planned.push(None);
            continue;
        }

        let missing = || Error::MissingIdentifier {
            kind: spec.name,
            index,
        };
        let original = resource.get("name").and_then(Value::as_str).ok_or_else(missing)?;
        let file_name = sanitize(original);
        if file_name.is_empty() {
            return Err(missing());
        }

        match seen.entry(file_name.to_lowercase()) {
            Entry::Occupied(entry) => {
                return Err(Error::NameCollision {
                    kind: spec.name,
                    first: entry.get().clone(),
                    second: original.to_string(),
                    file_name,
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(original.to_string());
            }
        }

        planned.push(Some(file_name));
    }

    Ok(planned)
}

/// Moves a populated sidecar field into its own file and points the field at
/// it.
fn externalize_sidecar(sidecar: &Sidecar, dir: &Path, name: &str, resource: &mut Resource) -> Result<()> {
    let Some(Value::String(contents)) = resource.get(sidecar.field) else {
        return Ok(());
    };
    if contents.is_empty() {
        return Ok(());
    }

    let file_name = sidecar.file_name(name);
    write_text(&dir.join(&file_name), contents)?;
    resource.insert(sidecar.field.to_string(), Value::String(format!("./{file_name}")));
    Ok(())
}

fn normalize_transient_arrays(fields: &[&str], resource: &mut Resource) {
    for field in fields {
        if let Some(value) = resource.get_mut(*field) {
            if value.is_null() {
                *value = Value::Array(Vec::new());
            }
        }
    }
}
