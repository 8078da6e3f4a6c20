use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::directory::handlers::ResourceKind;

/// One resource record, e.g. a single client definition.
pub type Resource = Map<String, Value>;

/// Loaded resource collections, keyed by kind.
///
/// A kind that was parsed but had no files is stored as `None`; a kind that
/// was never parsed is absent. Both read as "nothing to deploy" through
/// [`get`](Self::get).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assets {
    collections: BTreeMap<ResourceKind, Option<Vec<Resource>>>,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: ResourceKind) -> Option<&[Resource]> {
        self.collections.get(&kind)?.as_deref()
    }

    pub fn get_mut(&mut self, kind: ResourceKind) -> Option<&mut Vec<Resource>> {
        self.collections.get_mut(&kind)?.as_mut()
    }

    pub fn set(&mut self, kind: ResourceKind, resources: Option<Vec<Resource>>) {
        self.collections.insert(kind, resources);
    }

    /// Whether `kind` has been parsed, regardless of whether it had data.
    pub fn is_loaded(&self, kind: ResourceKind) -> bool {
        self.collections.contains_key(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Kinds that carry a collection, in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &[Resource])> {
        self.collections
            .iter()
            .filter_map(|(kind, resources)| Some((*kind, resources.as_deref()?)))
    }
}
