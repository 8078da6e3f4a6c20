//! Rules: `rules/<name>.json`, with the rule body in `rules/<name>.js`.

use super::{KindSpec, Sidecar};
use crate::config::keys;

pub(super) static SPEC: KindSpec = KindSpec {
    name: "rules",
    directory: "rules",
    additional_directory_key: keys::ADDITIONAL_RULES_DIRECTORY,
    sidecar: Some(Sidecar {
        field: "script",
        suffix: ".js",
    }),
    transient_arrays: &[],
};
