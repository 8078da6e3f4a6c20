//! Resource servers: `resource-servers/<name>.json`.

use super::KindSpec;
use crate::config::keys;

pub(super) static SPEC: KindSpec = KindSpec {
    name: "resourceServers",
    directory: "resource-servers",
    additional_directory_key: keys::ADDITIONAL_RESOURCE_SERVERS_DIRECTORY,
    sidecar: None,
    transient_arrays: &[],
};
