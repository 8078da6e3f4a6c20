//! Clients: `clients/<name>.json`, with an optional custom login page in
//! `clients/<name>_custom_login_page.html`.

use super::{KindSpec, Sidecar};
use crate::config::keys;

pub(super) static SPEC: KindSpec = KindSpec {
    name: "clients",
    directory: "clients",
    additional_directory_key: keys::ADDITIONAL_CLIENTS_DIRECTORY,
    sidecar: Some(Sidecar {
        field: "custom_login_page",
        suffix: "_custom_login_page.html",
    }),
    transient_arrays: &[
        "allowed_clients",
        "allowed_logout_urls",
        "allowed_origins",
        "callbacks",
    ],
};
