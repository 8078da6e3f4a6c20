//! Post-deploy fix-up that enables the database connection for every client
//! flagged in its metadata.

use crate::api::{ClientFilter, ConnectionPatch, ManagementApi};
use crate::config::{keys, Configuration};
use crate::{Error, Result};

/// Only clients of this application type are considered.
pub const APP_TYPE: &str = "regular_web";

/// Metadata value that marks a client for the connection.
const FLAG_VALUE: &str = "true";

/// What [`enable_flagged_clients`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No connection id is configured.
    NotConfigured,
    ConnectionNotFound,
    NoFlaggedClients,
    /// Every flagged client was already enabled; no update was sent.
    AlreadyEnabled,
    Updated { added: Vec<String> },
}

/// Adds every flagged `regular_web` client to the configured connection's
/// enabled clients. Existing entries keep their order and new ones are
/// appended. The connection is only updated when the set actually changes.
pub async fn enable_flagged_clients(
    api: &dyn ManagementApi,
    config: &Configuration,
) -> Result<ReconcileOutcome> {
    let Some(connection_id) = config.get_string(keys::DATABASE_CONNECTION_ID) else {
        tracing::warn!(
            "{} is not set, skipping database connection update",
            keys::DATABASE_CONNECTION_ID
        );
        return Ok(ReconcileOutcome::NotConfigured);
    };
    let metakey = config
        .get_string(keys::DATABASE_CONNECTION_CLIENT_METAKEY)
        .unwrap_or_else(|| keys::DEFAULT_DATABASE_CONNECTION_CLIENT_METAKEY.to_string());

    let Some(connection) = api.get_connection(&connection_id).await.map_err(Error::Api)? else {
        tracing::info!(%connection_id, "connection not found, nothing to enable");
        return Ok(ReconcileOutcome::ConnectionNotFound);
    };

    let clients = api
        .get_clients(&ClientFilter::app_type(APP_TYPE))
        .await
        .map_err(Error::Api)?;

    let flagged: Vec<String> = clients
        .into_iter()
        .filter(|client| client.metadata_str(&metakey) == Some(FLAG_VALUE))
        .map(|client| client.client_id)
        .collect();

    if flagged.is_empty() {
        return Ok(ReconcileOutcome::NoFlaggedClients);
    }

    let (enabled, added) = union(&connection.enabled_clients, flagged);
    if added.is_empty() {
        return Ok(ReconcileOutcome::AlreadyEnabled);
    }

    api.update_connection(
        &connection.id,
        &ConnectionPatch {
            enabled_clients: enabled,
        },
    )
    .await
    .map_err(Error::Api)?;

    tracing::info!(
        connection = %connection.id,
        added = added.len(),
        "enabled database connection for flagged clients"
    );
    Ok(ReconcileOutcome::Updated { added })
}

/// Appends the ids in `new` that are not yet in `current`, dropping
/// duplicates. Returns the union and the ids that were added.
fn union(current: &[String], new: Vec<String>) -> (Vec<String>, Vec<String>) {
    let mut merged: Vec<String> = Vec::with_capacity(current.len() + new.len());
    for id in current {
        if !merged.contains(id) {
            merged.push(id.clone());
        }
    }

    let mut added = Vec::new();
    for id in new {
        if !merged.contains(&id) {
            merged.push(id.clone());
            added.push(id);
        }
    }
    (merged, added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_union_appends_new_ids() {
        let (merged, added) = union(&ids(&["a", "b"]), ids(&["b", "c"]));

        assert_eq!(merged, ids(&["a", "b", "c"]));
        assert_eq!(added, ids(&["c"]));
    }

    #[test]
    fn test_union_collapses_duplicates_in_both_inputs() {
        let (merged, added) = union(&ids(&["a", "a"]), ids(&["c", "c", "a"]));

        assert_eq!(merged, ids(&["a", "c"]));
        assert_eq!(added, ids(&["c"]));
    }

    #[test]
    fn test_union_with_nothing_new() {
        let (merged, added) = union(&ids(&["a", "b"]), ids(&["b"]));

        assert_eq!(merged, ids(&["a", "b"]));
        assert!(added.is_empty());
    }
}
