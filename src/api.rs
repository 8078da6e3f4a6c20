//! Interfaces to the management API client and the deploy engine.
//!
//! Both are implemented outside this crate. Their errors are passed through
//! untouched.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::Configuration;
use crate::context::Assets;

/// Error returned by a collaborator.
pub type ApiError = Box<dyn std::error::Error + Send + Sync>;

/// A client (application) as returned by the management API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_type: Option<String>,
    #[serde(default)]
    pub client_metadata: Map<String, Value>,
}

impl Client {
    /// Returns the metadata value under `key` if it is a string.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.client_metadata.get(key).and_then(Value::as_str)
    }
}

/// A connection as returned by the management API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub enabled_clients: Vec<String>,
}

/// Query parameters for listing clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_type: Option<String>,
}

impl ClientFilter {
    pub fn app_type(app_type: impl Into<String>) -> Self {
        Self {
            app_type: Some(app_type.into()),
        }
    }
}

/// Partial update of a connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionPatch {
    pub enabled_clients: Vec<String>,
}

/// The management API, as far as this crate uses it.
#[async_trait]
pub trait ManagementApi: Send + Sync {
    /// Returns `None` if no connection has this id.
    async fn get_connection(&self, id: &str) -> Result<Option<Connection>, ApiError>;

    async fn get_clients(&self, filter: &ClientFilter) -> Result<Vec<Client>, ApiError>;

    async fn update_connection(
        &self,
        id: &str,
        patch: &ConnectionPatch,
    ) -> Result<Connection, ApiError>;
}

/// Applies loaded assets to the tenant.
#[async_trait]
pub trait DeployEngine: Send + Sync {
    async fn deploy(
        &self,
        assets: &Assets,
        api: &dyn ManagementApi,
        config: &Configuration,
    ) -> Result<(), ApiError>;
}
