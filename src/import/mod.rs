//! The import pipeline: assemble the context, load the directory tree, hand
//! the assets to the deploy engine, then run the post-deploy fix-up.

mod reconcile;

use std::sync::Arc;

use crate::api::{DeployEngine, ManagementApi};
use crate::config::keys;
use crate::context::{assemble, Context, ImportParams};
use crate::{Error, Result};

pub use reconcile::{enable_flagged_clients, ReconcileOutcome, APP_TYPE};

/// Result of a successful import.
#[derive(Debug)]
pub struct ImportReport {
    pub context: Context,
    /// `None` when the database connection fix-up is disabled.
    pub reconcile: Option<ReconcileOutcome>,
}

/// Runs an import using the process environment.
pub async fn import(
    params: &ImportParams,
    api: Arc<dyn ManagementApi>,
    engine: &dyn DeployEngine,
) -> Result<ImportReport> {
    let context = assemble(params)?;
    run(context, api, engine).await
}

/// Runs an import with an already assembled context.
pub async fn run(
    context: Context,
    api: Arc<dyn ManagementApi>,
    engine: &dyn DeployEngine,
) -> Result<ImportReport> {
    let mut context = context.with_api_client(Arc::clone(&api));
    context.load()?;

    engine
        .deploy(context.assets(), api.as_ref(), context.config())
        .await
        .map_err(Error::Api)?;

    let reconcile = if context
        .config()
        .get_bool(keys::ALLOW_AUTO_ENABLE_DATABASE_CONNECTION)
        .unwrap_or(false)
    {
        tracing::info!("Attempting to automatically enable the database connection for some clients");
        Some(enable_flagged_clients(api.as_ref(), context.config()).await?)
    } else {
        None
    };

    tracing::info!("Import successful");
    Ok(ImportReport { context, reconcile })
}
