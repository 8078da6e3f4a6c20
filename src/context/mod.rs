//! Per-invocation context: resolved configuration, directory root, keyword
//! mappings and loaded assets.

mod assemble;
mod assets;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::ManagementApi;
use crate::config::{keys, ConfigError, Configuration};
use crate::directory::handlers::ResourceKind;
use crate::keywords::KeywordMappings;
use crate::Error;

pub use assemble::{assemble, assemble_with_env, build_configuration, ImportParams};
pub use assets::{Assets, Resource};

/// Everything a single sync operation works on.
///
/// `assets` starts empty and is filled by [`load`](Self::load).
///
/// ## Example
///
/// ```no_run
/// use tenant_sync::{Configuration, Context};
///
/// let mut ctx = Context::builder()
///     .with_file_path("tenant")
///     .with_config(Configuration::default())
///     .build()?;
///
/// ctx.load()?;
/// # Ok::<(), tenant_sync::Error>(())
/// ```
pub struct Context {
    file_path: PathBuf,
    config: Configuration,
    mappings: KeywordMappings,
    assets: Assets,
    api_client: Option<Arc<dyn ManagementApi>>,
}

impl Context {
    /// Creates a new builder for constructing a `Context`.
    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    /// Root of the directory tree.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn mappings(&self) -> &KeywordMappings {
        &self.mappings
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut Assets {
        &mut self.assets
    }

    pub fn api_client(&self) -> Option<&Arc<dyn ManagementApi>> {
        self.api_client.as_ref()
    }

    /// Attaches the client used to talk to the tenant.
    pub fn with_api_client(mut self, client: Arc<dyn ManagementApi>) -> Self {
        self.api_client = Some(client);
        self
    }

    /// Parses every resource kind from the directory tree into `assets`.
    ///
    /// Meant to run once per context; a second call re-reads the tree and
    /// replaces what the first one stored.
    pub fn load(&mut self) -> Result<(), Error> {
        for kind in ResourceKind::ALL {
            let resources = kind.parse(self)?;
            self.assets.set(kind, resources);
        }
        tracing::info!(path = %self.file_path.display(), "Loaded tenant configuration");
        Ok(())
    }

    /// Writes every loaded resource kind back to the directory tree.
    pub fn dump(&mut self) -> Result<(), Error> {
        for kind in ResourceKind::ALL {
            kind.dump(self)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("file_path", &self.file_path)
            .field("config", &self.config)
            .field("mappings", &self.mappings)
            .field("assets", &self.assets)
            .field("api_client", &self.api_client.is_some())
            .finish()
    }
}

/// Builder for constructing a [`Context`].
///
/// A configuration is required. The file path and keyword mappings default
/// to what the configuration names.
#[derive(Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct ContextBuilder {
    file_path: Option<PathBuf>,
    config: Option<Configuration>,
    mappings: Option<KeywordMappings>,
}

impl ContextBuilder {
    /// Sets the root of the directory tree.
    pub fn with_file_path(mut self, path: impl AsRef<Path>) -> Self {
        self.file_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Attaches the resolved configuration.
    pub fn with_config(mut self, config: Configuration) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the keyword mappings read from the configuration.
    pub fn with_mappings(mut self, mappings: KeywordMappings) -> Self {
        self.mappings = Some(mappings);
        self
    }

    /// Builds the `Context`.
    ///
    /// Returns an error if no configuration was provided, or if no file path
    /// was given and the configuration does not name one.
    pub fn build(self) -> Result<Context, Error> {
        let config = self.config.ok_or(Error::MissingConfig)?;

        let file_path = match self.file_path {
            Some(path) => path,
            None => config
                .get_string(keys::INPUT_FILE)
                .map(PathBuf::from)
                .ok_or(ConfigError::MissingKey(keys::INPUT_FILE))?,
        };
        let mappings = self
            .mappings
            .unwrap_or_else(|| KeywordMappings::from_config(&config));

        Ok(Context {
            file_path,
            config,
            mappings,
            assets: Assets::new(),
            api_client: None,
        })
    }
}
