use std::path::Path;

use super::env::EnvSource;
use super::file::FileSource;
use super::source::{deep_merge, ConfigSource, MemorySource, Table};
use super::{ConfigError, Configuration};

/// Builder for assembling a [`Configuration`] from layered sources.
///
/// Sources are merged in registration order, with later sources overriding
/// earlier ones. Nested objects are merged recursively; other values
/// (including arrays) are replaced entirely.
///
/// Register the lowest-precedence layer first:
///
/// ```no_run
/// use tenant_sync::config::{Configuration, EnvSource, Table};
///
/// let config = Configuration::builder()
///     .with_defaults(Table::new())
///     .with_env(EnvSource::new("AUTH0_"))
///     .with_file("config.json", true)
///     .with_overrides(Table::new())
///     .build()?;
/// # Ok::<(), tenant_sync::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct ConfigBuilder {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigBuilder {
    /// Adds the built-in default values.
    pub fn with_defaults(self, defaults: Table) -> Self {
        self.with_source(MemorySource::new(defaults))
    }

    /// Adds environment variables as a layer.
    pub fn with_env(self, env: EnvSource) -> Self {
        self.with_source(env)
    }

    /// Adds a JSON or TOML file to be loaded.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(FileSource::new(path, required))
    }

    /// Adds explicitly supplied values.
    pub fn with_overrides(self, overrides: Table) -> Self {
        self.with_source(MemorySource::new(overrides))
    }

    /// Adds any other source.
    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Loads every source and merges them into a single configuration.
    pub fn build(self) -> Result<Configuration, ConfigError> {
        let mut merged = Table::new();

        for source in &self.sources {
            let layer = source.load()?;
            tracing::debug!(?source, keys = layer.len(), "merging configuration layer");
            deep_merge(&mut merged, layer);
        }

        Ok(Configuration::from_table(merged))
    }
}
