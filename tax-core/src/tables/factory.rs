use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use super::repository::{TableError, TaxTableRepository};

/// Source-agnostic table configuration.
///
/// `backend` must match the [`TableSourceFactory::backend_name`] of a
/// registered factory.  `location` is passed through to that factory
/// unchanged; its meaning is entirely backend-specific.
///
/// | backend    | location examples                        |
/// |------------|------------------------------------------|
/// | `embedded` | ignored                                  |
/// | `csv`      | `data/`, empty for the default directory |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSourceConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"csv"`).
    pub backend: String,
    /// Opaque value forwarded to the factory's `create` method.
    pub location: String,
}

impl Default for TableSourceConfig {
    fn default() -> Self {
        Self {
            backend: "embedded".to_string(),
            location: String::new(),
        }
    }
}

/// One implementation per table source.  Each source exports a unit struct
/// that implements this trait and is registered with a
/// [`TableSourceRegistry`] at startup.
#[async_trait]
pub trait TableSourceFactory: Send + Sync {
    /// Unique, lowercase identifier for this source.
    fn backend_name(&self) -> &'static str;

    /// Open the source and return a ready-to-use repository.
    async fn create(
        &self,
        config: &TableSourceConfig,
    ) -> Result<Box<dyn TaxTableRepository>, TableError>;
}

/// Registry of [`TableSourceFactory`] instances, keyed by backend name.
pub struct TableSourceRegistry {
    factories: HashMap<&'static str, Box<dyn TableSourceFactory>>,
}

impl TableSourceRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a source factory, replacing any with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn TableSourceFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered source, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend`.
    ///
    /// # Errors
    /// * [`TableError::Configuration`] when no factory is registered for the
    ///   requested backend name.
    /// * Any error the chosen factory itself returns.
    pub async fn create(
        &self,
        config: &TableSourceConfig,
    ) -> Result<Box<dyn TaxTableRepository>, TableError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                TableError::Configuration(format!(
                    "unknown table source '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        debug!(backend = %config.backend, location = %config.location, "opening table source");
        factory.create(config).await
    }
}

impl Default for TableSourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
