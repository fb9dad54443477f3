use std::path::PathBuf;

use async_trait::async_trait;
use tax_core::tables::{TableSourceConfig, TableSourceFactory, TableSourceRegistry};
use tax_core::{TableError, TaxTableRepository};

use crate::repository::StaticTaxTables;

/// Resolve the CSV data directory when no location is configured.
///
/// Resolution order:
/// 1. **`TAX_DATA_DIR`** if set (override for packagers or custom layouts).
/// 2. **`./data`** if the directory exists in the current working directory.
/// 3. **Crate manifest dir** `$CARGO_MANIFEST_DIR/data` as last resort
///    (dev/tests when run from the build tree).
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TAX_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let cwd_data = PathBuf::from("./data");
    if cwd_data.is_dir() {
        return cwd_data;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// [`TableSourceFactory`] for the tables compiled into the binary.
pub struct EmbeddedSourceFactory;

#[async_trait]
impl TableSourceFactory for EmbeddedSourceFactory {
    fn backend_name(&self) -> &'static str {
        "embedded"
    }

    async fn create(
        &self,
        _config: &TableSourceConfig,
    ) -> Result<Box<dyn TaxTableRepository>, TableError> {
        Ok(Box::new(StaticTaxTables::embedded()?))
    }
}

/// [`TableSourceFactory`] for a directory of CSV files.
///
/// `config.location` names the directory; an empty location falls back to
/// [`default_data_dir`].
pub struct CsvSourceFactory;

#[async_trait]
impl TableSourceFactory for CsvSourceFactory {
    fn backend_name(&self) -> &'static str {
        "csv"
    }

    async fn create(
        &self,
        config: &TableSourceConfig,
    ) -> Result<Box<dyn TaxTableRepository>, TableError> {
        let dir = if config.location.trim().is_empty() {
            default_data_dir()
        } else {
            PathBuf::from(&config.location)
        };
        Ok(Box::new(StaticTaxTables::from_dir(&dir).await?))
    }
}

/// A registry with every table source this crate provides.
pub fn build_registry() -> TableSourceRegistry {
    let mut registry = TableSourceRegistry::new();
    registry.register(Box::new(EmbeddedSourceFactory));
    registry.register(Box::new(CsvSourceFactory));
    registry
}
