use async_trait::async_trait;
use thiserror::Error;

use crate::models::{FilingStatusCode, FilingStatusData, TaxTable};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("no tax table for year {0}")]
    YearNotFound(i32),

    #[error("no {status} data in the {tax_year} tax table")]
    FilingStatusNotFound {
        tax_year: i32,
        status: FilingStatusCode,
    },

    #[error("failed to load tax tables: {0}")]
    Load(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Source of per-year bracket tables.
///
/// Embedded constants and external files sit behind the same trait, so the
/// engine's callers load a table once at startup without caring where it
/// came from.
#[async_trait]
pub trait TaxTableRepository: Send + Sync {
    /// Tax years this source can provide, ascending.
    async fn list_tax_years(&self) -> Result<Vec<i32>, TableError>;

    async fn load_tax_table(
        &self,
        tax_year: i32,
    ) -> Result<TaxTable, TableError>;

    async fn get_filing_status_data(
        &self,
        tax_year: i32,
        status: FilingStatusCode,
    ) -> Result<FilingStatusData, TableError> {
        let mut table = self.load_tax_table(tax_year).await?;
        table
            .statuses
            .remove(&status)
            .ok_or(TableError::FilingStatusNotFound { tax_year, status })
    }
}
