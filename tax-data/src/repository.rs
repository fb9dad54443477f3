use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tax_core::{TableError, TaxTable, TaxTableRepository};
use tracing::info;

use crate::loader::{TaxTableLoader, TaxTableLoaderError};

pub const BRACKETS_FILE: &str = "tax_brackets.csv";
pub const DEDUCTIONS_FILE: &str = "standard_deductions.csv";

const EMBEDDED_BRACKETS: &str = include_str!("../data/tax_brackets.csv");
const EMBEDDED_DEDUCTIONS: &str = include_str!("../data/standard_deductions.csv");

/// Tax tables held in memory after a one-off load.
///
/// Both the embedded data and CSV directories end up here, so callers see
/// one [`TaxTableRepository`] regardless of where the figures came from.
#[derive(Debug, Clone)]
pub struct StaticTaxTables {
    tables: BTreeMap<i32, TaxTable>,
}

impl StaticTaxTables {
    pub fn new(tables: BTreeMap<i32, TaxTable>) -> Self {
        Self { tables }
    }

    /// Tables compiled into the binary (2024 and 2025 federal figures).
    pub fn embedded() -> Result<Self, TaxTableLoaderError> {
        Self::from_csv_str(EMBEDDED_BRACKETS, EMBEDDED_DEDUCTIONS)
    }

    pub fn from_csv_str(
        brackets: &str,
        deductions: &str,
    ) -> Result<Self, TaxTableLoaderError> {
        let brackets = TaxTableLoader::parse_brackets(brackets.as_bytes())?;
        let deductions = TaxTableLoader::parse_deductions(deductions.as_bytes())?;
        let tables = TaxTableLoader::build(&brackets, &deductions)?;
        Ok(Self::new(tables))
    }

    /// Reads [`BRACKETS_FILE`] and [`DEDUCTIONS_FILE`] from `dir`.
    pub async fn from_dir(dir: &Path) -> Result<Self, TaxTableLoaderError> {
        let brackets = read_file(dir.join(BRACKETS_FILE)).await?;
        let deductions = read_file(dir.join(DEDUCTIONS_FILE)).await?;

        let repo = Self::from_csv_str(&brackets, &deductions)?;
        info!(dir = %dir.display(), years = ?repo.tables.keys().collect::<Vec<_>>(), "loaded tax tables");
        Ok(repo)
    }
}

async fn read_file(path: PathBuf) -> Result<String, TaxTableLoaderError> {
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| TaxTableLoaderError::Io { path, source })
}

#[async_trait]
impl TaxTableRepository for StaticTaxTables {
    async fn list_tax_years(&self) -> Result<Vec<i32>, TableError> {
        Ok(self.tables.keys().copied().collect())
    }

    async fn load_tax_table(
        &self,
        tax_year: i32,
    ) -> Result<TaxTable, TableError> {
        self.tables
            .get(&tax_year)
            .cloned()
            .ok_or(TableError::YearNotFound(tax_year))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::{FilingStatusCode, TaxBracket};

    use super::*;

    #[tokio::test]
    async fn embedded_tables_cover_2024_and_2025() {
        let repo = StaticTaxTables::embedded().expect("embedded data is valid");

        assert_eq!(repo.list_tax_years().await, Ok(vec![2024, 2025]));
    }

    #[tokio::test]
    async fn embedded_tables_have_every_filing_status() {
        let repo = StaticTaxTables::embedded().expect("embedded data is valid");

        for year in [2024, 2025] {
            let table = repo.load_tax_table(year).await.expect("table");
            assert_eq!(table.filing_statuses(), FilingStatusCode::all().to_vec());
        }
    }

    #[tokio::test]
    async fn embedded_mfj_2025_figures() {
        let repo = StaticTaxTables::embedded().expect("embedded data is valid");

        let data = repo
            .get_filing_status_data(2025, FilingStatusCode::MarriedFilingJointly)
            .await
            .expect("MFJ 2025");

        assert_eq!(data.standard_deduction, dec!(30000));
        assert_eq!(data.ordinary_income_brackets.len(), 7);
        assert_eq!(
            data.ltcg_brackets,
            vec![
                TaxBracket::new(dec!(0.00), dec!(0), Some(dec!(96700))),
                TaxBracket::new(dec!(0.15), dec!(96700), Some(dec!(600050))),
                TaxBracket::new(dec!(0.20), dec!(600050), None),
            ]
        );
    }

    #[tokio::test]
    async fn embedded_qss_matches_mfj() {
        let repo = StaticTaxTables::embedded().expect("embedded data is valid");
        let table = repo.load_tax_table(2024).await.expect("2024");

        assert_eq!(
            table.get(FilingStatusCode::QualifyingSurvivingSpouse),
            table.get(FilingStatusCode::MarriedFilingJointly)
        );
    }

    #[tokio::test]
    async fn embedded_single_2024_deduction() {
        let repo = StaticTaxTables::embedded().expect("embedded data is valid");

        let data = repo
            .get_filing_status_data(2024, FilingStatusCode::Single)
            .await
            .expect("S 2024");

        assert_eq!(data.standard_deduction, dec!(14600));
        let top = data.ordinary_income_brackets.last().expect("top bracket");
        assert_eq!(top.min_income, dec!(609350));
        assert_eq!(top.tax_rate, dec!(0.37));
    }

    #[tokio::test]
    async fn unknown_year_is_not_found() {
        let repo = StaticTaxTables::embedded().expect("embedded data is valid");

        assert_eq!(
            repo.load_tax_table(1999).await,
            Err(TableError::YearNotFound(1999))
        );
    }

    #[tokio::test]
    async fn from_dir_reports_missing_files() {
        let err = StaticTaxTables::from_dir(Path::new("/this/path/does/not/exist"))
            .await
            .expect_err("missing directory");

        match err {
            TaxTableLoaderError::Io { path, .. } => {
                assert!(path.ends_with(BRACKETS_FILE));
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
