//! Glue between the command line, the table sources and the engine.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tax_core::tables::TableSourceConfig;
use tax_core::{FilingStatusCode, FilingStatusData, HouseholdIncome, TaxTableRepository};
use tracing::{info, warn};

pub use tax_data::build_registry;

/// Opens the table source named by `backend`.
pub async fn open_source(
    backend: &str,
    location: &str,
) -> Result<Box<dyn TaxTableRepository>> {
    let config = TableSourceConfig {
        backend: backend.to_string(),
        location: location.to_string(),
    };

    build_registry()
        .create(&config)
        .await
        .with_context(|| format!("Failed to open '{backend}' tax tables"))
}

/// Loads the reference data for one year and filing status.
pub async fn load_filing_status(
    repo: &dyn TaxTableRepository,
    tax_year: i32,
    status: FilingStatusCode,
) -> Result<FilingStatusData> {
    let data = repo
        .get_filing_status_data(tax_year, status)
        .await
        .with_context(|| format!("No {status} tax table for {tax_year}"))?;

    info!(
        tax_year,
        status = status.as_str(),
        standard_deduction = %data.standard_deduction,
        "loaded filing status data"
    );

    Ok(data)
}

/// One line per available year listing its filing statuses.
pub async fn describe_tables(repo: &dyn TaxTableRepository) -> Result<String> {
    let mut out = String::new();

    for year in repo.list_tax_years().await.context("Failed to list tax years")? {
        let table = repo
            .load_tax_table(year)
            .await
            .with_context(|| format!("Failed to load {year} tax table"))?;
        let codes: Vec<_> = table
            .filing_statuses()
            .iter()
            .map(|status| status.as_str())
            .collect();
        writeln!(out, "{year}: {}", codes.join(", "))?;
    }

    Ok(out)
}

/// Builds the household state from command-line amounts.
///
/// `total_income`, when given, moves the top of the stack and replaces
/// `ltcg_income`. Negative amounts are floored to zero with a warning.
pub fn household_income(
    regular_income: Decimal,
    ltcg_income: Decimal,
    total_income: Option<Decimal>,
) -> HouseholdIncome {
    for (name, amount) in [
        ("regular income", Some(regular_income)),
        ("ltcg income", Some(ltcg_income)),
        ("total income", total_income),
    ] {
        if let Some(amount) = amount.filter(|a| *a < Decimal::ZERO) {
            warn!(%amount, "{name} is negative; using zero");
        }
    }

    let income = HouseholdIncome::default().with_regular_income(regular_income);
    match total_income {
        Some(total) => income.with_total_income(total),
        None => income.with_ltcg_income(ltcg_income),
    }
}
