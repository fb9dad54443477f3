use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use tax_cli::app::{describe_tables, household_income, load_filing_status, open_source};
use tax_cli::logging::{enable_file_logging, init_logging};
use tax_cli::report::TaxReport;
use tax_cli::utils::{parse_decimal, parse_filing_status};
use tax_core::FilingStatusCode;
use tracing::debug;

/// Compute federal income tax for a household's regular income and
/// long-term capital gains.
#[derive(Parser, Debug)]
#[command(name = "bracket-tax")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Table source backend ("embedded" or "csv")
    #[arg(long, default_value = "embedded")]
    source: String,

    /// Directory for the csv source (defaults to TAX_DATA_DIR or ./data)
    #[arg(long, default_value = "")]
    data: String,

    /// Tax year
    #[arg(short, long, default_value_t = 2025)]
    year: i32,

    /// Filing status (S, MFJ, MFS, HOH, QSS)
    #[arg(short, long, default_value = "MFJ", value_parser = parse_filing_status)]
    status: FilingStatusCode,

    /// Wages, interest and other ordinary income
    #[arg(
        short,
        long,
        default_value = "0",
        value_parser = parse_decimal,
        allow_negative_numbers = true
    )]
    regular_income: Decimal,

    /// Long-term capital gains and qualified dividends
    #[arg(
        short,
        long,
        default_value = "0",
        value_parser = parse_decimal,
        allow_negative_numbers = true
    )]
    ltcg_income: Decimal,

    /// Total income; long-term gains become whatever exceeds regular income
    #[arg(
        short,
        long,
        value_parser = parse_decimal,
        allow_negative_numbers = true,
        conflicts_with = "ltcg_income"
    )]
    total_income: Option<Decimal>,

    /// List the available tax years and filing statuses, then exit
    #[arg(long)]
    list: bool,

    /// Log filter, e.g. "debug" or "tax_core=trace" (RUST_LOG wins)
    #[arg(long)]
    log_level: Option<String>,

    /// Also append log output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_level.as_deref());
    if let Some(path) = &cli.log_file {
        enable_file_logging(path).context("Failed to enable file logging")?;
    }
    debug!(?cli, "starting");

    let repo = open_source(&cli.source, &cli.data).await?;

    if cli.list {
        print!("{}", describe_tables(&*repo).await?);
        return Ok(());
    }

    let data = load_filing_status(&*repo, cli.year, cli.status).await?;
    let income = household_income(cli.regular_income, cli.ltcg_income, cli.total_income);
    let report = TaxReport::new(cli.year, cli.status, &data, income);

    println!("{report}");

    debug!(total_tax = %report.computation.total_tax, "done");
    Ok(())
}
