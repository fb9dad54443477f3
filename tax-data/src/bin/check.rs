use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tax_data::{BRACKETS_FILE, DEDUCTIONS_FILE, TaxTableLoader, default_data_dir};
use tracing_subscriber::EnvFilter;

/// Validate a directory of tax table CSV files and summarise its contents.
///
/// The directory must contain:
/// - tax_brackets.csv: tax_year, filing_status, kind, min_income, max_income, rate
/// - standard_deductions.csv: tax_year, filing_status, amount
#[derive(Parser, Debug)]
#[command(name = "tax-table-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the CSV files (defaults to TAX_DATA_DIR or ./data)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Only summarise this tax year
    #[arg(short, long)]
    year: Option<i32>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();

    let args = Args::parse();
    let dir = args.dir.unwrap_or_else(default_data_dir);

    let brackets_path = dir.join(BRACKETS_FILE);
    let deductions_path = dir.join(DEDUCTIONS_FILE);

    println!("Checking tax tables in: {}", dir.display());

    let brackets = File::open(&brackets_path)
        .with_context(|| format!("Failed to open: {}", brackets_path.display()))?;
    let brackets = TaxTableLoader::parse_brackets(brackets)
        .with_context(|| format!("Failed to parse CSV: {}", brackets_path.display()))?;

    let deductions = File::open(&deductions_path)
        .with_context(|| format!("Failed to open: {}", deductions_path.display()))?;
    let deductions = TaxTableLoader::parse_deductions(deductions)
        .with_context(|| format!("Failed to parse CSV: {}", deductions_path.display()))?;

    println!(
        "Parsed {} bracket rows and {} standard deductions",
        brackets.len(),
        deductions.len()
    );

    let tables =
        TaxTableLoader::build(&brackets, &deductions).context("Tax tables failed validation")?;

    for (year, table) in &tables {
        if args.year.is_some_and(|wanted| wanted != *year) {
            continue;
        }
        println!("{year}:");
        for (status, data) in &table.statuses {
            println!(
                "  {:<28} deduction {:>8}  ordinary brackets {}  ltcg brackets {}",
                status.label(),
                data.standard_deduction,
                data.ordinary_income_brackets.len(),
                data.ltcg_brackets.len()
            );
        }
    }

    println!("All tables are valid.");

    Ok(())
}
