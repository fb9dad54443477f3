//! CSV loader for per-year tax tables.
//!
//! Two files make up a table set:
//!
//! `tax_brackets.csv`
//!
//! | Column          | Type    | Notes                                          |
//! |-----------------|---------|------------------------------------------------|
//! | `tax_year`      | integer | e.g. `2025`                                    |
//! | `filing_status` | string  | `S`, `MFJ`, ... ; `MFJ\|QSS` applies to both   |
//! | `kind`          | string  | `ordinary` or `ltcg`                           |
//! | `min_income`    | decimal | lower bound, inclusive                         |
//! | `max_income`    | decimal | upper bound, exclusive; empty for unbounded    |
//! | `rate`          | decimal | marginal rate as a fraction (e.g. `0.10`)      |
//!
//! `standard_deductions.csv`
//!
//! | Column          | Type    |
//! |-----------------|---------|
//! | `tax_year`      | integer |
//! | `filing_status` | string  |
//! | `amount`        | decimal |
//!
//! Headers are matched by name and surrounding whitespace is ignored.

use std::collections::{BTreeMap, btree_map::Entry};
use std::fmt;
use std::io::Read;
use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{FilingStatusCode, FilingStatusData, TableError, TaxBracket, TaxTable};
use thiserror::Error;
use tracing::{debug, info};

use crate::validate::{BracketValidationError, validate_brackets};

/// Which schedule a bracket row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BracketKind {
    Ordinary,
    Ltcg,
}

impl BracketKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ordinary => "ordinary",
            Self::Ltcg => "ltcg",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ordinary" => Some(Self::Ordinary),
            "ltcg" => Some(Self::Ltcg),
            _ => None,
        }
    }
}

impl fmt::Display for BracketKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur when loading tax table data.
#[derive(Debug, Error)]
pub enum TaxTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("unrecognised filing status '{status}' on line {line}")]
    InvalidFilingStatus { status: String, line: usize },

    #[error("unrecognised bracket kind '{kind}' on line {line}")]
    InvalidKind { kind: String, line: usize },

    #[error("{tax_year} {status} {kind} brackets are invalid: {source}")]
    InvalidBrackets {
        tax_year: i32,
        status: FilingStatusCode,
        kind: BracketKind,
        #[source]
        source: BracketValidationError,
    },

    #[error("no {kind} brackets for {status} in {tax_year}")]
    MissingBrackets {
        tax_year: i32,
        status: FilingStatusCode,
        kind: BracketKind,
    },

    #[error("no standard deduction for {status} in {tax_year}")]
    MissingStandardDeduction {
        tax_year: i32,
        status: FilingStatusCode,
    },

    #[error("standard deduction for {status} in {tax_year} appears more than once")]
    DuplicateStandardDeduction {
        tax_year: i32,
        status: FilingStatusCode,
    },

    #[error("standard deduction {amount} for {status} in {tax_year} is negative")]
    NegativeStandardDeduction {
        tax_year: i32,
        status: FilingStatusCode,
        amount: Decimal,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for TaxTableLoaderError {
    fn from(err: csv::Error) -> Self {
        TaxTableLoaderError::CsvParse(err.to_string())
    }
}

impl From<TaxTableLoaderError> for TableError {
    fn from(err: TaxTableLoaderError) -> Self {
        TableError::Load(err.to_string())
    }
}

/// A single record from the tax brackets CSV file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBracketRecord {
    pub tax_year: i32,
    pub filing_status: String,
    pub kind: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

/// A single record from the standard deductions CSV file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StandardDeductionRecord {
    pub tax_year: i32,
    pub filing_status: String,
    pub amount: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Line number in the source file of the `idx`th record, counting the header.
fn csv_line(idx: usize) -> usize {
    idx + 2
}

/// Maps a filing status cell to one or more filing statuses.
///
/// Several codes may share a row when separated by `|` (e.g. `MFJ|QSS`).
fn filing_status_codes(
    cell: &str,
    line: usize,
) -> Result<Vec<FilingStatusCode>, TaxTableLoaderError> {
    cell.split('|')
        .map(|part| {
            FilingStatusCode::parse(part).ok_or_else(|| TaxTableLoaderError::InvalidFilingStatus {
                status: part.trim().to_string(),
                line,
            })
        })
        .collect()
}

fn read_records<R, T>(reader: R) -> Result<Vec<T>, TaxTableLoaderError>
where
    R: Read,
    T: serde::de::DeserializeOwned,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in csv_reader.deserialize() {
        records.push(result?);
    }

    Ok(records)
}

type BracketKey = (i32, FilingStatusCode, BracketKind);
type StatusKey = (i32, FilingStatusCode);

/// Loader for tax tables from CSV data.
///
/// Parsing and assembly are separate steps so that callers can inspect the
/// raw records (the check binary prints them) before building tables.
pub struct TaxTableLoader;

impl TaxTableLoader {
    /// Parse bracket records from a CSV reader.
    pub fn parse_brackets<R: Read>(
        reader: R
    ) -> Result<Vec<TaxBracketRecord>, TaxTableLoaderError> {
        read_records(reader)
    }

    /// Parse standard deduction records from a CSV reader.
    pub fn parse_deductions<R: Read>(
        reader: R
    ) -> Result<Vec<StandardDeductionRecord>, TaxTableLoaderError> {
        read_records(reader)
    }

    /// Assemble parsed records into one validated [`TaxTable`] per year.
    ///
    /// Brackets are ordered by `min_income` within each (year, status, kind)
    /// group and then validated. Every status that has brackets or a
    /// deduction must have all three: ordinary brackets, LTCG brackets and
    /// exactly one standard deduction.
    pub fn build(
        brackets: &[TaxBracketRecord],
        deductions: &[StandardDeductionRecord],
    ) -> Result<BTreeMap<i32, TaxTable>, TaxTableLoaderError> {
        let grouped = Self::group_brackets(brackets)?;
        let deductions = Self::index_deductions(deductions)?;

        let mut keys: Vec<StatusKey> = grouped
            .keys()
            .map(|&(year, status, _)| (year, status))
            .chain(deductions.keys().copied())
            .collect();
        keys.sort();
        keys.dedup();

        let mut tables: BTreeMap<i32, TaxTable> = BTreeMap::new();

        for (tax_year, status) in keys {
            let ordinary = Self::take_validated(&grouped, tax_year, status, BracketKind::Ordinary)?;
            let ltcg = Self::take_validated(&grouped, tax_year, status, BracketKind::Ltcg)?;
            let standard_deduction = *deductions.get(&(tax_year, status)).ok_or(
                TaxTableLoaderError::MissingStandardDeduction { tax_year, status },
            )?;

            debug!(tax_year, %status, %standard_deduction, "assembled filing status data");

            tables
                .entry(tax_year)
                .or_insert_with(|| TaxTable::new(tax_year))
                .statuses
                .insert(
                    status,
                    FilingStatusData {
                        standard_deduction,
                        ordinary_income_brackets: ordinary,
                        ltcg_brackets: ltcg,
                    },
                );
        }

        info!(
            years = tables.len(),
            records = brackets.len(),
            "built tax tables"
        );

        Ok(tables)
    }

    fn group_brackets(
        records: &[TaxBracketRecord]
    ) -> Result<BTreeMap<BracketKey, Vec<TaxBracket>>, TaxTableLoaderError> {
        let mut groups: BTreeMap<BracketKey, Vec<TaxBracket>> = BTreeMap::new();

        for (idx, record) in records.iter().enumerate() {
            let line = csv_line(idx);
            let kind = BracketKind::parse(&record.kind).ok_or_else(|| {
                TaxTableLoaderError::InvalidKind {
                    kind: record.kind.clone(),
                    line,
                }
            })?;

            for status in filing_status_codes(&record.filing_status, line)? {
                groups
                    .entry((record.tax_year, status, kind))
                    .or_default()
                    .push(TaxBracket::new(
                        record.rate,
                        record.min_income,
                        record.max_income,
                    ));
            }
        }

        for brackets in groups.values_mut() {
            brackets.sort_by(|a, b| a.min_income.cmp(&b.min_income));
        }

        Ok(groups)
    }

    fn index_deductions(
        records: &[StandardDeductionRecord]
    ) -> Result<BTreeMap<StatusKey, Decimal>, TaxTableLoaderError> {
        let mut index = BTreeMap::new();

        for (idx, record) in records.iter().enumerate() {
            for status in filing_status_codes(&record.filing_status, csv_line(idx))? {
                let tax_year = record.tax_year;
                if record.amount < Decimal::ZERO {
                    return Err(TaxTableLoaderError::NegativeStandardDeduction {
                        tax_year,
                        status,
                        amount: record.amount,
                    });
                }

                match index.entry((tax_year, status)) {
                    Entry::Vacant(slot) => {
                        slot.insert(record.amount);
                    }
                    Entry::Occupied(_) => {
                        return Err(TaxTableLoaderError::DuplicateStandardDeduction {
                            tax_year,
                            status,
                        });
                    }
                }
            }
        }

        Ok(index)
    }

    fn take_validated(
        groups: &BTreeMap<BracketKey, Vec<TaxBracket>>,
        tax_year: i32,
        status: FilingStatusCode,
        kind: BracketKind,
    ) -> Result<Vec<TaxBracket>, TaxTableLoaderError> {
        let brackets = groups
            .get(&(tax_year, status, kind))
            .ok_or(TaxTableLoaderError::MissingBrackets {
                tax_year,
                status,
                kind,
            })?;

        validate_brackets(brackets).map_err(|source| TaxTableLoaderError::InvalidBrackets {
            tax_year,
            status,
            kind,
            source,
        })?;

        Ok(brackets.clone())
    }
}
