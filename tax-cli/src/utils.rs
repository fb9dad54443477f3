use rust_decimal::Decimal;
use tax_core::FilingStatusCode;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and removes
/// commas (thousands separator) and a leading dollar sign.
fn normalize_decimal_input(s: &str) -> String {
    let trimmed = s.trim();
    let without_sign = trimmed.strip_prefix('$').unwrap_or(trimmed);
    without_sign.replace(',', "")
}

/// Parses an income amount such as `"40,000"` or `"$1,234.56"`.
///
/// Empty or whitespace-only input is treated as 0. Negative values are
/// returned as-is; the household state floors them.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| ParseDecimalError {
        input: s.to_string(),
        source: e,
    })
}

/// Parses a filing status for the command line.
pub fn parse_filing_status(s: &str) -> Result<FilingStatusCode, String> {
    FilingStatusCode::parse(s).ok_or_else(|| {
        let known: Vec<_> = FilingStatusCode::all().iter().map(|c| c.as_str()).collect();
        format!("unknown filing status '{s}'; expected one of {}", known.join(", "))
    })
}
