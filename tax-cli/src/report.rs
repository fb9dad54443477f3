//! Plain-text rendering of a household's tax breakdown.
//!
//! Figures are rounded to whole dollars for display only; the computation
//! itself keeps full precision.

use std::fmt;

use rust_decimal::Decimal;
use tax_core::calculations::TaxCalculator;
use tax_core::calculations::common::round_to_dollar;
use tax_core::{
    BracketContribution, FilingStatusCode, FilingStatusData, HouseholdIncome, TaxBreakdown,
    TaxComputation,
};

/// Line shown in place of an empty breakdown.
pub const EMPTY_LINE: &str = "$0 @ 0% = $0";

/// Formats an amount as whole dollars with thousands separators (`$86,700`).
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_to_dollar(value);
    let digits = rounded.abs().trunc().normalize().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < Decimal::ZERO {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Formats a fractional rate as a whole percentage (`0.15` -> `15%`).
pub fn format_rate(rate: Decimal) -> String {
    let percent = round_to_dollar(rate * Decimal::ONE_HUNDRED).normalize();
    format!("{percent}%")
}

pub fn format_contribution(line: &BracketContribution) -> String {
    format!(
        "{} @ {} = {}",
        format_currency(line.amount),
        format_rate(line.rate),
        format_currency(line.tax)
    )
}

/// One display line per contribution, or [`EMPTY_LINE`] when there are none.
pub fn breakdown_lines(breakdown: &TaxBreakdown) -> Vec<String> {
    if breakdown.is_empty() {
        return vec![EMPTY_LINE.to_string()];
    }
    breakdown
        .contributions
        .iter()
        .map(format_contribution)
        .collect()
}

/// Everything needed to print one calculation.
#[derive(Debug, Clone)]
pub struct TaxReport {
    pub tax_year: i32,
    pub status: FilingStatusCode,
    pub standard_deduction: Decimal,
    pub income: HouseholdIncome,
    pub computation: TaxComputation,
}

impl TaxReport {
    pub fn new(
        tax_year: i32,
        status: FilingStatusCode,
        data: &FilingStatusData,
        income: HouseholdIncome,
    ) -> Self {
        Self {
            tax_year,
            status,
            standard_deduction: data.standard_deduction,
            income,
            computation: TaxCalculator::new(data).calculate(income),
        }
    }
}

impl fmt::Display for TaxReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Tax year {}, {}", self.tax_year, self.status)?;
        writeln!(
            f,
            "Standard deduction: {}",
            format_currency(self.standard_deduction)
        )?;
        writeln!(f, "Regular income: {}", format_currency(self.income.regular_income()))?;
        writeln!(f, "LTCG income: {}", format_currency(self.income.ltcg_income()))?;
        writeln!(f, "Total income: {}", format_currency(self.income.total_income()))?;

        writeln!(f)?;
        writeln!(f, "Ordinary income tax:")?;
        for line in breakdown_lines(&self.computation.ordinary) {
            writeln!(f, "  {line}")?;
        }
        writeln!(f, "Long-term capital gains tax:")?;
        for line in breakdown_lines(&self.computation.ltcg) {
            writeln!(f, "  {line}")?;
        }

        writeln!(f)?;
        write!(
            f,
            "Total tax: {}",
            format_currency(self.computation.total_tax)
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::TaxBracket;

    use super::*;

    fn mfj_2025() -> FilingStatusData {
        FilingStatusData {
            standard_deduction: dec!(30000),
            ordinary_income_brackets: vec![
                TaxBracket::new(dec!(0.10), dec!(0), Some(dec!(23850))),
                TaxBracket::new(dec!(0.12), dec!(23850), Some(dec!(96950))),
                TaxBracket::new(dec!(0.22), dec!(96950), None),
            ],
            ltcg_brackets: vec![
                TaxBracket::new(dec!(0.00), dec!(0), Some(dec!(96700))),
                TaxBracket::new(dec!(0.15), dec!(96700), Some(dec!(600050))),
                TaxBracket::new(dec!(0.20), dec!(600050), None),
            ],
        }
    }

    // =========================================================================
    // formatting helpers
    // =========================================================================

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(dec!(0)), "$0");
        assert_eq!(format_currency(dec!(999)), "$999");
        assert_eq!(format_currency(dec!(1000)), "$1,000");
        assert_eq!(format_currency(dec!(86700.00)), "$86,700");
        assert_eq!(format_currency(dec!(1234567)), "$1,234,567");
    }

    #[test]
    fn format_currency_rounds_to_whole_dollars() {
        assert_eq!(format_currency(dec!(1994.5)), "$1,995");
        assert_eq!(format_currency(dec!(0.49)), "$0");
    }

    #[test]
    fn format_currency_marks_negative_amounts() {
        assert_eq!(format_currency(dec!(-10000)), "-$10,000");
    }

    #[test]
    fn format_rate_uses_whole_percent() {
        assert_eq!(format_rate(dec!(0.10)), "10%");
        assert_eq!(format_rate(dec!(0.00)), "0%");
        assert_eq!(format_rate(dec!(0.37)), "37%");
    }

    #[test]
    fn breakdown_lines_for_empty_breakdown() {
        assert_eq!(breakdown_lines(&TaxBreakdown::default()), vec![EMPTY_LINE]);
    }

    #[test]
    fn format_contribution_line() {
        let line = BracketContribution {
            amount: dec!(13300),
            rate: dec!(0.15),
            tax: dec!(1995.00),
        };

        assert_eq!(format_contribution(&line), "$13,300 @ 15% = $1,995");
    }

    // =========================================================================
    // TaxReport
    // =========================================================================

    #[test]
    fn report_renders_both_breakdowns() {
        let income = HouseholdIncome::new(dec!(40000), dec!(100000));
        let report = TaxReport::new(
            2025,
            FilingStatusCode::MarriedFilingJointly,
            &mfj_2025(),
            income,
        );

        let expected = "\
Tax year 2025, Married Filing Jointly
Standard deduction: $30,000
Regular income: $40,000
LTCG income: $100,000
Total income: $140,000

Ordinary income tax:
  $10,000 @ 10% = $1,000
Long-term capital gains tax:
  $86,700 @ 0% = $0
  $13,300 @ 15% = $1,995

Total tax: $2,995";

        assert_eq!(report.to_string(), expected);
    }

    #[test]
    fn report_shows_placeholder_lines_for_zero_income() {
        let report = TaxReport::new(
            2025,
            FilingStatusCode::MarriedFilingJointly,
            &mfj_2025(),
            HouseholdIncome::default(),
        );

        let rendered = report.to_string();

        assert_eq!(rendered.matches(EMPTY_LINE).count(), 2);
        assert!(rendered.ends_with("Total tax: $0"));
    }
}
