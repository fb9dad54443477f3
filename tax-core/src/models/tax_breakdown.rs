use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The slice of income taxed inside one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketContribution {
    pub amount: Decimal,
    pub rate: Decimal,
    pub tax: Decimal,
}

/// Per-bracket apportionment of an amount plus the summed tax.
///
/// Only brackets with a nonzero taxed amount appear in `contributions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub contributions: Vec<BracketContribution>,
    pub total_tax: Decimal,
}

impl TaxBreakdown {
    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }

    /// Sum of the amounts apportioned across all brackets.
    pub fn taxed_amount(&self) -> Decimal {
        self.contributions.iter().map(|c| c.amount).sum()
    }

    pub(crate) fn push(
        &mut self,
        amount: Decimal,
        rate: Decimal,
    ) {
        let tax = amount.saturating_mul(rate);
        self.contributions.push(BracketContribution { amount, rate, tax });
        self.total_tax = self.total_tax.saturating_add(tax);
    }
}

/// Result of taxing a household's regular and LTCG income together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComputation {
    /// Regular income after the standard deduction (never negative).
    pub taxable_regular_income: Decimal,

    /// Where the LTCG slice begins on the combined income scale.
    pub ltcg_stack_start: Decimal,

    /// Where the LTCG slice ends. May be below the start when the deduction
    /// exceeds total income, in which case no LTCG tax is owed.
    pub ltcg_stack_end: Decimal,

    pub ordinary: TaxBreakdown,
    pub ltcg: TaxBreakdown,
    pub total_tax: Decimal,
}
