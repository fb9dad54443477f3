use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single marginal-rate bracket covering `[min_income, max_income)`.
///
/// `max_income` of `None` marks the unbounded top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub tax_rate: Decimal,
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
}

impl TaxBracket {
    pub fn new(
        tax_rate: Decimal,
        min_income: Decimal,
        max_income: Option<Decimal>,
    ) -> Self {
        Self {
            tax_rate,
            min_income,
            max_income,
        }
    }

    /// Width of the bracket, or `None` when it is unbounded.
    ///
    /// Degenerate brackets (`max <= min`) report a span of zero.
    pub fn span(&self) -> Option<Decimal> {
        self.max_income
            .map(|max| max.saturating_sub(self.min_income).max(Decimal::ZERO))
    }
}
