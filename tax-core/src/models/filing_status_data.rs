use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TaxBracket;

/// Reference data for one (tax year, filing status) pair.
///
/// Loaded once at startup and treated as read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingStatusData {
    pub standard_deduction: Decimal,
    pub ordinary_income_brackets: Vec<TaxBracket>,
    pub ltcg_brackets: Vec<TaxBracket>,
}
