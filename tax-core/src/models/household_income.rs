//! Caller-owned income state.
//!
//! The engine never holds on to income values; callers keep a
//! [`HouseholdIncome`] and pass it by value on every recomputation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Regular and long-term capital-gains income for one household.
///
/// Both amounts are floored at zero on every update. Sums saturate at
/// [`Decimal::MAX`] instead of overflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdIncome {
    regular_income: Decimal,
    ltcg_income: Decimal,
}

impl HouseholdIncome {
    pub fn new(
        regular_income: Decimal,
        ltcg_income: Decimal,
    ) -> Self {
        Self {
            regular_income: regular_income.max(Decimal::ZERO),
            ltcg_income: ltcg_income.max(Decimal::ZERO),
        }
    }

    pub fn regular_income(&self) -> Decimal {
        self.regular_income
    }

    pub fn ltcg_income(&self) -> Decimal {
        self.ltcg_income
    }

    pub fn total_income(&self) -> Decimal {
        self.regular_income.saturating_add(self.ltcg_income)
    }

    pub fn with_regular_income(
        self,
        regular_income: Decimal,
    ) -> Self {
        Self::new(regular_income, self.ltcg_income)
    }

    pub fn with_ltcg_income(
        self,
        ltcg_income: Decimal,
    ) -> Self {
        Self::new(self.regular_income, ltcg_income)
    }

    /// Moves the top of the income stack, keeping regular income fixed.
    ///
    /// LTCG becomes whatever lies between regular income and `total_income`,
    /// or zero when the total is below regular income.
    pub fn with_total_income(
        self,
        total_income: Decimal,
    ) -> Self {
        Self::new(
            self.regular_income,
            total_income.saturating_sub(self.regular_income),
        )
    }
}
