//! Deduction and stacking for a household's regular and LTCG income.
//!
//! | Step | Figure |
//! |------|--------|
//! | 1    | Taxable regular income = max(0, regular − standard deduction) |
//! | 2    | Ordinary tax: apportion step 1 over the ordinary brackets |
//! | 3    | LTCG stack start = step 1 |
//! | 4    | LTCG stack end = regular + LTCG − standard deduction |
//! | 5    | LTCG tax: apportion `[step 3, step 4)` over the LTCG brackets |
//! | 6    | Total tax = step 2 + step 5 |
//!
//! Step 4 subtracts the full deduction even when regular income is below it,
//! so unused deduction also shields LTCG income.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::compute_taxes;
//! use tax_core::{FilingStatusData, TaxBracket};
//!
//! let data = FilingStatusData {
//!     standard_deduction: dec!(30000),
//!     ordinary_income_brackets: vec![
//!         TaxBracket::new(dec!(0.10), dec!(0), Some(dec!(23850))),
//!         TaxBracket::new(dec!(0.12), dec!(23850), None),
//!     ],
//!     ltcg_brackets: vec![
//!         TaxBracket::new(dec!(0.00), dec!(0), Some(dec!(96700))),
//!         TaxBracket::new(dec!(0.15), dec!(96700), None),
//!     ],
//! };
//!
//! let result = compute_taxes(dec!(40000), dec!(100000), &data);
//!
//! assert_eq!(result.ordinary.total_tax, dec!(1000));
//! assert_eq!(result.ltcg.total_tax, dec!(1995));
//! assert_eq!(result.total_tax, dec!(2995));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::brackets::{apportion_ltcg, apportion_ordinary};
use crate::calculations::common::max;
use crate::models::{FilingStatusData, HouseholdIncome, TaxComputation};

/// Taxes a household's income against one filing status's reference data.
#[derive(Debug, Clone)]
pub struct TaxCalculator<'a> {
    data: &'a FilingStatusData,
}

impl<'a> TaxCalculator<'a> {
    pub fn new(data: &'a FilingStatusData) -> Self {
        Self { data }
    }

    /// Runs every step of the calculation. Never fails.
    pub fn calculate(
        &self,
        income: HouseholdIncome,
    ) -> TaxComputation {
        let regular = income.regular_income();
        let ltcg = income.ltcg_income();
        let deduction = self.data.standard_deduction;

        let taxable_regular_income = self.taxable_regular_income(regular, deduction);
        let ordinary = apportion_ordinary(
            taxable_regular_income,
            &self.data.ordinary_income_brackets,
        );

        let (stack_start, stack_end) = self.ltcg_stack(regular, ltcg, deduction);
        let ltcg_breakdown = apportion_ltcg(stack_start, stack_end, &self.data.ltcg_brackets);

        let total_tax = ordinary.total_tax.saturating_add(ltcg_breakdown.total_tax);

        debug!(
            %regular,
            %ltcg,
            %deduction,
            %total_tax,
            "computed household taxes"
        );

        TaxComputation {
            taxable_regular_income,
            ltcg_stack_start: stack_start,
            ltcg_stack_end: stack_end,
            ordinary,
            ltcg: ltcg_breakdown,
            total_tax,
        }
    }

    fn taxable_regular_income(
        &self,
        regular: Decimal,
        deduction: Decimal,
    ) -> Decimal {
        max(regular.saturating_sub(deduction), Decimal::ZERO)
    }

    /// The LTCG slice on the combined income scale, as `(start, end)`.
    fn ltcg_stack(
        &self,
        regular: Decimal,
        ltcg: Decimal,
        deduction: Decimal,
    ) -> (Decimal, Decimal) {
        let start = self.taxable_regular_income(regular, deduction);
        let end = regular.saturating_add(ltcg).saturating_sub(deduction);
        (start, end)
    }
}

/// Computes ordinary and LTCG tax for `regular_income` and `ltcg_income`.
///
/// Negative incomes are floored to zero before anything else happens.
pub fn compute_taxes(
    regular_income: Decimal,
    ltcg_income: Decimal,
    data: &FilingStatusData,
) -> TaxComputation {
    TaxCalculator::new(data).calculate(HouseholdIncome::new(regular_income, ltcg_income))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{BracketContribution, TaxBracket};

    fn mfj_2025() -> FilingStatusData {
        FilingStatusData {
            standard_deduction: dec!(30000),
            ordinary_income_brackets: vec![
                TaxBracket::new(dec!(0.10), dec!(0), Some(dec!(23850))),
                TaxBracket::new(dec!(0.12), dec!(23850), Some(dec!(96950))),
                TaxBracket::new(dec!(0.22), dec!(96950), Some(dec!(206700))),
                TaxBracket::new(dec!(0.24), dec!(206700), Some(dec!(394600))),
                TaxBracket::new(dec!(0.32), dec!(394600), Some(dec!(501050))),
                TaxBracket::new(dec!(0.35), dec!(501050), Some(dec!(751600))),
                TaxBracket::new(dec!(0.37), dec!(751600), None),
            ],
            ltcg_brackets: vec![
                TaxBracket::new(dec!(0.00), dec!(0), Some(dec!(96700))),
                TaxBracket::new(dec!(0.15), dec!(96700), Some(dec!(600050))),
                TaxBracket::new(dec!(0.20), dec!(600050), None),
            ],
        }
    }

    // =========================================================================
    // taxable_regular_income / ltcg_stack tests
    // =========================================================================

    #[test]
    fn taxable_regular_income_subtracts_deduction() {
        let data = mfj_2025();
        let calculator = TaxCalculator::new(&data);

        let result = calculator.taxable_regular_income(dec!(40000), dec!(30000));

        assert_eq!(result, dec!(10000));
    }

    #[test]
    fn taxable_regular_income_floors_at_zero() {
        let data = mfj_2025();
        let calculator = TaxCalculator::new(&data);

        let result = calculator.taxable_regular_income(dec!(12000), dec!(30000));

        assert_eq!(result, Decimal::ZERO);
    }

    #[test]
    fn ltcg_stack_subtracts_full_deduction_from_end() {
        let data = mfj_2025();
        let calculator = TaxCalculator::new(&data);

        let (start, end) = calculator.ltcg_stack(dec!(10000), dec!(50000), dec!(30000));

        assert_eq!(start, Decimal::ZERO);
        assert_eq!(end, dec!(30000));
    }

    // =========================================================================
    // calculate tests
    // =========================================================================

    #[test]
    fn calculate_mfj_regular_and_ltcg() {
        let result = compute_taxes(dec!(40000), dec!(100000), &mfj_2025());

        assert_eq!(result.taxable_regular_income, dec!(10000));
        assert_eq!(
            result.ordinary.contributions,
            vec![BracketContribution {
                amount: dec!(10000),
                rate: dec!(0.10),
                tax: dec!(1000),
            }]
        );
        assert_eq!(result.ltcg_stack_start, dec!(10000));
        assert_eq!(result.ltcg_stack_end, dec!(110000));
        assert_eq!(
            result.ltcg.contributions,
            vec![
                BracketContribution {
                    amount: dec!(86700),
                    rate: dec!(0.00),
                    tax: dec!(0),
                },
                BracketContribution {
                    amount: dec!(13300),
                    rate: dec!(0.15),
                    tax: dec!(1995),
                },
            ]
        );
        assert_eq!(result.total_tax, dec!(2995));
    }

    #[test]
    fn calculate_zero_income() {
        let result = compute_taxes(Decimal::ZERO, Decimal::ZERO, &mfj_2025());

        assert!(result.ordinary.is_empty());
        assert!(result.ltcg.is_empty());
        assert_eq!(result.total_tax, Decimal::ZERO);
    }

    #[test]
    fn calculate_regular_below_deduction_without_ltcg() {
        let result = compute_taxes(dec!(20000), Decimal::ZERO, &mfj_2025());

        assert_eq!(result.taxable_regular_income, Decimal::ZERO);
        assert_eq!(result.ltcg_stack_start, Decimal::ZERO);
        assert_eq!(result.ltcg_stack_end, dec!(-10000));
        assert!(result.ordinary.is_empty());
        assert!(result.ltcg.is_empty());
        assert_eq!(result.total_tax, Decimal::ZERO);
    }

    #[test]
    fn calculate_unused_deduction_shields_ltcg() {
        // 10000 of unused deduction reduces the 50000 gain to 40000 taxable
        let result = compute_taxes(dec!(20000), dec!(50000), &mfj_2025());

        assert_eq!(result.ltcg.taxed_amount(), dec!(40000));
        assert_eq!(result.total_tax, Decimal::ZERO);
    }

    #[test]
    fn calculate_regular_exactly_at_deduction_starts_stack_at_zero() {
        let result = compute_taxes(dec!(30000), dec!(100000), &mfj_2025());

        assert_eq!(result.taxable_regular_income, Decimal::ZERO);
        assert!(result.ordinary.is_empty());
        assert_eq!(result.ltcg_stack_start, Decimal::ZERO);
        assert_eq!(result.ltcg_stack_end, dec!(100000));
        assert_eq!(
            result.ltcg.contributions,
            vec![
                BracketContribution {
                    amount: dec!(96700),
                    rate: dec!(0.00),
                    tax: dec!(0),
                },
                BracketContribution {
                    amount: dec!(3300),
                    rate: dec!(0.15),
                    tax: dec!(495),
                },
            ]
        );
        assert_eq!(result.total_tax, dec!(495));
    }

    #[test]
    fn calculate_saturates_instead_of_overflowing() {
        let result = compute_taxes(Decimal::MAX, Decimal::MAX, &mfj_2025());

        // The stack end saturates, leaving no room above taxable income.
        assert_eq!(result.taxable_regular_income, Decimal::MAX - dec!(30000));
        assert_eq!(result.ltcg_stack_end, Decimal::MAX - dec!(30000));
        assert!(result.ltcg.is_empty());
        assert_eq!(
            result.ordinary.taxed_amount(),
            result.taxable_regular_income
        );
        assert!(result.total_tax > Decimal::ZERO);
    }

    #[test]
    fn calculate_ltcg_only_pushes_into_higher_rate() {
        let result = compute_taxes(Decimal::ZERO, dec!(200000), &mfj_2025());

        assert_eq!(result.ltcg_stack_end, dec!(170000));
        // 96700 at 0%, 73300 at 15%
        assert_eq!(result.ltcg.total_tax, dec!(10995));
    }

    #[test]
    fn calculate_high_regular_income_puts_all_ltcg_at_top_rate() {
        let result = compute_taxes(dec!(700000), dec!(50000), &mfj_2025());

        assert_eq!(
            result.ltcg.contributions,
            vec![BracketContribution {
                amount: dec!(50000),
                rate: dec!(0.20),
                tax: dec!(10000),
            }]
        );
    }

    #[test]
    fn calculate_floors_negative_inputs() {
        let result = compute_taxes(dec!(-40000), dec!(-1), &mfj_2025());

        assert_eq!(result.total_tax, Decimal::ZERO);
        assert!(result.ordinary.is_empty());
        assert!(result.ltcg.is_empty());
    }

    #[test]
    fn calculate_total_is_sum_of_breakdowns() {
        let result = compute_taxes(dec!(183250.75), dec!(412000), &mfj_2025());

        assert_eq!(
            result.total_tax,
            result.ordinary.total_tax + result.ltcg.total_tax
        );
    }

    #[test]
    fn calculate_is_repeatable() {
        let data = mfj_2025();
        let calculator = TaxCalculator::new(&data);
        let income = HouseholdIncome::new(dec!(95000), dec!(15000));

        assert_eq!(calculator.calculate(income), calculator.calculate(income));
    }
}
