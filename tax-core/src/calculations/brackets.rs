//! Marginal-rate apportionment across ordered tax brackets.
//!
//! Two flavours are provided:
//!
//! | Function               | Income placed                           | Walk            |
//! |------------------------|-----------------------------------------|-----------------|
//! | [`apportion_ordinary`] | `[0, taxable_income)`                   | running remainder |
//! | [`apportion_ltcg`]     | `[stack_start, stack_end)` on top of ordinary income | per-bracket overlap |
//!
//! Brackets are expected in ascending order, contiguous, with an unbounded
//! last bracket. Neither function validates that; a bracket whose span is not
//! positive simply contributes nothing.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::TaxBracket;
//! use tax_core::calculations::apportion_ordinary;
//!
//! let brackets = vec![
//!     TaxBracket::new(dec!(0.10), dec!(0), Some(dec!(10000))),
//!     TaxBracket::new(dec!(0.20), dec!(10000), None),
//! ];
//!
//! let breakdown = apportion_ordinary(dec!(15000), &brackets);
//!
//! assert_eq!(breakdown.contributions.len(), 2);
//! assert_eq!(breakdown.total_tax, dec!(2000));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{max, min_bounded};
use crate::models::{TaxBracket, TaxBreakdown};

/// Splits `taxable_income` across `brackets`, filling the lowest bracket first.
///
/// Negative income is treated as zero, so the result never carries negative
/// tax. Brackets that receive nothing are left out of the breakdown.
pub fn apportion_ordinary(
    taxable_income: Decimal,
    brackets: &[TaxBracket],
) -> TaxBreakdown {
    let mut breakdown = TaxBreakdown::default();
    let mut remaining = max(taxable_income, Decimal::ZERO);

    for bracket in brackets {
        if remaining <= Decimal::ZERO {
            break;
        }

        let amount = min_bounded(remaining, bracket.span());
        if amount > Decimal::ZERO {
            breakdown.push(amount, bracket.tax_rate);
            remaining -= amount;
        }
    }

    debug!(
        %taxable_income,
        brackets = breakdown.contributions.len(),
        total_tax = %breakdown.total_tax,
        "apportioned ordinary income"
    );

    breakdown
}

/// Distributes the income slice `[stack_start, stack_end)` across `brackets`.
///
/// LTCG brackets are thresholds on total taxable income, so the slice is
/// placed where ordinary income left off rather than at zero. Bounds are
/// half-open: a slice starting exactly on a bracket's `max_income` lands in
/// the next bracket.
///
/// An empty breakdown is returned when `stack_start >= stack_end`.
pub fn apportion_ltcg(
    stack_start: Decimal,
    stack_end: Decimal,
    brackets: &[TaxBracket],
) -> TaxBreakdown {
    let mut breakdown = TaxBreakdown::default();

    if stack_start >= stack_end {
        return breakdown;
    }

    for bracket in brackets {
        let overlap_start = max(stack_start, bracket.min_income);
        let overlap_end = min_bounded(stack_end, bracket.max_income);
        let amount = max(overlap_end.saturating_sub(overlap_start), Decimal::ZERO);

        if amount > Decimal::ZERO {
            breakdown.push(amount, bracket.tax_rate);
        }
    }

    debug!(
        %stack_start,
        %stack_end,
        brackets = breakdown.contributions.len(),
        total_tax = %breakdown.total_tax,
        "apportioned ltcg income"
    );

    breakdown
}
