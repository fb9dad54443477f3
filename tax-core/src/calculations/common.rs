//! Common utility functions for tax calculations.
//!
//! This module provides shared functionality used by the apportionment and
//! stacking calculations, plus the rounding used when results are presented.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to whole dollars, halves away from zero.
///
/// Breakdown lines and totals are displayed in whole dollars; the underlying
/// figures are never rounded.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_to_dollar;
///
/// assert_eq!(round_to_dollar(dec!(1994.49)), dec!(1994));
/// assert_eq!(round_to_dollar(dec!(1994.50)), dec!(1995));
/// ```
pub fn round_to_dollar(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Returns the minimum of two values where `None` stands for +infinity.
pub(crate) fn min_bounded(
    a: Decimal,
    b: Option<Decimal>,
) -> Decimal {
    match b {
        Some(b) if b < a => b,
        _ => a,
    }
}
