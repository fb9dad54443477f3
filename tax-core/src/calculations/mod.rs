//! Bracket tax engine.
//!
//! Pure functions over immutable reference data: marginal apportionment of
//! ordinary income, stacked apportionment of long-term capital gains, and the
//! deduction/stacking orchestration that combines them.

pub mod brackets;
pub mod common;
pub mod household;

pub use brackets::{apportion_ltcg, apportion_ordinary};
pub use household::{TaxCalculator, compute_taxes};
