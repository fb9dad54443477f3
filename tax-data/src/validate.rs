//! Structural checks applied to bracket lists before a table is accepted.
//!
//! The engine tolerates malformed tables; the loaders do not.

use rust_decimal::Decimal;
use tax_core::TaxBracket;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketValidationError {
    #[error("no brackets")]
    Empty,

    #[error("first bracket starts at {0}, expected 0")]
    FirstBracketNotAtZero(Decimal),

    #[error("bracket {index} has rate {rate}, expected a fraction between 0 and 1")]
    RateOutOfRange { index: usize, rate: Decimal },

    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd { index: usize },

    #[error("bracket {index} ends at {max} which is not above its start {min}")]
    NonPositiveSpan {
        index: usize,
        min: Decimal,
        max: Decimal,
    },

    #[error("bracket {index} starts at {min} but the previous bracket ends at {previous_max}")]
    NotContiguous {
        index: usize,
        min: Decimal,
        previous_max: Decimal,
    },

    #[error("last bracket is bounded at {0}")]
    BoundedTop(Decimal),
}

/// Checks that `brackets` start at zero, are contiguous and ascending, have
/// positive spans and fractional rates, and end with an unbounded bracket.
pub fn validate_brackets(brackets: &[TaxBracket]) -> Result<(), BracketValidationError> {
    let first = brackets.first().ok_or(BracketValidationError::Empty)?;
    if first.min_income != Decimal::ZERO {
        return Err(BracketValidationError::FirstBracketNotAtZero(
            first.min_income,
        ));
    }

    let last_index = brackets.len() - 1;
    let mut previous_max: Option<Decimal> = None;

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
            return Err(BracketValidationError::RateOutOfRange {
                index,
                rate: bracket.tax_rate,
            });
        }

        if let Some(previous_max) = previous_max {
            if bracket.min_income != previous_max {
                return Err(BracketValidationError::NotContiguous {
                    index,
                    min: bracket.min_income,
                    previous_max,
                });
            }
        }

        match bracket.max_income {
            None if index != last_index => {
                return Err(BracketValidationError::UnboundedBeforeEnd { index });
            }
            None => {}
            Some(max) if max <= bracket.min_income => {
                return Err(BracketValidationError::NonPositiveSpan {
                    index,
                    min: bracket.min_income,
                    max,
                });
            }
            Some(max) if index == last_index => {
                return Err(BracketValidationError::BoundedTop(max));
            }
            Some(_) => {}
        }

        previous_max = bracket.max_income;
    }

    Ok(())
}
