//! Minor-unit amount derivation.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

const MINOR_UNITS_PER_MAJOR: Decimal = Decimal::ONE_HUNDRED;

/// The order total does not yield a positive chargeable amount.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("order total {total} does not yield a positive amount")]
pub struct InvalidAmount {
    /// The rejected total, in major units.
    pub total: Decimal,
}

/// Convert a major-unit total to integer minor units, rounding half away from zero.
///
/// # Errors
///
/// Returns [`InvalidAmount`] when the result is zero, negative, or does not fit in an `i64`.
pub fn to_minor_units(total: Decimal) -> Result<i64, InvalidAmount> {
    total
        .checked_mul(MINOR_UNITS_PER_MAJOR)
        .map(|minor| minor.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|minor| minor.to_i64())
        .filter(|minor| *minor > 0)
        .ok_or(InvalidAmount { total })
}
