//! Guarded ratio and percentage helpers.
//!
//! All ratios are computed in exact decimal arithmetic and rounded half-up
//! to an integer. A zero denominator yields 0.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Returns `round_half_up(100 * numerator / denominator)`, or 0 when the
/// denominator is 0.
///
/// Values above 100 are returned as-is.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::percentage;
///
/// assert_eq!(percentage(1, 8), 13); // 12.5 rounds up
/// assert_eq!(percentage(150, 100), 150);
/// assert_eq!(percentage(120, 0), 0);
/// ```
pub fn percentage(numerator: u64, denominator: u64) -> u32 {
    rounded_quotient(
        Decimal::from(numerator) * Decimal::ONE_HUNDRED,
        denominator,
    )
    .to_u32()
    .unwrap_or(u32::MAX)
}

/// Returns `round_half_up(numerator / denominator)`, or 0 when the
/// denominator is 0.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::rounded_ratio;
///
/// assert_eq!(rounded_ratio(7, 2), 4);
/// assert_eq!(rounded_ratio(7, 0), 0);
/// ```
pub fn rounded_ratio(numerator: u64, denominator: u64) -> u64 {
    rounded_quotient(Decimal::from(numerator), denominator)
        .to_u64()
        .unwrap_or(u64::MAX)
}

fn rounded_quotient(numerator: Decimal, denominator: u64) -> Decimal {
    if denominator == 0 {
        return Decimal::ZERO;
    }
    (numerator / Decimal::from(denominator))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
