//! Small numeric helpers shared by the engine, the aggregator and the
//! presentation layer.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Calculations never round internally; this is for display only.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use progtax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(536.418)), dec!(536.42));
/// assert_eq!(round_half_up(dec!(1887.165)), dec!(1887.17));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps negative values to zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use progtax_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-12.5)), dec!(0));
/// assert_eq!(non_negative(dec!(12.5)), dec!(12.5));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    if value > Decimal::ZERO { value } else { Decimal::ZERO }
}

/// Expresses a rate in [0, 1] as a percentage.
pub fn rate_as_percent(rate: Decimal) -> Decimal {
    rate * Decimal::ONE_HUNDRED
}
