//! Common utility functions for projection calculations.
//!
//! This module provides shared functionality used across the amortization
//! and projection calculations, including rounding and annual-to-monthly
//! conversion.

use rust_decimal::Decimal;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Arguments
///
/// * `value` - The decimal value to round
///
/// # Returns
///
/// The value rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use mortgage_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(2147.2864)), dec!(2147.29));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Converts an annual amount into the equivalent monthly amount.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use mortgage_core::calculations::common::per_month;
///
/// assert_eq!(per_month(dec!(1800)), dec!(150));
/// ```
pub fn per_month(annual: Decimal) -> Decimal {
    annual / Decimal::from(MONTHS_PER_YEAR)
}

/// Appends `value` to `series` once for every month of a year.
pub fn push_year(
    series: &mut Vec<Decimal>,
    value: Decimal,
) {
    series.extend(std::iter::repeat_n(value, MONTHS_PER_YEAR as usize));
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        let result = round_half_up(dec!(123.454));

        assert_eq!(result, dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        let result = round_half_up(dec!(123.455));

        assert_eq!(result, dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        let result = round_half_up(dec!(-123.455));

        assert_eq!(result, dec!(-123.46)); // Away from zero
    }

    #[test]
    fn round_half_up_handles_long_fractions() {
        let result = round_half_up(dec!(2147.286492048555939313970243));

        assert_eq!(result, dec!(2147.29));
    }

    // =========================================================================
    // per_month tests
    // =========================================================================

    #[test]
    fn per_month_divides_by_twelve() {
        assert_eq!(per_month(dec!(120000)), dec!(10000));
        assert_eq!(per_month(dec!(0)), dec!(0));
    }

    #[test]
    fn per_month_keeps_fractions() {
        let result = per_month(dec!(100));

        assert_eq!(round_half_up(result), dec!(8.33));
    }

    // =========================================================================
    // push_year tests
    // =========================================================================

    #[test]
    fn push_year_appends_twelve_copies() {
        let mut series = vec![dec!(1)];

        push_year(&mut series, dec!(2.5));

        assert_eq!(series.len(), 13);
        assert!(series[1..].iter().all(|v| *v == dec!(2.5)));
    }
}
