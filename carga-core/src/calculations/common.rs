//! Common utility functions for tax calculations.
//!
//! This module provides shared functionality used across the regime
//! calculators, including the IRPJ surtax, safe ratios and rounding.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Months over which annual bases are spread for the IRPJ surtax.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Monthly IRPJ base above which the additional IRPJ is due.
pub const ADDITIONAL_IRPJ_MONTHLY_THRESHOLD: Decimal = dec!(20000);

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero. Only presentation
/// code rounds; the calculators keep full precision.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use carga_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use carga_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Divides `numerator` by `denominator`, returning zero unless the
/// denominator is strictly positive.
pub fn ratio(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator > Decimal::ZERO {
        numerator / denominator
    } else {
        Decimal::ZERO
    }
}

/// Annual additional IRPJ on an annual `base`.
///
/// The base is spread evenly over twelve months, the monthly threshold is
/// subtracted, the surtax applied and the result re-annualized, in exactly
/// that order. A base under the threshold owes nothing.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use carga_core::calculations::common::additional_irpj;
///
/// // 300,000 / 12 = 25,000 → 5,000 above the threshold → 500/month
/// assert_eq!(additional_irpj(dec!(300000), dec!(0.10)), dec!(6000));
/// assert_eq!(additional_irpj(dec!(240000), dec!(0.10)), dec!(0));
/// ```
pub fn additional_irpj(
    base: Decimal,
    surtax_rate: Decimal,
) -> Decimal {
    max(
        (base / MONTHS_PER_YEAR - ADDITIONAL_IRPJ_MONTHLY_THRESHOLD) * surtax_rate,
        Decimal::ZERO,
    ) * MONTHS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_long_fractions() {
        assert_eq!(round_half_up(dec!(0.0672799999999999)), dec!(0.07));
        assert_eq!(round_half_up(dec!(999999.999)), dec!(1000000.00));
    }

    // =========================================================================
    // ratio tests
    // =========================================================================

    #[test]
    fn ratio_divides_by_positive_denominator() {
        assert_eq!(ratio(dec!(50), dec!(200)), dec!(0.25));
    }

    #[test]
    fn ratio_is_zero_for_zero_denominator() {
        assert_eq!(ratio(dec!(50), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn ratio_is_zero_for_negative_denominator() {
        assert_eq!(ratio(dec!(50), dec!(-10)), Decimal::ZERO);
    }

    // =========================================================================
    // additional_irpj tests
    // =========================================================================

    #[test]
    fn additional_irpj_taxes_only_the_monthly_excess() {
        // 25,000/month − 20,000 = 5,000 × 10% × 12
        assert_eq!(additional_irpj(dec!(300000), dec!(0.10)), dec!(6000));
    }

    #[test]
    fn additional_irpj_is_zero_at_the_threshold() {
        assert_eq!(additional_irpj(dec!(240000), dec!(0.10)), Decimal::ZERO);
    }

    #[test]
    fn additional_irpj_never_goes_negative() {
        assert_eq!(additional_irpj(dec!(12000), dec!(0.10)), Decimal::ZERO);
        assert_eq!(additional_irpj(Decimal::ZERO, dec!(0.10)), Decimal::ZERO);
    }

    #[test]
    fn additional_irpj_scales_with_the_rate() {
        assert_eq!(additional_irpj(dec!(600000), dec!(0.05)), dec!(18000));
    }
}
