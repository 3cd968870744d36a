//! Decimal-safe token amount arithmetic.
//!
//! # Responsibility
//! - Convert raw chain amounts (base units) to display units and back.
//! - Provide the small calculator surface used by staking views.
//!
//! # Invariants
//! - No floating point is involved at any step.
//! - Rounding is half away from zero; fixed renderings always carry exactly
//!   the requested number of fractional digits.
//! - Base-unit amounts handed to transactions are non-negative integers.

use rust_decimal::{Decimal, RoundingStrategy};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Largest power-of-ten exponent representable by `Decimal`.
pub const MAX_EXPONENT: i32 = 28;

pub type AmountResult<T> = Result<T, AmountError>;

/// Amount parsing and arithmetic errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    Empty,
    Invalid(String),
    Overflow,
    DivisionByZero,
    ExponentOutOfRange(i32),
    Negative(String),
    TooPrecise { value: String, decimal: u32 },
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "amount must not be empty"),
            Self::Invalid(value) => write!(f, "amount is not a decimal number: `{value}`"),
            Self::Overflow => write!(f, "amount arithmetic overflowed"),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ExponentOutOfRange(exp) => write!(
                f,
                "power-of-ten exponent {exp} is outside -{MAX_EXPONENT}..={MAX_EXPONENT}"
            ),
            Self::Negative(value) => write!(f, "amount must not be negative: `{value}`"),
            Self::TooPrecise { value, decimal } => write!(
                f,
                "amount `{value}` has more than {decimal} fractional digits"
            ),
        }
    }
}

impl Error for AmountError {}

/// Parses one decimal string as delivered by LCD endpoints or user input.
pub fn parse_decimal(text: &str) -> AmountResult<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    Decimal::from_str(trimmed).map_err(|_| AmountError::Invalid(trimmed.to_string()))
}

pub fn plus(a: Decimal, b: Decimal) -> AmountResult<Decimal> {
    a.checked_add(b).ok_or(AmountError::Overflow)
}

pub fn times(a: Decimal, b: Decimal) -> AmountResult<Decimal> {
    a.checked_mul(b).ok_or(AmountError::Overflow)
}

pub fn divide(a: Decimal, b: Decimal) -> AmountResult<Decimal> {
    if b.is_zero() {
        return Err(AmountError::DivisionByZero);
    }
    a.checked_div(b).ok_or(AmountError::Overflow)
}

pub fn gt(a: Decimal, b: Decimal) -> bool {
    a > b
}

/// Returns `10^exp`; negative exponents produce fractions.
pub fn pow10(exp: i32) -> AmountResult<Decimal> {
    if !(-MAX_EXPONENT..=MAX_EXPONENT).contains(&exp) {
        return Err(AmountError::ExponentOutOfRange(exp));
    }
    if exp < 0 {
        Decimal::try_new(1, exp.unsigned_abs()).map_err(|_| AmountError::ExponentOutOfRange(exp))
    } else {
        Decimal::try_from_i128_with_scale(10_i128.pow(exp.unsigned_abs()), 0)
            .map_err(|_| AmountError::ExponentOutOfRange(exp))
    }
}

/// Rounds to `places` fractional digits (half away from zero).
pub fn round_to(value: Decimal, places: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(places);
    rounded
}

/// Renders `value` with exactly `places` fractional digits.
pub fn round_fixed(value: Decimal, places: u32) -> String {
    round_to(value, places).to_string()
}

/// Converts a base-unit amount to display units: `raw * 10^-decimal`.
pub fn to_display_amount(raw: Decimal, decimal: u32) -> AmountResult<Decimal> {
    let scale = pow10(-exponent(decimal))?;
    Ok(round_to(times(raw, scale)?, decimal))
}

/// Parses a raw amount string and renders it in display units.
pub fn format_display_amount(raw: &str, decimal: u32) -> AmountResult<String> {
    let value = parse_decimal(raw)?;
    Ok(to_display_amount(value, decimal)?.to_string())
}

/// Converts a display-unit amount into an integer base-unit string.
///
/// # Errors
/// - `Negative` for values below zero.
/// - `TooPrecise` when the value carries more than `decimal` fractional digits.
pub fn to_base_amount(display: &str, decimal: u32) -> AmountResult<String> {
    let value = parse_decimal(display)?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AmountError::Negative(display.trim().to_string()));
    }

    let mut scaled = times(value, pow10(exponent(decimal))?)?;
    if !scaled.fract().is_zero() {
        return Err(AmountError::TooPrecise {
            value: display.trim().to_string(),
            decimal,
        });
    }
    scaled.rescale(0);
    Ok(scaled.abs().to_string())
}

/// Renders `part / whole * 100` with `places` fractional digits.
///
/// A zero `whole` renders as zero instead of failing; dashboards show `0.00%`
/// for chains whose validator set could not be loaded.
pub fn percent(part: Decimal, whole: Decimal, places: u32) -> AmountResult<String> {
    if whole.is_zero() {
        return Ok(round_fixed(Decimal::ZERO, places));
    }
    let ratio = divide(part, whole)?;
    Ok(round_fixed(times(ratio, Decimal::ONE_HUNDRED)?, places))
}

fn exponent(decimal: u32) -> i32 {
    i32::try_from(decimal).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        divide, format_display_amount, parse_decimal, percent, pow10, round_fixed,
        to_base_amount, to_display_amount, AmountError,
    };
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn parse_rejects_empty_and_garbage() {
        assert_eq!(parse_decimal("  ").unwrap_err(), AmountError::Empty);
        assert_eq!(
            parse_decimal("12a").unwrap_err(),
            AmountError::Invalid("12a".to_string())
        );
    }

    #[test]
    fn display_amount_scales_by_chain_decimal() {
        assert_eq!(format_display_amount("1234567", 6).unwrap(), "1.234567");
        assert_eq!(format_display_amount("5", 6).unwrap(), "0.000005");
        assert_eq!(format_display_amount("0", 6).unwrap(), "0.000000");
        assert_eq!(
            format_display_amount("1500000000000000000", 18).unwrap(),
            "1.500000000000000000"
        );
    }

    #[test]
    fn display_amount_rounds_dec_coin_rewards() {
        // distribution rewards come back as 18-digit DecCoins
        let reward = dec("1234567.890000000000000000");
        assert_eq!(to_display_amount(reward, 6).unwrap().to_string(), "1.234568");
        assert_eq!(to_display_amount(dec("0.5"), 0).unwrap().to_string(), "1");
    }

    #[test]
    fn avoids_binary_float_error() {
        let sum = dec("0.1") + dec("0.2");
        assert_eq!(round_fixed(sum, 2), "0.30");
        assert_eq!(sum, dec("0.3"));
    }

    #[test]
    fn pow10_covers_negative_and_positive_exponents() {
        assert_eq!(pow10(-6).unwrap(), dec("0.000001"));
        assert_eq!(pow10(0).unwrap(), Decimal::ONE);
        assert_eq!(pow10(8).unwrap(), dec("100000000"));
        assert_eq!(pow10(29).unwrap_err(), AmountError::ExponentOutOfRange(29));
    }

    #[test]
    fn base_amount_rejects_excess_precision_and_negatives() {
        assert_eq!(to_base_amount("1.5", 6).unwrap(), "1500000");
        assert_eq!(to_base_amount("0.00005", 8).unwrap(), "5000");
        assert_eq!(to_base_amount("2", 0).unwrap(), "2");
        assert!(matches!(
            to_base_amount("0.0000001", 6).unwrap_err(),
            AmountError::TooPrecise { decimal: 6, .. }
        ));
        assert!(matches!(
            to_base_amount("-1", 6).unwrap_err(),
            AmountError::Negative(_)
        ));
    }

    #[test]
    fn percent_handles_zero_total() {
        assert_eq!(percent(dec("25"), dec("200"), 2).unwrap(), "12.50");
        assert_eq!(percent(dec("1"), Decimal::ZERO, 2).unwrap(), "0.00");
        assert_eq!(percent(dec("1"), dec("3"), 2).unwrap(), "33.33");
    }

    #[test]
    fn divide_by_zero_is_an_error() {
        assert_eq!(
            divide(Decimal::ONE, Decimal::ZERO).unwrap_err(),
            AmountError::DivisionByZero
        );
    }
}
