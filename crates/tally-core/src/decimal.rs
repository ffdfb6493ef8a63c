//! Base-unit amount conversion.
//!
//! Statement amounts arrive as base-10 integer strings in the asset's
//! smallest unit (wei for ether, 10^-decimals for tokens). Charts want
//! floating-point values in whole units.
//!
//! The float value always comes from the float parser reading
//! `<digits>e-<decimals>`, which rounds the exact quotient once. The exact
//! form, when it fits in 96 bits, is available as a
//! [`rust_decimal::Decimal`].

use rust_decimal::Decimal;
use std::str::FromStr;

/// Decimal places used when a record does not state a usable count.
pub const DEFAULT_DECIMALS: u32 = 18;

/// Largest scale `Decimal` can carry.
const MAX_DECIMAL_SCALE: u32 = 28;

/// Returns `decimals` if it is usable, otherwise [`DEFAULT_DECIMALS`].
///
/// Zero and negative counts are treated as missing.
#[must_use]
pub fn effective_decimals(decimals: i64) -> u32 {
    if decimals > 0 {
        u32::try_from(decimals).unwrap_or(DEFAULT_DECIMALS)
    } else {
        DEFAULT_DECIMALS
    }
}

/// Converts a base-unit integer string into whole units.
///
/// `""` and `"0"` are zero without parsing. Anything that is not an
/// optionally signed run of ASCII digits also yields zero; no error is
/// reported to the caller.
///
/// # Example
///
/// ```rust
/// use tally_core::decimal::base_units_to_f64;
///
/// assert_eq!(base_units_to_f64("1000000000000000000", 18), 1.0);
/// assert_eq!(base_units_to_f64("1500000", 6), 1.5);
/// assert_eq!(base_units_to_f64("not a number", 18), 0.0);
/// ```
#[must_use]
pub fn base_units_to_f64(value: &str, decimals: u32) -> f64 {
    if value.is_empty() || value == "0" {
        return 0.0;
    }

    let Some((negative, digits)) = split_integer(value) else {
        tracing::debug!(value, "amount is not a base-10 integer, using zero");
        return 0.0;
    };

    let magnitude = format!("{digits}e-{decimals}")
        .parse::<f64>()
        .unwrap_or(0.0);

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Converts a base-unit integer string into an exact `Decimal`.
///
/// Returns `None` when the input is not an integer or when the scaled value
/// does not fit in a `Decimal` (more than 28 decimal places or a mantissa
/// wider than 96 bits).
#[must_use]
pub fn base_units_to_decimal(value: &str, decimals: u32) -> Option<Decimal> {
    if value.is_empty() {
        return None;
    }
    let (negative, digits) = split_integer(value)?;
    let scaled = scale_digits(digits, decimals)?;
    Some(if negative { -scaled } else { scaled })
}

/// Splits an optional leading sign from a run of ASCII digits.
fn split_integer(value: &str) -> Option<(bool, &str)> {
    let (negative, digits) = match value.as_bytes().first()? {
        b'-' => (true, &value[1..]),
        b'+' => (false, &value[1..]),
        _ => (false, value),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((negative, digits))
}

/// Places the decimal point `decimals` digits from the right.
fn scale_digits(digits: &str, decimals: u32) -> Option<Decimal> {
    if decimals > MAX_DECIMAL_SCALE {
        return None;
    }
    let mut mantissa = Decimal::from_str(digits).ok()?;
    mantissa.set_scale(decimals).ok()?;
    Some(mantissa)
}
