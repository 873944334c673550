use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};

use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Smallest decimal exponent rendered in positional notation.
const POSITIONAL_MIN_EXP: i32 = -4;
/// Decimal exponent from which on values are rendered in exponent notation.
const POSITIONAL_MAX_EXP: i32 = 16;

/// Converts an arbitrary precision integer to `f64`.
///
/// Integers beyond the finite `f64` range cannot be represented and produce an
/// overflow error instead of silently becoming infinite.
///
/// ## Errors
/// Returns `RuntimeError::Overflow` if the integer is too large for an `f64`.
///
/// ## Example
/// ```
/// use num_bigint::BigInt;
/// use rpn::util::num::bigint_to_f64_checked;
///
/// assert_eq!(bigint_to_f64_checked(&BigInt::from(42)).unwrap(), 42.0);
///
/// let huge = BigInt::from(10).pow(400);
/// assert!(bigint_to_f64_checked(&huge).is_err());
/// ```
pub fn bigint_to_f64_checked(value: &BigInt) -> EvalResult<f64> {
    match value.to_f64() {
        Some(real) if real.is_finite() => Ok(real),
        _ => Err(RuntimeError::overflow("integer too large to convert to float")),
    }
}

/// Converts an integral `f64` to an arbitrary precision integer.
///
/// The value is expected to be integral already (callers truncate, floor or
/// round first).
///
/// ## Errors
/// - `RuntimeError::MathDomain` if the value is NaN.
/// - `RuntimeError::Overflow` if the value is infinite.
///
/// ## Example
/// ```
/// use num_bigint::BigInt;
/// use rpn::util::num::f64_to_bigint_checked;
///
/// assert_eq!(f64_to_bigint_checked(-3.0, "ip").unwrap(), BigInt::from(-3));
/// assert!(f64_to_bigint_checked(f64::NAN, "ip").is_err());
/// assert!(f64_to_bigint_checked(f64::INFINITY, "ip").is_err());
/// ```
pub fn f64_to_bigint_checked(value: f64, token: &str) -> EvalResult<BigInt> {
    if value.is_nan() {
        return Err(RuntimeError::MathDomain { token: token.to_string() });
    }
    BigInt::from_f64(value).ok_or_else(|| {
                               RuntimeError::overflow(format!("cannot convert {} to integer",
                                                              format_real(value)))
                           })
}

/// Converts a non-negative arbitrary precision integer to `usize`.
///
/// ## Errors
/// Returns `RuntimeError::Overflow` if the value is negative or larger than
/// `usize::MAX`.
///
/// ## Example
/// ```
/// use num_bigint::BigInt;
/// use rpn::util::num::bigint_to_usize_checked;
///
/// assert_eq!(bigint_to_usize_checked(&BigInt::from(7)).unwrap(), 7);
/// assert!(bigint_to_usize_checked(&BigInt::from(-1)).is_err());
/// ```
pub fn bigint_to_usize_checked(value: &BigInt) -> EvalResult<usize> {
    value.to_usize()
         .ok_or_else(|| RuntimeError::overflow(format!("{value} does not fit into a count")))
}

/// Converts an arbitrary precision integer to `u32`.
///
/// ## Errors
/// Returns `RuntimeError::Overflow` if the value is negative or does not fit
/// into 32 bits.
pub fn bigint_to_u32_checked(value: &BigInt) -> EvalResult<u32> {
    value.to_u32()
         .ok_or_else(|| RuntimeError::overflow(format!("{value} does not fit into 32 bits")))
}

/// Converts an arbitrary precision integer to `u16`.
///
/// ## Errors
/// Returns `RuntimeError::Overflow` if the value is negative or does not fit
/// into 16 bits.
pub fn bigint_to_u16_checked(value: &BigInt) -> EvalResult<u16> {
    value.to_u16()
         .ok_or_else(|| RuntimeError::overflow(format!("{value} does not fit into 16 bits")))
}

/// Renders a floating-point value in its canonical textual form.
///
/// The output is the shortest representation that round-trips to the same
/// value. Integral values keep a trailing `.0`, and values whose decimal
/// exponent lies outside `[-4, 16)` use exponent notation with a signed, at
/// least two digit exponent.
///
/// ## Example
/// ```
/// use rpn::util::num::format_real;
///
/// assert_eq!(format_real(2.0), "2.0");
/// assert_eq!(format_real(-0.25), "-0.25");
/// assert_eq!(format_real(1e16), "1e+16");
/// assert_eq!(format_real(1.5e-5), "1.5e-05");
/// assert_eq!(format_real(0.0001), "0.0001");
/// assert_eq!(format_real(f64::NAN), "nan");
/// assert_eq!(format_real(f64::NEG_INFINITY), "-inf");
/// ```
#[must_use]
pub fn format_real(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. `-1.2345e3`.
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let sign = if value < 0.0 { "-" } else { "" };

    if (POSITIONAL_MIN_EXP..POSITIONAL_MAX_EXP).contains(&exponent) {
        return format!("{sign}{}", positional(&digits, exponent));
    }

    let (lead, rest) = digits.split_at(1);
    let exponent_sign = if exponent < 0 { '-' } else { '+' };
    if rest.is_empty() {
        format!("{sign}{lead}e{exponent_sign}{:02}", exponent.unsigned_abs())
    } else {
        format!("{sign}{lead}.{rest}e{exponent_sign}{:02}", exponent.unsigned_abs())
    }
}

/// Places the decimal point into a digit string with the given exponent.
fn positional(digits: &str, exponent: i32) -> String {
    if exponent < 0 {
        let zeros = "0".repeat(exponent.unsigned_abs() as usize - 1);
        return format!("0.{zeros}{digits}");
    }

    let point = exponent.unsigned_abs() as usize + 1;
    if digits.len() <= point {
        format!("{digits}{}.0", "0".repeat(point - digits.len()))
    } else {
        let (whole, fraction) = digits.split_at(point);
        format!("{whole}.{fraction}")
    }
}
