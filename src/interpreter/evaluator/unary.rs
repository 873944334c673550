use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{binary, core::EvalResult},
        value::core::Number,
    },
    util::num::{
        bigint_to_u16_checked, bigint_to_u32_checked, bigint_to_usize_checked,
        f64_to_bigint_checked,
    },
};

/// Extracts the integer operand of an integer-only operation.
fn integer<'a>(value: &'a Number, token: &str) -> EvalResult<&'a BigInt> {
    match value {
        Number::Integer(n) => Ok(n),
        Number::Real(_) => Err(RuntimeError::IncompatibleOperands { token: token.to_string() }),
    }
}

/// Boolean NOT over truthiness, pushing `1` or `0`.
///
/// # Example
/// ```
/// use rpn::interpreter::{evaluator::unary::logical_not, value::core::Number};
///
/// assert_eq!(logical_not(&Number::from(0), "!").unwrap(), Number::from(1));
/// assert_eq!(logical_not(&Number::from(2.5), "!").unwrap(), Number::from(0));
/// ```
pub fn logical_not(value: &Number, _token: &str) -> EvalResult<Number> {
    Ok((!value.is_truthy()).into())
}

/// Adds one.
pub fn increment(value: &Number, token: &str) -> EvalResult<Number> {
    binary::add(value, &Number::from(1), token)
}

/// Subtracts one.
pub fn decrement(value: &Number, token: &str) -> EvalResult<Number> {
    binary::subtract(value, &Number::from(1), token)
}

/// Bitwise NOT of an integer, i.e. `-n - 1`.
///
/// # Example
/// ```
/// use rpn::interpreter::{evaluator::unary::bit_not, value::core::Number};
///
/// assert_eq!(bit_not(&Number::from(5), "~").unwrap(), Number::from(-6));
/// assert!(bit_not(&Number::from(5.0), "~").is_err());
/// ```
pub fn bit_not(value: &Number, token: &str) -> EvalResult<Number> {
    let n = integer(value, token)?;
    Ok(Number::Integer(!n))
}

/// Shifts an integer left by one bit.
pub fn shift_left(value: &Number, token: &str) -> EvalResult<Number> {
    Ok(Number::Integer(integer(value, token)? << 1u32))
}

/// Shifts an integer right by one bit, rounding towards negative infinity.
///
/// # Example
/// ```
/// use rpn::interpreter::{evaluator::unary::shift_right, value::core::Number};
///
/// assert_eq!(shift_right(&Number::from(5), ">>").unwrap(), Number::from(2));
/// assert_eq!(shift_right(&Number::from(-5), ">>").unwrap(), Number::from(-3));
/// ```
pub fn shift_right(value: &Number, token: &str) -> EvalResult<Number> {
    Ok(Number::Integer(integer(value, token)? >> 1u32))
}

/// Computes the factorial of a non-negative integer.
///
/// Results are exact regardless of size.
///
/// # Returns
/// - `Ok(Number::Integer)`: `n!`.
/// - `Err(RuntimeError::IncompatibleOperands)`: If the operand is a float.
/// - `Err(RuntimeError::MathDomain)`: If the operand is negative.
///
/// # Example
/// ```
/// use rpn::interpreter::{evaluator::unary::factorial, value::core::Number};
///
/// assert_eq!(factorial(&Number::from(5), "fact").unwrap(), Number::from(120));
/// assert_eq!(factorial(&Number::from(0), "fact").unwrap(), Number::from(1));
/// assert!(factorial(&Number::from(-1), "fact").is_err());
/// assert!(factorial(&Number::from(5.0), "fact").is_err());
/// ```
pub fn factorial(value: &Number, token: &str) -> EvalResult<Number> {
    let n = integer(value, token)?;
    if n.is_negative() {
        return Err(RuntimeError::MathDomain { token: token.to_string() });
    }

    let n = bigint_to_usize_checked(n)?;
    let product = (2..=n).fold(BigInt::one(), |acc, k| acc * k);
    Ok(Number::Integer(product))
}

/// Rounds towards negative infinity, producing an integer.
pub fn floor(value: &Number, token: &str) -> EvalResult<Number> {
    to_integer(value, token, f64::floor)
}

/// Rounds towards positive infinity, producing an integer.
pub fn ceil(value: &Number, token: &str) -> EvalResult<Number> {
    to_integer(value, token, f64::ceil)
}

/// Rounds to the nearest integer, ties to even.
///
/// # Example
/// ```
/// use rpn::interpreter::{evaluator::unary::round, value::core::Number};
///
/// assert_eq!(round(&Number::from(2.5), "round").unwrap(), Number::from(2));
/// assert_eq!(round(&Number::from(3.5), "round").unwrap(), Number::from(4));
/// assert_eq!(round(&Number::from(-1.7), "round").unwrap(), Number::from(-2));
/// ```
pub fn round(value: &Number, token: &str) -> EvalResult<Number> {
    to_integer(value, token, f64::round_ties_even)
}

/// Truncates towards zero, producing an integer.
pub fn integer_part(value: &Number, token: &str) -> EvalResult<Number> {
    to_integer(value, token, f64::trunc)
}

/// The fractional part, `x - ip(x)`. Integers have a fractional part of `0`.
///
/// # Example
/// ```
/// use rpn::interpreter::{evaluator::unary::fractional_part, value::core::Number};
///
/// assert_eq!(fractional_part(&Number::from(-2.25), "fp").unwrap(), Number::from(-0.25));
/// assert_eq!(fractional_part(&Number::from(7), "fp").unwrap(), Number::from(0));
/// ```
pub fn fractional_part(value: &Number, token: &str) -> EvalResult<Number> {
    match value {
        Number::Integer(_) => Ok(Number::Integer(BigInt::zero())),
        Number::Real(r) => {
            f64_to_bigint_checked(r.trunc(), token)?;
            Ok(Number::Real(r - r.trunc()))
        },
    }
}

fn to_integer(value: &Number, token: &str, op: fn(f64) -> f64) -> EvalResult<Number> {
    match value {
        Number::Integer(n) => Ok(Number::Integer(n.clone())),
        Number::Real(r) => Ok(Number::Integer(f64_to_bigint_checked(op(*r), token)?)),
    }
}

/// Pushes `-1`, `0` or `1` depending on the sign. The result is always an
/// integer. NaN and infinities have no sign in this sense and are a domain
/// error.
///
/// # Example
/// ```
/// use rpn::interpreter::{evaluator::unary::sign, value::core::Number};
///
/// assert_eq!(sign(&Number::from(-0.3), "sign").unwrap(), Number::from(-1));
/// assert_eq!(sign(&Number::from(0.0), "sign").unwrap(), Number::from(0));
/// assert_eq!(sign(&Number::from(42), "sign").unwrap(), Number::from(1));
/// assert!(sign(&Number::from(f64::INFINITY), "sign").is_err());
/// ```
pub fn sign(value: &Number, token: &str) -> EvalResult<Number> {
    match value {
        Number::Integer(n) => Ok(Number::Integer(n.signum())),
        Number::Real(r) if !r.is_finite() => Err(RuntimeError::MathDomain { token: token.to_string() }),
        Number::Real(r) if *r == 0.0 => Ok(Number::from(0)),
        Number::Real(r) => Ok(Number::from(if *r < 0.0 { -1 } else { 1 })),
    }
}

/// Absolute value, keeping the number kind.
pub fn absolute(value: &Number, _token: &str) -> EvalResult<Number> {
    Ok(value.abs())
}

/// Converts a 32-bit value from host to network byte order.
///
/// # Example
/// ```
/// use rpn::interpreter::{evaluator::unary::host_to_network_long, value::core::Number};
///
/// let expected = if cfg!(target_endian = "little") { 0x7856_3412 } else { 0x1234_5678 };
/// assert_eq!(host_to_network_long(&Number::from(0x1234_5678), "hnl").unwrap(),
///            Number::from(expected));
/// assert!(host_to_network_long(&Number::from(-1), "hnl").is_err());
/// ```
pub fn host_to_network_long(value: &Number, token: &str) -> EvalResult<Number> {
    let long = bigint_to_u32_checked(integer(value, token)?)?;
    Ok(Number::from(i64::from(long.to_be())))
}

/// Converts a 32-bit value from network to host byte order.
pub fn network_to_host_long(value: &Number, token: &str) -> EvalResult<Number> {
    let long = bigint_to_u32_checked(integer(value, token)?)?;
    Ok(Number::from(i64::from(u32::from_be(long))))
}

/// Converts a 16-bit value from host to network byte order.
pub fn host_to_network_short(value: &Number, token: &str) -> EvalResult<Number> {
    let short = bigint_to_u16_checked(integer(value, token)?)?;
    Ok(Number::from(i64::from(short.to_be())))
}

/// Converts a 16-bit value from network to host byte order.
pub fn network_to_host_short(value: &Number, token: &str) -> EvalResult<Number> {
    let short = bigint_to_u16_checked(integer(value, token)?)?;
    Ok(Number::from(i64::from(u16::from_be(short))))
}
