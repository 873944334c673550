use std::cmp::Ordering;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Number},
    util::num::bigint_to_u32_checked,
};

/// Applies an arithmetic operation with integer/float promotion.
///
/// Two integers are handed to `integer`; if either operand is a float, both
/// are converted to `f64` and handed to `real`.
fn promote(left: &Number,
           right: &Number,
           integer: impl FnOnce(&BigInt, &BigInt) -> EvalResult<Number>,
           real: impl FnOnce(f64, f64) -> EvalResult<Number>)
           -> EvalResult<Number> {
    match (left, right) {
        (Number::Integer(a), Number::Integer(b)) => integer(a, b),
        _ => real(left.as_real()?, right.as_real()?),
    }
}

/// Applies a bitwise operation, which is only defined for two integers.
fn integers(left: &Number,
            right: &Number,
            token: &str,
            op: impl FnOnce(&BigInt, &BigInt) -> BigInt)
            -> EvalResult<Number> {
    match (left, right) {
        (Number::Integer(a), Number::Integer(b)) => Ok(Number::Integer(op(a, b))),
        _ => Err(RuntimeError::IncompatibleOperands { token: token.to_string() }),
    }
}

/// Adds two numbers.
///
/// # Example
/// ```
/// use rpn::interpreter::{evaluator::binary::add, value::core::Number};
///
/// assert_eq!(add(&Number::from(2), &Number::from(3), "+").unwrap(), Number::from(5));
/// assert_eq!(add(&Number::from(2), &Number::from(0.5), "+").unwrap(), Number::from(2.5));
/// ```
pub fn add(left: &Number, right: &Number, _token: &str) -> EvalResult<Number> {
    promote(left, right, |a, b| Ok((a + b).into()), |a, b| Ok((a + b).into()))
}

/// Subtracts the top operand from the deeper one.
pub fn subtract(left: &Number, right: &Number, _token: &str) -> EvalResult<Number> {
    promote(left, right, |a, b| Ok((a - b).into()), |a, b| Ok((a - b).into()))
}

/// Multiplies two numbers.
pub fn multiply(left: &Number, right: &Number, _token: &str) -> EvalResult<Number> {
    promote(left, right, |a, b| Ok((a * b).into()), |a, b| Ok((a * b).into()))
}

/// Divides the deeper operand by the top operand.
///
/// Division is true division: the result is always a float, even for two
/// integers. Two integers are divided exactly and rounded once, so operands
/// too large for `f64` still divide as long as the quotient fits.
///
/// # Returns
/// - `Ok(Number::Real)`: The quotient.
/// - `Err(RuntimeError::DivisionByZero)`: If the divisor is zero.
/// - `Err(RuntimeError::Overflow)`: If the quotient of two integers is
///   beyond the `f64` range.
///
/// # Example
/// ```
/// use rpn::interpreter::{evaluator::binary::divide, value::core::Number};
///
/// assert_eq!(divide(&Number::from(7), &Number::from(2), "/").unwrap(), Number::from(3.5));
/// assert!(divide(&Number::from(1), &Number::from(0.0), "/").is_err());
/// ```
pub fn divide(left: &Number, right: &Number, _token: &str) -> EvalResult<Number> {
    if right.is_zero() {
        return Err(RuntimeError::DivisionByZero);
    }
    promote(left, right, integer_quotient, |a, b| Ok(Number::Real(a / b)))
}

fn integer_quotient(dividend: &BigInt, divisor: &BigInt) -> EvalResult<Number> {
    match BigRational::new(dividend.clone(), divisor.clone()).to_f64() {
        Some(quotient) if quotient.is_finite() => Ok(Number::Real(quotient)),
        _ => Err(RuntimeError::overflow("quotient too large to convert to float")),
    }
}

/// Computes the floored modulus: the result takes the sign of the divisor.
///
/// # Example
/// ```
/// use rpn::interpreter::{evaluator::binary::modulo, value::core::Number};
///
/// assert_eq!(modulo(&Number::from(-7), &Number::from(3), "%").unwrap(), Number::from(2));
/// assert_eq!(modulo(&Number::from(7.5), &Number::from(-2), "%").unwrap(), Number::from(-0.5));
/// ```
pub fn modulo(left: &Number, right: &Number, _token: &str) -> EvalResult<Number> {
    if right.is_zero() {
        return Err(RuntimeError::DivisionByZero);
    }
    promote(left,
            right,
            |a, b| Ok(a.mod_floor(b).into()),
            |a, b| Ok(floored_remainder(a, b).into()))
}

fn floored_remainder(a: f64, b: f64) -> f64 {
    let remainder = a % b;
    if remainder == 0.0 {
        0.0_f64.copysign(b)
    } else if (remainder < 0.0) == (b < 0.0) {
        remainder
    } else {
        remainder + b
    }
}

/// Raises `base` to `exponent`.
///
/// Integer bases with non-negative integer exponents stay exact. Negative
/// exponents and float operands are computed in floating point.
///
/// # Returns
/// - `Ok(Number)`: The power.
/// - `Err(RuntimeError::DivisionByZero)`: Zero raised to a negative power.
/// - `Err(RuntimeError::MathDomain)`: A negative base with a fractional
///   exponent.
/// - `Err(RuntimeError::Overflow)`: The result does not fit.
///
/// # Example
/// ```
/// use rpn::interpreter::{evaluator::binary::power, value::core::Number};
///
/// assert_eq!(power(&Number::from(2), &Number::from(10), "exp").unwrap(), Number::from(1024));
/// assert_eq!(power(&Number::from(2), &Number::from(-1), "exp").unwrap(), Number::from(0.5));
/// assert!(power(&Number::from(-8.0), &Number::from(0.5), "exp").is_err());
/// ```
pub fn power(base: &Number, exponent: &Number, token: &str) -> EvalResult<Number> {
    if let (Number::Integer(b), Number::Integer(e)) = (base, exponent)
       && !e.is_negative()
    {
        return Ok(Number::Integer(integer_power(b, e)?));
    }

    let (b, e) = (base.as_real()?, exponent.as_real()?);
    if b == 0.0 && e < 0.0 {
        return Err(RuntimeError::DivisionByZero);
    }

    let result = b.powf(e);
    if result.is_nan() && !b.is_nan() && !e.is_nan() {
        return Err(RuntimeError::MathDomain { token: token.to_string() });
    }
    if result.is_infinite() && b.is_finite() && e.is_finite() {
        return Err(RuntimeError::overflow(format!("{base} raised to {exponent} is too large")));
    }
    Ok(Number::Real(result))
}

/// Raises the top operand to the deeper one, the operand order of `pow`.
pub fn power_reversed(left: &Number, right: &Number, token: &str) -> EvalResult<Number> {
    power(right, left, token)
}

fn integer_power(base: &BigInt, exponent: &BigInt) -> EvalResult<BigInt> {
    // Bases 0, 1 and -1 never grow, so any exponent is fine.
    if base.is_zero() {
        return Ok(if exponent.is_zero() { BigInt::one() } else { BigInt::zero() });
    }
    if base.is_one() {
        return Ok(BigInt::one());
    }
    if *base == -BigInt::one() {
        return Ok(if exponent.is_even() { BigInt::one() } else { -BigInt::one() });
    }
    Ok(base.pow(bigint_to_u32_checked(exponent)?))
}

fn ordered(left: &Number, right: &Number, accept: fn(Ordering) -> bool) -> Number {
    left.compare(right).is_some_and(accept).into()
}

/// Pushes `1` if the deeper operand is less than the top one, `0` otherwise.
///
/// Comparisons are exact across integers and floats.
///
/// # Example
/// ```
/// use rpn::interpreter::{evaluator::binary::less, value::core::Number};
///
/// assert_eq!(less(&Number::from(1), &Number::from(1.5), "<").unwrap(), Number::from(1));
/// assert_eq!(less(&Number::from(2), &Number::from(1.5), "<").unwrap(), Number::from(0));
/// ```
pub fn less(left: &Number, right: &Number, _token: &str) -> EvalResult<Number> {
    Ok(ordered(left, right, Ordering::is_lt))
}

/// Less than or equal to.
pub fn less_equal(left: &Number, right: &Number, _token: &str) -> EvalResult<Number> {
    Ok(ordered(left, right, Ordering::is_le))
}

/// Equal to.
pub fn equal(left: &Number, right: &Number, _token: &str) -> EvalResult<Number> {
    Ok(ordered(left, right, Ordering::is_eq))
}

/// Not equal to. NaN is unequal to everything, including itself.
pub fn not_equal(left: &Number, right: &Number, _token: &str) -> EvalResult<Number> {
    Ok((!left.compare(right).is_some_and(Ordering::is_eq)).into())
}

/// Greater than.
pub fn greater(left: &Number, right: &Number, _token: &str) -> EvalResult<Number> {
    Ok(ordered(left, right, Ordering::is_gt))
}

/// Greater than or equal to.
pub fn greater_equal(left: &Number, right: &Number, _token: &str) -> EvalResult<Number> {
    Ok(ordered(left, right, Ordering::is_ge))
}

/// Boolean AND over truthiness.
///
/// Yields the deeper operand when it is falsy and the top operand otherwise,
/// so `0 5 &&` is `0` and `3 5 &&` is `5`.
pub fn logical_and(left: &Number, right: &Number, _token: &str) -> EvalResult<Number> {
    Ok(if left.is_truthy() { right.clone() } else { left.clone() })
}

/// Boolean OR over truthiness.
///
/// Yields the deeper operand when it is truthy and the top operand otherwise.
pub fn logical_or(left: &Number, right: &Number, _token: &str) -> EvalResult<Number> {
    Ok(if left.is_truthy() { left.clone() } else { right.clone() })
}

/// Boolean XOR over truthiness, pushing `1` or `0`.
pub fn logical_xor(left: &Number, right: &Number, _token: &str) -> EvalResult<Number> {
    Ok((left.is_truthy() != right.is_truthy()).into())
}

/// Bitwise AND of two integers.
///
/// # Example
/// ```
/// use rpn::interpreter::{evaluator::binary::bit_and, value::core::Number};
///
/// assert_eq!(bit_and(&Number::from(12), &Number::from(10), "&").unwrap(), Number::from(8));
/// assert!(bit_and(&Number::from(1.0), &Number::from(1), "&").is_err());
/// ```
pub fn bit_and(left: &Number, right: &Number, token: &str) -> EvalResult<Number> {
    integers(left, right, token, |a, b| a & b)
}

/// Bitwise OR of two integers.
pub fn bit_or(left: &Number, right: &Number, token: &str) -> EvalResult<Number> {
    integers(left, right, token, |a, b| a | b)
}

/// Bitwise XOR of two integers.
pub fn bit_xor(left: &Number, right: &Number, token: &str) -> EvalResult<Number> {
    integers(left, right, token, |a, b| a ^ b)
}

/// The larger of two numbers. On ties (or NaN) the deeper operand wins and
/// keeps its kind.
pub fn maximum(left: &Number, right: &Number, _token: &str) -> EvalResult<Number> {
    Ok(if right.compare(left) == Some(Ordering::Greater) { right.clone() } else { left.clone() })
}

/// The smaller of two numbers. On ties (or NaN) the deeper operand wins and
/// keeps its kind.
pub fn minimum(left: &Number, right: &Number, _token: &str) -> EvalResult<Number> {
    Ok(if right.compare(left) == Some(Ordering::Less) { right.clone() } else { left.clone() })
}
