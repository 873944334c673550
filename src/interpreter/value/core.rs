use std::cmp::Ordering;

use num_bigint::BigInt;
use num_traits::{FromPrimitive, Signed, Zero};

use crate::{
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
    util::num::{bigint_to_f64_checked, format_real},
};

/// Represents a value on the operand stack.
///
/// Operations on two integers produce an integer unless the operation is
/// defined to produce a float; any float operand produces a float result.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// An arbitrary precision signed integer.
    Integer(BigInt),
    /// A double precision floating-point value.
    Real(f64),
}

impl From<BigInt> for Number {
    fn from(v: BigInt) -> Self {
        Self::Integer(v)
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Self::Integer(v.into())
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for Number {
    fn from(v: bool) -> Self {
        Self::Integer(u8::from(v).into())
    }
}

impl Number {
    /// Converts the number to an `f64`.
    ///
    /// Reals are returned unchanged. Integers are converted, failing if they
    /// lie beyond the finite `f64` range.
    ///
    /// # Returns
    /// - `Ok(f64)`: If the value is real or a representable integer.
    /// - `Err(RuntimeError::Overflow)`: If the integer is too large.
    ///
    /// # Example
    /// ```
    /// use rpn::interpreter::value::core::Number;
    ///
    /// let x = Number::from(10);
    /// assert_eq!(x.as_real().unwrap(), 10.0);
    /// ```
    pub fn as_real(&self) -> EvalResult<f64> {
        match self {
            Self::Real(r) => Ok(*r),
            Self::Integer(n) => bigint_to_f64_checked(n),
        }
    }

    /// Returns the integer value, or an `InvalidIntegerArgument` error naming
    /// `token` if the number is a float.
    ///
    /// Used by operations whose arguments must be integers, such as `pick`
    /// or `repeat`.
    pub fn as_integer(&self, token: &str) -> EvalResult<&BigInt> {
        match self {
            Self::Integer(n) => Ok(n),
            Self::Real(_) => Err(RuntimeError::InvalidIntegerArgument { token: token.to_string() }),
        }
    }

    /// Returns the truthiness of the number: zero is false, everything else
    /// (including NaN) is true.
    ///
    /// # Example
    /// ```
    /// use rpn::interpreter::value::core::Number;
    ///
    /// assert!(!Number::from(0).is_truthy());
    /// assert!(!Number::from(-0.0).is_truthy());
    /// assert!(Number::from(f64::NAN).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Integer(n) => !n.is_zero(),
            Self::Real(r) => *r != 0.0,
        }
    }

    /// Returns `true` if the number is zero of either kind.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        !self.is_truthy()
    }

    /// Compares two numbers exactly, even across integers and floats.
    ///
    /// Integers are never rounded to `f64` for the comparison, so a huge
    /// integer compares correctly against a float close to it. Any comparison
    /// involving NaN is unordered.
    ///
    /// # Returns
    /// `Some(Ordering)` for ordered operands, `None` when NaN is involved.
    ///
    /// # Example
    /// ```
    /// use std::cmp::Ordering;
    ///
    /// use rpn::interpreter::value::core::Number;
    ///
    /// assert_eq!(Number::from(1).compare(&Number::from(1.0)), Some(Ordering::Equal));
    /// assert_eq!(Number::from(2).compare(&Number::from(1.5)), Some(Ordering::Greater));
    /// assert_eq!(Number::from(2).compare(&Number::from(f64::NAN)), None);
    /// ```
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::Real(a), Self::Real(b)) => a.partial_cmp(b),
            (Self::Integer(a), Self::Real(b)) => compare_integer_real(a, *b),
            (Self::Real(a), Self::Integer(b)) => {
                compare_integer_real(b, *a).map(Ordering::reverse)
            },
        }
    }

    /// Returns the absolute value, keeping the number kind.
    #[must_use]
    pub fn abs(&self) -> Self {
        match self {
            Self::Integer(n) => Self::Integer(n.abs()),
            Self::Real(r) => Self::Real(r.abs()),
        }
    }
}

/// Compares an integer against a float without rounding the integer.
fn compare_integer_real(integer: &BigInt, real: f64) -> Option<Ordering> {
    if real.is_nan() {
        return None;
    }
    if real.is_infinite() {
        return Some(if real > 0.0 { Ordering::Less } else { Ordering::Greater });
    }

    let whole = BigInt::from_f64(real.trunc())?;
    match integer.cmp(&whole) {
        Ordering::Equal => 0.0_f64.partial_cmp(&real.fract()),
        unequal => Some(unequal),
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{}", format_real(*r)),
        }
    }
}
