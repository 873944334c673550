use std::f64::consts;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Number},
};

/// Applies a real function and classifies non-finite results.
///
/// A NaN produced from a non-NaN argument means the argument was outside the
/// function's domain; an infinity produced from a finite argument means the
/// result overflowed.
fn checked_real(x: f64, op: fn(f64) -> f64, token: &str) -> EvalResult<Number> {
    let y = op(x);
    if y.is_nan() && !x.is_nan() {
        return Err(RuntimeError::MathDomain { token: token.to_string() });
    }
    if y.is_infinite() && x.is_finite() {
        return Err(RuntimeError::overflow(format!("{token} result is too large")));
    }
    Ok(Number::Real(y))
}

/// Applies a unary real builtin to a number.
///
/// The generated functions accept one operand. Integers are converted to
/// `f64` first; the result is always a float.
///
/// # Example
/// ```
/// use rpn::interpreter::{evaluator::function::cos, value::core::Number};
///
/// assert_eq!(cos(&Number::from(0), "cos").unwrap(), Number::from(1.0));
/// ```
macro_rules! real_builtin {
    ($fname:ident, $real_fn:ident) => {
        pub fn $fname(value: &Number, token: &str) -> EvalResult<Number> {
            checked_real(value.as_real()?, f64::$real_fn, token)
        }
    };
}

real_builtin!(sin, sin);
real_builtin!(cos, cos);
real_builtin!(tan, tan);
real_builtin!(asin, asin);
real_builtin!(acos, acos);
real_builtin!(atan, atan);
real_builtin!(sinh, sinh);
real_builtin!(cosh, cosh);
real_builtin!(tanh, tanh);
real_builtin!(sqrt, sqrt);

/// Natural logarithm. Non-positive arguments are a domain error.
///
/// # Example
/// ```
/// use rpn::interpreter::{evaluator::function::ln, value::core::Number};
///
/// assert_eq!(ln(&Number::from(1), "ln").unwrap(), Number::from(0.0));
/// assert!(ln(&Number::from(0), "ln").is_err());
/// ```
pub fn ln(value: &Number, token: &str) -> EvalResult<Number> {
    logarithm(value, f64::ln, token)
}

/// Base-10 logarithm. Non-positive arguments are a domain error.
///
/// # Example
/// ```
/// use rpn::interpreter::{evaluator::function::log10, value::core::Number};
///
/// assert_eq!(log10(&Number::from(100), "log").unwrap(), Number::from(2.0));
/// assert!(log10(&Number::from(-1.0), "log").is_err());
/// ```
pub fn log10(value: &Number, token: &str) -> EvalResult<Number> {
    logarithm(value, f64::log10, token)
}

fn logarithm(value: &Number, op: fn(f64) -> f64, token: &str) -> EvalResult<Number> {
    let x = value.as_real()?;
    if x <= 0.0 {
        return Err(RuntimeError::MathDomain { token: token.to_string() });
    }
    checked_real(x, op, token)
}

/// Pushes Euler's number.
pub fn euler() -> EvalResult<Number> {
    Ok(Number::Real(consts::E))
}

/// Pushes π.
pub fn pi() -> EvalResult<Number> {
    Ok(Number::Real(consts::PI))
}

/// Pushes a uniformly distributed pseudo-random value in `[0, 1)`.
pub fn random() -> EvalResult<Number> {
    Ok(Number::Real(rand::random::<f64>()))
}
