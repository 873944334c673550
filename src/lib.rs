//! # rpn
//!
//! rpn is a reverse Polish notation calculator engine written in Rust.
//! It evaluates whitespace-separated tokens against a persistent operand stack
//! with support for arbitrary precision integers, floats, multi-base literals,
//! variables, macros, stack manipulation and display modes.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Provides the error type for evaluation.
///
/// This module defines every error that can be raised while evaluating an
/// expression. Each error carries the offending token or value so that the
/// message is meaningful on its own.
///
/// # Responsibilities
/// - Defines the `RuntimeError` enum for all failure modes.
/// - Implements `Display` and `std::error::Error` for reporting.
pub mod error;
/// Orchestrates the evaluation of expressions.
///
/// This module ties together literal recognition, the operation registry, the
/// session state and the number representation. It exposes the `Engine`, the
/// public entry point for evaluating input.
///
/// # Responsibilities
/// - Coordinates the lexer, the evaluator and the value types.
/// - Provides the entry points for evaluating user input.
/// - Manages the flow of data and errors between tokens.
pub mod interpreter;
/// General utilities for safe numeric conversion and float formatting.
///
/// # Responsibilities
/// - Safely convert between `BigInt`, `usize`, `u32`, `u16` and `f64` without
///   silent data loss.
/// - Format floats in their shortest round-trip form.
pub mod util;

pub use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Engine, EvalResult},
        value::core::Number,
    },
};

/// Evaluates an expression with a fresh engine and returns the top of the
/// stack.
///
/// Macros, variables and display settings do not outlive the call; use an
/// [`Engine`] to keep them.
///
/// # Errors
/// Returns the first error raised while evaluating, or
/// [`RuntimeError::EmptyStack`] if the expression leaves nothing on the stack.
///
/// # Examples
/// ```
/// use rpn::{Number, RuntimeError, evaluate_expression};
///
/// let result = evaluate_expression("8 10 x= x x * log");
/// assert_eq!(result, Ok(Number::from(2.0)));
///
/// // Division by zero is reported rather than producing infinity.
/// let result = evaluate_expression("1 0 /");
/// assert_eq!(result, Err(RuntimeError::DivisionByZero));
///
/// assert_eq!(evaluate_expression(""), Err(RuntimeError::EmptyStack));
/// ```
pub fn evaluate_expression(source: &str) -> Result<Number, RuntimeError> {
    let mut engine = Engine::new();
    engine.evaluate(source)?;
    engine.result().cloned().ok_or(RuntimeError::EmptyStack)
}
