/// Core evaluation logic and session state.
///
/// Contains the `Engine`, the per-expression evaluation loop, token
/// classification, the repeat counter and the stack rollback on failure.
pub mod core;

/// The operation registry.
///
/// Maps every operation token to its arity, its handler and a description.
pub mod registry;

/// Binary operation logic.
///
/// Arithmetic, comparison, boolean, bitwise and min/max operations on two
/// operands.
pub mod binary;

/// Unary operation logic.
///
/// Increment, negations, shifts, rounding, part extraction, factorial and
/// byte order conversion.
pub mod unary;

/// Transcendental functions and constants.
pub mod function;

/// Stack-control operations.
///
/// Operations that mutate the engine directly instead of pushing a computed
/// value: clearing, display modes, drop, duplicate, rotate, pick, swap and
/// repeat.
pub mod stack;

/// Macro definition and expansion.
pub mod macros;
