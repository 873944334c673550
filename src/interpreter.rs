/// The evaluator module executes token sequences against the session state.
///
/// The evaluator owns the operand stack, the variable bindings and the macro
/// table. It expands macros, classifies every token as an assignment, a
/// literal or an operation, dispatches operations through the registry and
/// rolls the stack back when an expression fails.
///
/// # Responsibilities
/// - Evaluates token sequences, performing all supported operations.
/// - Handles variables, macros and the repeat counter.
/// - Reports runtime errors such as division by zero or stack underflow.
pub mod evaluator;
/// The lexer module recognizes numeric literals inside single tokens.
///
/// Tokens are whitespace-delimited; the lexer decides whether a token is a
/// multi-base integer or a floating-point literal. Everything else is left to
/// the evaluator to resolve as a variable or an operation.
///
/// # Responsibilities
/// - Selects the integer base from the literal prefix.
/// - Falls back to floating-point notation.
/// - Rejects tokens that are only partially numeric.
pub mod lexer;
/// The value module defines the runtime number type and its rendering.
///
/// # Responsibilities
/// - Defines the `Number` enum (arbitrary precision integer or float).
/// - Implements conversion, truthiness and exact comparison.
/// - Renders numbers according to the display mode.
pub mod value;
