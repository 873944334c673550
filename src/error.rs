/// Evaluation errors.
///
/// Contains every error that can be raised while a token sequence is being
/// evaluated. Runtime errors include unknown tokens, stack underflow, type
/// mismatches between operands, division by zero and values that do not fit
/// into the requested representation.
pub mod runtime_error;

pub use runtime_error::RuntimeError;
