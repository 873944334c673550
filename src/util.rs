/// Numeric conversion and formatting helpers.
///
/// This module provides safe functions for converting between arbitrary
/// precision integers, machine integers and `f64` without silent data loss,
/// together with the canonical textual form of floating-point values.
///
/// All conversion functions return a `Result`, which is `Ok` if the conversion
/// is lossless and valid, or an error if the value is out of range.
pub mod num;
