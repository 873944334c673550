/// Number representation.
///
/// Defines the `Number` type held on the operand stack: either an arbitrary
/// precision integer or a double precision float. Includes the conversions,
/// truthiness and exact mixed-type comparison every operation builds upon.
pub mod core;
/// Stack rendering.
///
/// Defines the display mode and stack orientation that govern how the
/// operand stack is rendered as text. Rendering never affects arithmetic.
pub mod display;
