use num_bigint::BigInt;
use num_traits::Signed;

use crate::interpreter::value::core::Number;

/// Governs how integers are rendered. Floats are unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Plain decimal, the default.
    #[default]
    Decimal,
    /// `0o` prefixed octal.
    Octal,
    /// `0b` prefixed binary.
    Binary,
    /// `0x` prefixed lowercase hexadecimal.
    Hexadecimal,
}

/// Governs how rendered stack entries are separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Entries separated by single spaces.
    #[default]
    Horizontal,
    /// One entry per line.
    Vertical,
}

impl Orientation {
    /// Returns the other orientation.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// The separator placed between rendered entries.
    #[must_use]
    pub const fn separator(self) -> &'static str {
        match self {
            Self::Horizontal => " ",
            Self::Vertical => "\n",
        }
    }
}

impl DisplayMode {
    /// Renders a single number according to this mode.
    ///
    /// Negative integers carry their sign in front of the base prefix.
    ///
    /// # Example
    /// ```
    /// use rpn::interpreter::value::{core::Number, display::DisplayMode};
    ///
    /// assert_eq!(DisplayMode::Hexadecimal.render(&Number::from(255)), "0xff");
    /// assert_eq!(DisplayMode::Octal.render(&Number::from(-8)), "-0o10");
    /// assert_eq!(DisplayMode::Binary.render(&Number::from(5)), "0b101");
    /// assert_eq!(DisplayMode::Binary.render(&Number::from(0.5)), "0.5");
    /// ```
    #[must_use]
    pub fn render(self, number: &Number) -> String {
        match number {
            Number::Integer(n) => match self {
                Self::Decimal => n.to_string(),
                Self::Octal => prefixed(n, "0o", 8),
                Self::Binary => prefixed(n, "0b", 2),
                Self::Hexadecimal => prefixed(n, "0x", 16),
            },
            Number::Real(_) => number.to_string(),
        }
    }
}

fn prefixed(n: &BigInt, prefix: &str, radix: u32) -> String {
    let sign = if n.is_negative() { "-" } else { "" };
    format!("{sign}{prefix}{}", n.magnitude().to_str_radix(radix))
}
