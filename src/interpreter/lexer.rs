use logos::Logos;
use num_bigint::BigInt;

use crate::interpreter::value::core::Number;

/// Represents a numeric literal recognized inside a single token.
///
/// The base of an integer is chosen by its prefix. When a token could be read
/// both as an integer and as a float, the integer reading wins; a token
/// rejected by its integer base may still be a float (`09` is `9.0`).
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Literal {
    /// Hexadecimal integers such as `0xff`.
    #[regex(r"0x_?[0-9a-fA-F](_?[0-9a-fA-F])*", |lex| parse_radix(&lex.slice()[2..], 16), priority = 10)]
    Hexadecimal(BigInt),
    /// Binary integers such as `0b101`.
    #[regex(r"0b_?[01](_?[01])*", |lex| parse_radix(&lex.slice()[2..], 2), priority = 10)]
    Binary(BigInt),
    /// Octal integers, any integer with a leading zero such as `017`. An
    /// explicit `0o` prefix is accepted as well.
    #[regex(r"0(_?[0-7])*", |lex| parse_radix(lex.slice(), 8), priority = 9)]
    #[regex(r"0[oO]_?[0-7](_?[0-7])*", |lex| parse_radix(&lex.slice()[2..], 8), priority = 9)]
    Octal(BigInt),
    /// Decimal integers such as `42`, `-3` or `+1_000`.
    #[regex(r"[1-9](_?[0-9])*", |lex| parse_radix(lex.slice(), 10), priority = 9)]
    #[regex(r"[+-][0-9](_?[0-9])*", |lex| parse_radix(lex.slice(), 10), priority = 9)]
    Decimal(BigInt),
    /// Floating-point literals such as `3.14`, `.5`, `1.`, `2e10` or `nan`.
    #[regex(r"[+-]?[0-9](_?[0-9])*\.?([eE][+-]?[0-9](_?[0-9])*)?", parse_float, priority = 3)]
    #[regex(r"[+-]?([0-9](_?[0-9])*)?\.[0-9](_?[0-9])*([eE][+-]?[0-9](_?[0-9])*)?", parse_float, priority = 3)]
    #[regex(r"[+-]?([iI][nN][fF]([iI][nN][iI][tT][yY])?|[nN][aA][nN])", parse_float, priority = 3)]
    Real(f64),
}

impl From<Literal> for Number {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Hexadecimal(n) | Literal::Binary(n) | Literal::Octal(n) | Literal::Decimal(n) => {
                Self::Integer(n)
            },
            Literal::Real(r) => Self::Real(r),
        }
    }
}

/// Reads a token as a numeric literal.
///
/// The whole token must be consumed by a single literal; a token with a valid
/// literal prefix followed by anything else (`0x`, `12abc`, `-0x10`) is not a
/// literal.
///
/// # Parameters
/// - `token`: A single whitespace-free token.
///
/// # Returns
/// - `Some(Number)`: The value the token denotes.
/// - `None`: If the token is not a numeric literal.
///
/// # Example
/// ```
/// use rpn::interpreter::{lexer::parse_literal, value::core::Number};
///
/// assert_eq!(parse_literal("0x10"), Some(Number::from(16)));
/// assert_eq!(parse_literal("0b101"), Some(Number::from(5)));
/// assert_eq!(parse_literal("017"), Some(Number::from(15)));
/// assert_eq!(parse_literal("-42"), Some(Number::from(-42)));
/// assert_eq!(parse_literal("09"), Some(Number::from(9.0)));
/// assert_eq!(parse_literal("2.5e1"), Some(Number::from(25.0)));
/// assert_eq!(parse_literal("swap"), None);
/// assert_eq!(parse_literal("-0x10"), None);
/// ```
#[must_use]
pub fn parse_literal(token: &str) -> Option<Number> {
    let mut lexer = Literal::lexer(token);
    let literal = lexer.next()?.ok()?;

    if lexer.next().is_some() {
        return None;
    }

    Some(literal.into())
}

/// Parses the digits of an integer literal in the given radix.
///
/// # Parameters
/// - `digits`: The literal without its base prefix, optionally signed and
///   containing single underscores between digits.
/// - `radix`: The numeric base.
///
/// # Returns
/// - `Some(BigInt)`: The parsed value.
/// - `None`: If the digits are not valid in that base.
fn parse_radix(digits: &str, radix: u32) -> Option<BigInt> {
    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    let unsigned = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    BigInt::parse_bytes(unsigned.as_bytes(), radix)
}

/// Parses a floating-point literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed floating-point value if successful.
/// - `None`: If the token slice is not a valid float.
fn parse_float(lex: &logos::Lexer<Literal>) -> Option<f64> {
    let cleaned: String = lex.slice().chars().filter(|&c| c != '_').collect();
    cleaned.parse().ok()
}

/// Returns `true` if `name` can name a variable or a macro.
///
/// Identifiers start with an ASCII letter or underscore, followed by ASCII
/// letters, digits or underscores.
///
/// # Example
/// ```
/// use rpn::interpreter::lexer::is_identifier;
///
/// assert!(is_identifier("rate_2"));
/// assert!(is_identifier("_tmp"));
/// assert!(!is_identifier("2x"));
/// assert!(!is_identifier("<"));
/// assert!(!is_identifier(""));
/// ```
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
