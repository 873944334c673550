use crate::interpreter::{
    evaluator::{binary, core::EvalResult, function, unary},
    value::{core::Number, display::DisplayMode},
};

/// Handler of a constant pusher such as `pi`.
pub type NullaryFn = fn() -> EvalResult<Number>;
/// Handler of a one-operand function. Receives the operand and the token.
pub type UnaryFn = fn(&Number, &str) -> EvalResult<Number>;
/// Handler of a two-operand function. Receives the deeper operand first.
pub type BinaryFn = fn(&Number, &Number, &str) -> EvalResult<Number>;

/// The kind of an operation together with its strongly typed handler.
///
/// Pure functions pop their operands and push the result. Stack-control
/// operations act on the engine directly.
#[derive(Clone, Copy)]
pub enum Handler {
    /// Pushes a value without consuming operands.
    Nullary(NullaryFn),
    /// Consumes one operand and pushes the result.
    Unary(UnaryFn),
    /// Consumes two operands and pushes the result.
    Binary(BinaryFn),
    /// Mutates the engine state.
    Control(StackOp),
}

/// Operations that mutate the engine instead of computing a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackOp {
    /// Clears the stack and the variables.
    ClearAll,
    /// Clears the stack.
    ClearStack,
    /// Clears the variables.
    ClearVariables,
    /// Switches the display mode.
    SetMode(DisplayMode),
    /// Pushes a copy of the n-th item below the top.
    Pick,
    /// Executes the next token n times.
    Repeat,
    /// Pushes the stack depth.
    Depth,
    /// Drops the top item.
    Drop,
    /// Drops n items.
    DropN,
    /// Duplicates the top item.
    Dup,
    /// Duplicates the top n items in order.
    DupN,
    /// Moves the top n items to the bottom.
    RollUp,
    /// Moves the bottom n items to the top.
    RollDown,
    /// Toggles between horizontal and vertical rendering.
    ToggleOrientation,
    /// Swaps the two top items.
    Swap,
}

impl StackOp {
    /// The number of integer arguments the operation pops.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Pick | Self::Repeat | Self::DropN | Self::DupN | Self::RollUp | Self::RollDown => 1,
            _ => 0,
        }
    }
}

/// A registry entry.
pub struct Operation {
    /// The token that invokes the operation.
    pub name:        &'static str,
    /// The handler, which also fixes the arity.
    pub handler:     Handler,
    /// Human-readable description, used by help output only.
    pub description: &'static str,
}

impl Operation {
    /// The number of operands the operation requires on the stack.
    ///
    /// # Example
    /// ```
    /// use rpn::interpreter::evaluator::registry::lookup;
    ///
    /// assert_eq!(lookup("pi").unwrap().arity(), 0);
    /// assert_eq!(lookup("fact").unwrap().arity(), 1);
    /// assert_eq!(lookup("+").unwrap().arity(), 2);
    /// assert_eq!(lookup("roll").unwrap().arity(), 1);
    /// assert_eq!(lookup("swap").unwrap().arity(), 0);
    /// ```
    #[must_use]
    pub const fn arity(&self) -> usize {
        match self.handler {
            Handler::Nullary(_) => 0,
            Handler::Unary(_) => 1,
            Handler::Binary(_) => 2,
            Handler::Control(op) => op.arity(),
        }
    }
}

/// Defines the operation table.
///
/// Each entry provides:
/// - the token,
/// - the handler (which determines the arity),
/// - a description for help output.
///
/// The macro produces `OPERATIONS`, the static table in declaration order.
macro_rules! operations {
    (
        $(
            $name:literal => {
                handler: $handler:expr,
                about: $about:literal $(,)?
            }
        ),* $(,)?
    ) => {
        /// Every supported operation, in help listing order.
        pub static OPERATIONS: &[Operation] = &[
            $(
                Operation { name: $name, handler: $handler, description: $about },
            )*
        ];
    };
}

operations! {
    "+"     => { handler: Handler::Binary(binary::add), about: "Add" },
    "-"     => { handler: Handler::Binary(binary::subtract), about: "Subtract" },
    "*"     => { handler: Handler::Binary(binary::multiply), about: "Multiply" },
    "/"     => { handler: Handler::Binary(binary::divide), about: "Divide" },
    "cla"   => { handler: Handler::Control(StackOp::ClearAll), about: "Clear the stack and variables" },
    "clr"   => { handler: Handler::Control(StackOp::ClearStack), about: "Clear the stack" },
    "clv"   => { handler: Handler::Control(StackOp::ClearVariables), about: "Clear the variables" },
    "!"     => { handler: Handler::Unary(unary::logical_not), about: "Boolean NOT" },
    "!="    => { handler: Handler::Binary(binary::not_equal), about: "Not equal to" },
    "%"     => { handler: Handler::Binary(binary::modulo), about: "Modulus" },
    "++"    => { handler: Handler::Unary(unary::increment), about: "Increment" },
    "--"    => { handler: Handler::Unary(unary::decrement), about: "Decrement" },
    "&"     => { handler: Handler::Binary(binary::bit_and), about: "Bitwise AND" },
    "|"     => { handler: Handler::Binary(binary::bit_or), about: "Bitwise OR" },
    "^"     => { handler: Handler::Binary(binary::bit_xor), about: "Bitwise XOR" },
    "~"     => { handler: Handler::Unary(unary::bit_not), about: "Bitwise NOT" },
    "<<"    => { handler: Handler::Unary(unary::shift_left), about: "Bitwise shift left" },
    ">>"    => { handler: Handler::Unary(unary::shift_right), about: "Bitwise shift right" },
    "&&"    => { handler: Handler::Binary(binary::logical_and), about: "Boolean AND" },
    "||"    => { handler: Handler::Binary(binary::logical_or), about: "Boolean OR" },
    "^^"    => { handler: Handler::Binary(binary::logical_xor), about: "Boolean XOR" },
    "<"     => { handler: Handler::Binary(binary::less), about: "Less than" },
    "<="    => { handler: Handler::Binary(binary::less_equal), about: "Less than or equal to" },
    "=="    => { handler: Handler::Binary(binary::equal), about: "Equal to" },
    ">"     => { handler: Handler::Binary(binary::greater), about: "Greater than" },
    ">="    => { handler: Handler::Binary(binary::greater_equal), about: "Greater than or equal to" },
    "acos"  => { handler: Handler::Unary(function::acos), about: "Arc Cosine" },
    "asin"  => { handler: Handler::Unary(function::asin), about: "Arc Sine" },
    "atan"  => { handler: Handler::Unary(function::atan), about: "Arc Tangent" },
    "cos"   => { handler: Handler::Unary(function::cos), about: "Cosine" },
    "cosh"  => { handler: Handler::Unary(function::cosh), about: "Hyperbolic Cosine" },
    "sin"   => { handler: Handler::Unary(function::sin), about: "Sine" },
    "sinh"  => { handler: Handler::Unary(function::sinh), about: "Hyperbolic Sine" },
    "tanh"  => { handler: Handler::Unary(function::tanh), about: "Hyperbolic tangent" },
    "tan"   => { handler: Handler::Unary(function::tan), about: "Tangent" },
    "ceil"  => { handler: Handler::Unary(unary::ceil), about: "Ceiling" },
    "floor" => { handler: Handler::Unary(unary::floor), about: "Floor" },
    "round" => { handler: Handler::Unary(unary::round), about: "Round" },
    "ip"    => { handler: Handler::Unary(unary::integer_part), about: "Integer part" },
    "fp"    => { handler: Handler::Unary(unary::fractional_part), about: "Floating part" },
    "sign"  => { handler: Handler::Unary(unary::sign), about: "Push -1, 0, or 1 depending on the sign" },
    "abs"   => { handler: Handler::Unary(unary::absolute), about: "Absolute value" },
    "max"   => { handler: Handler::Binary(binary::maximum), about: "Max" },
    "min"   => { handler: Handler::Binary(binary::minimum), about: "Min" },
    "hex"   => { handler: Handler::Control(StackOp::SetMode(DisplayMode::Hexadecimal)), about: "Switch display mode to hexadecimal" },
    "dec"   => { handler: Handler::Control(StackOp::SetMode(DisplayMode::Decimal)), about: "Switch display mode to decimal (default)" },
    "bin"   => { handler: Handler::Control(StackOp::SetMode(DisplayMode::Binary)), about: "Switch display mode to binary" },
    "oct"   => { handler: Handler::Control(StackOp::SetMode(DisplayMode::Octal)), about: "Switch display mode to octal" },
    "e"     => { handler: Handler::Nullary(function::euler), about: "Push e" },
    "pi"    => { handler: Handler::Nullary(function::pi), about: "Push Pi" },
    "rand"  => { handler: Handler::Nullary(function::random), about: "Generate a random number" },
    "exp"   => { handler: Handler::Binary(binary::power), about: "Exponentiation" },
    "fact"  => { handler: Handler::Unary(unary::factorial), about: "Factorial" },
    "sqrt"  => { handler: Handler::Unary(function::sqrt), about: "Square Root" },
    "ln"    => { handler: Handler::Unary(function::ln), about: "Natural Logarithm" },
    "log"   => { handler: Handler::Unary(function::log10), about: "Logarithm" },
    "pow"   => { handler: Handler::Binary(binary::power_reversed), about: "Raise a number to a power" },
    "hnl"   => { handler: Handler::Unary(unary::host_to_network_long), about: "Host to network long" },
    "hns"   => { handler: Handler::Unary(unary::host_to_network_short), about: "Host to network short" },
    "nhl"   => { handler: Handler::Unary(unary::network_to_host_long), about: "Network to host long" },
    "nhs"   => { handler: Handler::Unary(unary::network_to_host_short), about: "Network to host short" },
    "pick"  => { handler: Handler::Control(StackOp::Pick), about: "Pick the -n'th item from the stack" },
    "repeat" => { handler: Handler::Control(StackOp::Repeat), about: "Repeat op, e.g. '3 repeat +'" },
    "depth" => { handler: Handler::Control(StackOp::Depth), about: "Push the current stack depth" },
    "drop"  => { handler: Handler::Control(StackOp::Drop), about: "Drops the top item from the stack" },
    "dropn" => { handler: Handler::Control(StackOp::DropN), about: "Drops n items from the stack" },
    "dup"   => { handler: Handler::Control(StackOp::Dup), about: "Duplicates the top stack item" },
    "dupn"  => { handler: Handler::Control(StackOp::DupN), about: "Duplicates the top n stack items in order" },
    "roll"  => { handler: Handler::Control(StackOp::RollUp), about: "Roll the stack upwards by n" },
    "rolld" => { handler: Handler::Control(StackOp::RollDown), about: "Roll the stack downwards by n" },
    "stack" => { handler: Handler::Control(StackOp::ToggleOrientation), about: "Toggles stack display from horizontal to vertical" },
    "swap"  => { handler: Handler::Control(StackOp::Swap), about: "Swap the top 2 stack items" },
}

/// Looks up the operation invoked by `token`.
///
/// # Returns
/// `Some(&Operation)` for a registered token, `None` otherwise.
///
/// # Example
/// ```
/// use rpn::interpreter::evaluator::registry::lookup;
///
/// assert_eq!(lookup("swap").unwrap().description, "Swap the top 2 stack items");
/// assert!(lookup("frobnicate").is_none());
/// ```
#[must_use]
pub fn lookup(token: &str) -> Option<&'static Operation> {
    OPERATIONS.iter().find(|operation| operation.name == token)
}
