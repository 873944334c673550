#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while evaluating an expression.
pub enum RuntimeError {
    /// The token is neither a literal, an assignment nor a known operation.
    UnsupportedOperation {
        /// The offending token.
        token: String,
    },
    /// The stack holds fewer items than the operation consumes.
    InsufficientOperands {
        /// The number of operands the operation needs.
        required: usize,
        /// The operation token.
        token:    String,
    },
    /// A float was supplied where the operation requires an integer argument.
    InvalidIntegerArgument {
        /// The operation token.
        token: String,
    },
    /// The operand types are not supported by the operation, such as the
    /// factorial of a float or a bitwise operation on a float.
    IncompatibleOperands {
        /// The operation token.
        token: String,
    },
    /// Attempted division by zero.
    DivisionByZero,
    /// An assignment was requested while the stack was empty.
    NoValueToAssign {
        /// The name of the variable.
        name: String,
    },
    /// A `macro` command without a valid name.
    MalformedMacroDefinition,
    /// The argument lies outside the domain of a mathematical function.
    MathDomain {
        /// The operation token.
        token: String,
    },
    /// A value does not fit into the representation required by the
    /// operation.
    Overflow {
        /// Details about the value that overflowed.
        details: String,
    },
    /// Tried to pick a stack item that does not exist.
    StackIndexOutOfRange {
        /// The requested offset below the top of the stack.
        index: String,
        /// The stack depth at the time of the request.
        depth: usize,
    },
    /// A result was requested from an empty stack.
    EmptyStack,
}

impl RuntimeError {
    /// Builds an [`RuntimeError::Overflow`] from any displayable detail.
    pub(crate) fn overflow(details: impl Into<String>) -> Self {
        Self::Overflow { details: details.into() }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedOperation { token } => write!(f, "Unsupported operation: {token}"),
            Self::InsufficientOperands { required, token } => {
                write!(f, "Insufficient operands: {required} required for {token}")
            },
            Self::InvalidIntegerArgument { token } => {
                write!(f, "Integer argument required for {token}")
            },
            Self::IncompatibleOperands { token } => {
                write!(f, "The operation {token} is not compatible with the operands")
            },
            Self::DivisionByZero => write!(f, "Division by zero!"),
            Self::NoValueToAssign { name } => write!(f, "No value to assign to {name}"),
            Self::MalformedMacroDefinition => {
                write!(f, "Malformed macro definition, expected 'macro <name> <tokens>'")
            },
            Self::MathDomain { token } => write!(f, "Math domain error in {token}"),
            Self::Overflow { details } => write!(f, "Numeric overflow: {details}"),
            Self::StackIndexOutOfRange { index, depth } => write!(f,
                                                                  "Stack index {index} is out of range for a stack of depth {depth}"),
            Self::EmptyStack => write!(f, "The stack is empty"),
        }
    }
}

impl std::error::Error for RuntimeError {}
