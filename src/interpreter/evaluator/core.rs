use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            macros::MacroTable,
            registry::{self, Handler, Operation},
        },
        lexer::{is_identifier, parse_literal},
        value::{
            core::Number,
            display::{DisplayMode, Orientation},
        },
    },
};

/// The result type used throughout evaluation.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The repeat counter value meaning "execute the next token once".
pub(crate) const DEFAULT_REPEAT: usize = 1;

/// The first token of a macro definition.
const MACRO_KEYWORD: &str = "macro";

/// A calculator session.
///
/// The engine holds everything that persists between calls to
/// [`Engine::evaluate`]: the operand stack, variables, macros, the display
/// mode, the stack orientation and the pending repeat count.
///
/// # Example
/// ```
/// use rpn::{Engine, Number};
///
/// let mut engine = Engine::new();
/// engine.evaluate("3 4 +").unwrap();
/// engine.evaluate("2 *").unwrap();
/// assert_eq!(engine.result(), Some(&Number::from(14)));
///
/// // A failing call leaves the stack as it was.
/// assert!(engine.evaluate("1 0 /").is_err());
/// assert_eq!(engine.display(), "14");
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    pub(crate) stack:       Vec<Number>,
    pub(crate) variables:   HashMap<String, Number>,
    pub(crate) macros:      MacroTable,
    pub(crate) mode:        DisplayMode,
    pub(crate) orientation: Orientation,
    pub(crate) repeat:      usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with an empty stack and no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self { stack:       Vec::new(),
               variables:   HashMap::new(),
               macros:      MacroTable::default(),
               mode:        DisplayMode::default(),
               orientation: Orientation::default(),
               repeat:      DEFAULT_REPEAT, }
    }

    /// Evaluates one line of input.
    ///
    /// A line starting with `macro` defines a macro. Any other line is
    /// macro-expanded and executed token by token. If a token fails, the
    /// remaining tokens are skipped and the stack is restored to its state
    /// before the call; variables, macros, display settings and the repeat
    /// counter keep whatever changes the executed tokens made.
    ///
    /// # Parameters
    /// - `source`: Whitespace-separated tokens.
    ///
    /// # Returns
    /// - `Ok(())`: If every token executed.
    /// - `Err(RuntimeError)`: The first failure.
    ///
    /// # Example
    /// ```
    /// use rpn::{Engine, Number};
    ///
    /// let mut engine = Engine::new();
    /// engine.evaluate("macro sq dup *").unwrap();
    /// engine.evaluate("7 sq").unwrap();
    /// assert_eq!(engine.result(), Some(&Number::from(49)));
    /// ```
    pub fn evaluate(&mut self, source: &str) -> EvalResult<()> {
        let mut raw = source.split_whitespace();
        if raw.next() == Some(MACRO_KEYWORD) {
            return self.define_macro(raw);
        }

        let expanded = self.macros.expand(source);
        let snapshot = self.stack.clone();

        for token in expanded.split_whitespace() {
            if let Err(error) = self.eval_repeated(token) {
                debug!(%error, token, depth = snapshot.len(), "rolling back stack");
                self.stack = snapshot;
                return Err(error);
            }
        }
        Ok(())
    }

    /// Evaluates a multi-line script, one [`Engine::evaluate`] call per line.
    ///
    /// Each line is rolled back on its own, so a failing line does not stop
    /// the script, and `macro` definitions work on any line.
    ///
    /// # Returns
    /// The 1-based number and error of every failing line.
    ///
    /// # Example
    /// ```
    /// use rpn::{Engine, Number, RuntimeError};
    ///
    /// let mut engine = Engine::new();
    /// let failures = engine.evaluate_lines("macro sq dup *\n1 0 /\n3 sq");
    ///
    /// assert_eq!(failures, [(2, RuntimeError::DivisionByZero)]);
    /// assert_eq!(engine.result(), Some(&Number::from(9)));
    /// ```
    pub fn evaluate_lines(&mut self, script: &str) -> Vec<(usize, RuntimeError)> {
        script.lines()
              .enumerate()
              .filter_map(|(index, line)| self.evaluate(line).err().map(|error| (index + 1, error)))
              .collect()
    }

    /// Executes a token, honoring a pending repeat count.
    fn eval_repeated(&mut self, token: &str) -> EvalResult<()> {
        if self.repeat > DEFAULT_REPEAT {
            for _ in DEFAULT_REPEAT..self.repeat {
                self.eval_token(token)?;
            }
            self.repeat = DEFAULT_REPEAT;
        }
        self.eval_token(token)
    }

    /// Executes a single token.
    ///
    /// The token is tried as an assignment, then as a literal (variables
    /// first), then as a registered operation.
    fn eval_token(&mut self, token: &str) -> EvalResult<()> {
        if let Some(name) = token.strip_suffix('=')
           && is_identifier(name)
        {
            return self.assign(name);
        }

        if let Some(value) = self.resolve_literal(token) {
            self.stack.push(value);
            return Ok(());
        }

        let operation =
            registry::lookup(token).ok_or_else(|| RuntimeError::UnsupportedOperation { token: token.to_string() })?;
        self.eval_operation(operation, token)
    }

    /// Binds `name` to the top of the stack without popping it.
    fn assign(&mut self, name: &str) -> EvalResult<()> {
        let value = self.stack
                        .last()
                        .cloned()
                        .ok_or_else(|| RuntimeError::NoValueToAssign { name: name.to_string() })?;

        debug!(name, %value, "binding variable");
        self.variables.insert(name.to_string(), value);
        Ok(())
    }

    fn resolve_literal(&self, token: &str) -> Option<Number> {
        self.variables
            .get(token)
            .cloned()
            .or_else(|| parse_literal(token))
    }

    /// Checks the arity, pops the operands and dispatches to the handler.
    fn eval_operation(&mut self, operation: &Operation, token: &str) -> EvalResult<()> {
        trace!(token, depth = self.stack.len(), "dispatching operation");

        let required = operation.arity();
        if self.stack.len() < required {
            return Err(RuntimeError::InsufficientOperands { required,
                                                            token: token.to_string() });
        }

        let value = match operation.handler {
            Handler::Nullary(op) => op()?,
            Handler::Unary(op) => {
                let [value] = self.pop_operands(token)?;
                op(&value, token)?
            },
            Handler::Binary(op) => {
                let [left, right] = self.pop_operands(token)?;
                op(&left, &right, token)?
            },
            Handler::Control(op) => return self.eval_control(op, token),
        };

        self.stack.push(value);
        Ok(())
    }

    /// Pops the top `N` items, deepest first.
    ///
    /// # Returns
    /// - `Ok([Number; N])`: The operands in stack order.
    /// - `Err(RuntimeError::InsufficientOperands)`: If fewer than `N` items
    ///   are on the stack. Nothing is popped in that case.
    pub(crate) fn pop_operands<const N: usize>(&mut self, token: &str) -> EvalResult<[Number; N]> {
        let insufficient = || RuntimeError::InsufficientOperands { required: N,
                                                                   token:    token.to_string(), };

        let depth = self.stack.len();
        if depth < N {
            return Err(insufficient());
        }
        self.stack.split_off(depth - N).try_into().map_err(|_| insufficient())
    }

    /// The top of the stack, or `None` if the stack is empty.
    #[must_use]
    pub fn result(&self) -> Option<&Number> {
        self.stack.last()
    }

    /// Renders the stack bottom to top using the current display mode and
    /// orientation.
    ///
    /// # Example
    /// ```
    /// use rpn::Engine;
    ///
    /// let mut engine = Engine::new();
    /// engine.evaluate("255 -8 0.5 hex").unwrap();
    /// assert_eq!(engine.display(), "0xff -0x8 0.5");
    ///
    /// engine.evaluate("stack").unwrap();
    /// assert_eq!(engine.display(), "0xff\n-0x8\n0.5");
    /// ```
    #[must_use]
    pub fn display(&self) -> String {
        self.stack
            .iter()
            .map(|number| self.mode.render(number))
            .collect::<Vec<_>>()
            .join(self.orientation.separator())
    }

    /// The operand stack, bottom first.
    #[must_use]
    pub fn stack(&self) -> &[Number] {
        &self.stack
    }

    /// The value bound to the variable `name`.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Number> {
        self.variables.get(name)
    }

    /// The expansion of the macro `name`.
    #[must_use]
    pub fn macro_expansion(&self, name: &str) -> Option<&str> {
        self.macros.get(name)
    }

    /// The macro table.
    #[must_use]
    pub const fn macros(&self) -> &MacroTable {
        &self.macros
    }

    #[must_use]
    pub const fn mode(&self) -> DisplayMode {
        self.mode
    }

    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }
}
