use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{DEFAULT_REPEAT, Engine, EvalResult},
            registry::StackOp,
        },
        value::core::Number,
    },
    util::num::bigint_to_usize_checked,
};

impl Engine {
    /// Executes a stack-control operation.
    ///
    /// The operation's integer argument, if any, is popped here; the caller
    /// has already verified that the stack is deep enough for it.
    ///
    /// # Parameters
    /// - `op`: The operation to execute.
    /// - `token`: The token that invoked it, for error reporting.
    pub(crate) fn eval_control(&mut self, op: StackOp, token: &str) -> EvalResult<()> {
        match op {
            StackOp::ClearAll => {
                self.stack.clear();
                self.variables.clear();
            },
            StackOp::ClearStack => self.stack.clear(),
            StackOp::ClearVariables => self.variables.clear(),
            StackOp::SetMode(mode) => self.mode = mode,
            StackOp::ToggleOrientation => self.orientation = self.orientation.toggled(),
            StackOp::Depth => self.stack.push(BigInt::from(self.stack.len()).into()),
            StackOp::Drop => self.drop_items(1, token)?,
            StackOp::Dup => self.duplicate(1, token)?,
            StackOp::Swap => self.swap(token)?,
            StackOp::Pick => {
                let offset = self.pop_count(token)?;
                let item = self.pick(&offset)?;
                self.stack.push(item);
            },
            StackOp::Repeat => {
                let count = self.pop_count(token)?;
                self.repeat = if count > BigInt::one() {
                    bigint_to_usize_checked(&count)?
                } else {
                    DEFAULT_REPEAT
                };
            },
            StackOp::DropN => {
                let count = self.pop_count(token)?;
                if count.is_positive() {
                    self.drop_items(bigint_to_usize_checked(&count)?, token)?;
                }
            },
            StackOp::DupN => {
                let count = self.pop_count(token)?;
                if count.is_positive() {
                    let depth = self.stack.len();
                    let count = count.to_usize().map_or(depth, |count| count.min(depth));
                    self.duplicate(count, token)?;
                }
            },
            StackOp::RollUp => {
                let count = self.pop_count(token)?;
                if let Some(shift) = self.rotation(&count) {
                    self.stack.rotate_right(shift);
                }
            },
            StackOp::RollDown => {
                let count = self.pop_count(token)?;
                if let Some(shift) = self.rotation(&count) {
                    self.stack.rotate_left(shift);
                }
            },
        }
        Ok(())
    }

    /// Pops the integer argument of a stack-control operation.
    fn pop_count(&mut self, token: &str) -> EvalResult<BigInt> {
        let [argument] = self.pop_operands(token)?;
        Ok(argument.as_integer(token)?.clone())
    }

    /// Removes `count` items from the top of the stack.
    fn drop_items(&mut self, count: usize, token: &str) -> EvalResult<()> {
        let depth = self.stack.len();
        if count > depth {
            return Err(RuntimeError::InsufficientOperands { required: count,
                                                            token:    token.to_string(), });
        }
        self.stack.truncate(depth - count);
        Ok(())
    }

    /// Pushes copies of the top `count` items, preserving their order.
    fn duplicate(&mut self, count: usize, token: &str) -> EvalResult<()> {
        let depth = self.stack.len();
        if count > depth {
            return Err(RuntimeError::InsufficientOperands { required: count,
                                                            token:    token.to_string(), });
        }
        self.stack.extend_from_within(depth - count..);
        Ok(())
    }

    fn swap(&mut self, token: &str) -> EvalResult<()> {
        let depth = self.stack.len();
        if depth < 2 {
            return Err(RuntimeError::InsufficientOperands { required: 2,
                                                            token:    token.to_string(), });
        }
        self.stack.swap(depth - 1, depth - 2);
        Ok(())
    }

    /// Returns a copy of the item `offset` places below the top.
    ///
    /// Offset `0` is the top itself. Negative offsets count from the bottom,
    /// `-1` being the bottom-most item.
    fn pick(&self, offset: &BigInt) -> EvalResult<Number> {
        let depth = self.stack.len();
        let index = -offset - BigInt::one();
        let position = if index.is_negative() { BigInt::from(depth) + index } else { index };

        position.to_usize()
                .and_then(|position| self.stack.get(position))
                .cloned()
                .ok_or_else(|| RuntimeError::StackIndexOutOfRange { index: offset.to_string(),
                                                                    depth })
    }

    /// Reduces a rotation count modulo the stack depth.
    ///
    /// # Returns
    /// `None` on an empty stack, otherwise the non-negative shift.
    fn rotation(&self, count: &BigInt) -> Option<usize> {
        if self.stack.is_empty() {
            return None;
        }
        count.mod_floor(&BigInt::from(self.stack.len())).to_usize()
    }
}
