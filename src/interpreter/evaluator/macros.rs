use regex::{NoExpand, Regex};
use tracing::debug;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Engine, EvalResult},
        lexer::is_identifier,
    },
};

/// A named text substitution.
#[derive(Debug, Clone)]
pub struct Macro {
    /// The macro name, an identifier.
    pub name:      String,
    /// The token sequence the name expands to, joined by single spaces.
    pub expansion: String,
    pattern:       Regex,
    replacement:   String,
}

/// The macro table, kept in definition order.
///
/// Expansion applies each macro once, in the order the macros were first
/// defined. Expansions are not re-scanned by the macro that produced them, so
/// a macro never expands recursively into itself.
#[derive(Debug, Clone, Default)]
pub struct MacroTable {
    entries: Vec<Macro>,
}

impl MacroTable {
    /// Defines or redefines a macro.
    ///
    /// A redefinition replaces the expansion but keeps the macro's original
    /// position in the expansion order.
    ///
    /// # Errors
    /// Returns `MalformedMacroDefinition` if `name` is not an identifier.
    pub fn define(&mut self, name: &str, expansion: String) -> EvalResult<()> {
        if !is_identifier(name) {
            return Err(RuntimeError::MalformedMacroDefinition);
        }
        let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(name)))
            .map_err(|_| RuntimeError::MalformedMacroDefinition)?;
        let replacement = format!(" {expansion} ");
        let definition = Macro { name: name.to_string(),
                                 expansion,
                                 pattern,
                                 replacement };

        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => *entry = definition,
            None => self.entries.push(definition),
        }
        Ok(())
    }

    /// Replaces every whole-word occurrence of each macro name in `source`
    /// with its expansion, padded by spaces.
    ///
    /// # Example
    /// ```
    /// use rpn::interpreter::evaluator::macros::MacroTable;
    ///
    /// let mut macros = MacroTable::default();
    /// macros.define("kib", "1024 *".to_string()).unwrap();
    ///
    /// let expanded = macros.expand("4 kib kibble");
    /// assert_eq!(expanded.split_whitespace().collect::<Vec<_>>(),
    ///            ["4", "1024", "*", "kibble"]);
    /// ```
    #[must_use]
    pub fn expand(&self, source: &str) -> String {
        self.entries.iter().fold(source.to_string(), |text, entry| {
                               entry.pattern
                                    .replace_all(&text, NoExpand(&entry.replacement))
                                    .into_owned()
                           })
    }

    /// Returns the expansion of the macro called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.expansion.as_str())
    }

    /// Iterates over the macros in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Macro> {
        self.entries.iter()
    }

    /// The number of defined macros.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no macro is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Engine {
    /// Handles a `macro <name> <tokens...>` command.
    ///
    /// The name is taken as written; the body is expanded with the macros
    /// defined so far and normalized to single spaces.
    ///
    /// # Parameters
    /// - `tokens`: The tokens following the `macro` keyword.
    pub(crate) fn define_macro<'a>(&mut self,
                                   mut tokens: impl Iterator<Item = &'a str>)
                                   -> EvalResult<()> {
        let name = tokens.next().ok_or(RuntimeError::MalformedMacroDefinition)?;
        let body = self.macros.expand(&tokens.collect::<Vec<_>>().join(" "));
        let expansion = body.split_whitespace().collect::<Vec<_>>().join(" ");

        debug!(name, expansion = %expansion, "defining macro");
        self.macros.define(name, expansion)
    }
}
