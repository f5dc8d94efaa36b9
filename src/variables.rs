use crate::error_handling::*;
use crate::mode::Mode;
use crate::parsing::is_operator_word;
use crate::scanning::{tokenize, TokenKind};

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// A stored expression, re-evaluated under `mode` whenever it is referenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub expression: String,
    pub mode: Mode,
}

fn is_valid_name(name: &str) -> bool {
    let single_identifier = match tokenize(name).as_deref() {
        Ok([token]) => token.kind == TokenKind::identifier,
        _ => false,
    };
    single_identifier
        && !is_operator_word(Mode::mathematics, name)
        && !is_operator_word(Mode::programming, name)
}

/// Named variables shared by everything evaluating on behalf of one calculator.
///
/// Entries are immutable once stored; an update swaps in a new [`Variable`]
/// so a reader holding the previous one never observes a partial write.
#[derive(Debug, Default)]
pub struct VariableStore {
    entries: RwLock<HashMap<String, Arc<Variable>>>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<Variable>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<Variable>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `expression` under `name`, replacing any previous definition.
    /// The expression is not evaluated here.
    ///
    /// `name` must read back as a single identifier that is not an operator
    /// word in either mode.
    pub fn upsert(&self, name: &str, expression: &str, mode: Mode) -> Result<Arc<Variable>> {
        let name = name.trim();
        if !is_valid_name(name) {
            return Err(CalcError::invalid_name(name.into()));
        }

        let variable = Arc::new(Variable {
            name: name.into(),
            expression: expression.into(),
            mode,
        });
        let previous = self.write().insert(name.into(), Arc::clone(&variable));
        debug!(name, expression, %mode, replaced = previous.is_some(), "stored variable");
        Ok(variable)
    }

    pub fn resolve(&self, name: &str) -> Option<Arc<Variable>> {
        self.read().get(name).cloned()
    }

    pub fn remove(&self, name: &str) -> Option<Arc<Variable>> {
        let removed = self.write().remove(name);
        if removed.is_some() {
            debug!(name, "removed variable");
        }
        removed
    }

    /// Names of all stored variables in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
