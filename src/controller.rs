use crate::error_handling::*;
use crate::evaluating::{Evaluator, DEFAULT_MAX_DEPTH};
use crate::formatting::{self, FormattedOutput};
use crate::mode::Mode;
use crate::settings::Settings;
use crate::variables::VariableStore;

use std::sync::Arc;
use tracing::{debug, warn};

/// What an enter press in the input field amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// The mode changed; the input field should be cleared.
    switched(Mode),
    /// Ordinary input; the input field is left alone.
    not_a_command,
}

impl Command {
    pub fn clears_input(&self) -> bool {
        matches!(self, Command::switched(_))
    }
}

/// Reacts to input events on behalf of a display layer.
#[derive(Debug, Clone)]
pub struct Controller {
    mode: Mode,
    max_depth: usize,
    store: Arc<VariableStore>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(Arc::new(VariableStore::new()))
    }
}

impl Controller {
    pub fn new(store: Arc<VariableStore>) -> Self {
        Self{mode: Mode::default(), max_depth: DEFAULT_MAX_DEPTH, store}
    }

    pub fn with_settings(settings: &Settings, store: Arc<VariableStore>) -> Self {
        Self{mode: settings.mode, max_depth: settings.max_depth, store}
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            debug!(from = %self.mode, to = %mode, "switching mode");
        }
        self.mode = mode;
    }

    pub fn mode_label(&self) -> &'static str {
        self.mode.label()
    }

    pub fn store(&self) -> &Arc<VariableStore> {
        &self.store
    }

    /// Evaluates `input` under the current mode. Blank input yields `None`
    /// without reaching the evaluator.
    pub fn evaluate(&self, input: &str) -> Result<Option<f64>> {
        if input.trim().is_empty() {
            return Ok(None);
        }
        Evaluator::with_max_depth(&self.store, self.max_depth)
            .evaluate(input, self.mode)
            .map(Some)
    }

    /// Recomputes the display for the current input. Any failure blanks it.
    pub fn on_input_changed(&self, input: &str) -> FormattedOutput {
        match self.evaluate(input) {
            Ok(Some(value)) => formatting::format(value),
            Ok(None) => FormattedOutput::blank(),
            Err(e) => {
                debug!(input, kind = ?e.kind(), error = %e, "evaluation failed");
                FormattedOutput::blank()
            },
        }
    }

    pub fn on_enter_command(&mut self, input: &str) -> Command {
        match Mode::from_command(input) {
            Some(mode) => {
                self.set_mode(mode);
                Command::switched(mode)
            },
            None => Command::not_a_command,
        }
    }

    /// Stores `input` under `name` in the current mode and returns the text
    /// the input field should now hold. The name field is cleared either way.
    pub fn on_store_command(&self, name: &str, input: &str) -> Result<String> {
        match self.store.upsert(name, input, self.mode) {
            Ok(variable) => Ok(variable.name.clone()),
            Err(e) => {
                warn!(name, error = %e, "store command rejected");
                Err(e)
            },
        }
    }
}
