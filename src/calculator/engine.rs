//! The calculator session: state machine plus history.

use super::format::format_display;
use super::state::{CalculatorState, Input, transition};
use crate::history::{HistoryEntry, HistoryLog};

/// One calculator session.
///
/// Owns the state and the history log; completed operations are recorded
/// as they happen.
#[derive(Clone, Debug, Default)]
pub struct Calculator {
    state: CalculatorState,
    history: HistoryLog,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one input event. Returns the history entry recorded by it, if
    /// the event completed an operation.
    pub fn apply(&mut self, input: Input) -> Option<&HistoryEntry> {
        let next = transition(std::mem::take(&mut self.state), &input);
        self.state = next.state;

        let completed = next.completed?;
        tracing::debug!(
            expression = %completed.expression,
            result = %completed.result,
            "calculation completed"
        );
        Some(self.history.record(completed.expression, completed.result))
    }

    /// Feed a sequence of input events.
    pub fn apply_all(&mut self, inputs: impl IntoIterator<Item = Input>) {
        for input in inputs {
            self.apply(input);
        }
    }

    /// Restore the history entry at a display position (0 is the newest).
    /// Returns `false` if there is no such entry.
    pub fn restore(&mut self, index: usize) -> bool {
        match self.history.get(index).cloned() {
            Some(entry) => {
                self.apply(Input::RestoreFromHistory(entry));
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Raw value on the main display line, without formatting.
    pub fn display_value(&self) -> &str {
        match self.state.last_result() {
            Some(result) => result,
            None => match self.state.current_operand() {
                "" => "0",
                operand => operand,
            },
        }
    }

    /// Main display line with thousands separators.
    pub fn display_text(&self) -> String {
        format_display(self.display_value())
    }

    /// Secondary display line: the stored operand and pending operator.
    pub fn expression_text(&self) -> String {
        match self.state.pending_operator() {
            Some(op) => format!("{} {}", self.state.stored_operand(), op),
            None => String::new(),
        }
    }
}
