//! Calculator state machine.
//!
//! The state is a single tagged value. Each input event consumes the current
//! state and yields the next one, plus the completed calculation when a
//! binary operation finished successfully.

use super::Operator;
use super::evaluation::{self, Evaluation};
use crate::history::HistoryEntry;

/// Maximum number of characters accepted in the operand being typed.
pub const MAX_INPUT_LEN: usize = 15;

/// Sentinel shown after a division by zero.
pub const ERROR_TEXT: &str = "Error";

/// Discrete input events accepted by the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    /// A digit key, `0..=9`. Other values are ignored.
    Digit(u8),
    Decimal,
    Operator(Operator),
    Equals,
    Clear,
    Delete,
    Percent,
    ToggleSign,
    /// Load a previous result back into the display.
    RestoreFromHistory(HistoryEntry),
}

/// The calculator's display mode together with its operands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CalculatorState {
    /// Typing the left-hand operand. `operand` is empty before the first key.
    Entering { operand: String },
    /// An operator waits for its right-hand operand.
    OperatorPending {
        stored: String,
        operator: Operator,
        operand: String,
    },
    /// A finished result is on the display.
    ///
    /// `operand` keeps the right-hand operand text of the finished
    /// operation; the next digit replaces everything.
    ResultShown { result: String, operand: String },
    /// Division by zero aborted the calculation.
    ErrorShown,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::Entering {
            operand: String::new(),
        }
    }
}

impl CalculatorState {
    /// The operand currently being typed (or retained after a result).
    pub fn current_operand(&self) -> &str {
        match self {
            Self::Entering { operand }
            | Self::OperatorPending { operand, .. }
            | Self::ResultShown { operand, .. } => operand,
            Self::ErrorShown => "",
        }
    }

    /// Left-hand operand of the pending operation, empty if none.
    pub fn stored_operand(&self) -> &str {
        match self {
            Self::OperatorPending { stored, .. } => stored,
            _ => "",
        }
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        match self {
            Self::OperatorPending { operator, .. } => Some(*operator),
            _ => None,
        }
    }

    /// The finalized value on the display, if any.
    pub fn last_result(&self) -> Option<&str> {
        match self {
            Self::ResultShown { result, .. } => Some(result),
            Self::ErrorShown => Some(ERROR_TEXT),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::ErrorShown)
    }

    pub fn is_initial(&self) -> bool {
        *self == Self::default()
    }
}

/// A binary operation that finished with a numeric result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completed {
    pub expression: String,
    pub result: String,
}

/// Next state after one input event.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: CalculatorState,
    pub completed: Option<Completed>,
}

impl Transition {
    fn to(state: CalculatorState) -> Self {
        Self {
            state,
            completed: None,
        }
    }

    fn reset() -> Self {
        Self::to(CalculatorState::default())
    }

    fn entering(operand: impl Into<String>) -> Self {
        Self::to(CalculatorState::Entering {
            operand: operand.into(),
        })
    }
}

/// Fold one input event into the state.
pub fn transition(state: CalculatorState, input: &Input) -> Transition {
    use CalculatorState::*;

    match (state, input) {
        (state, Input::Digit(d)) if *d > 9 => Transition::to(state),
        (_, Input::Clear) => Transition::reset(),
        (_, Input::RestoreFromHistory(entry)) => Transition::entering(entry.result.clone()),

        // A finished result or the error sentinel: entry keys start over.
        (ResultShown { .. } | ErrorShown, Input::Digit(d)) => Transition::entering(d.to_string()),
        (ResultShown { .. } | ErrorShown, Input::Decimal) => Transition::entering("0."),
        (ErrorShown, _) => Transition::reset(),

        (Entering { operand }, Input::Digit(d)) => Transition::entering(push_digit(operand, *d)),
        (Entering { operand }, Input::Decimal) => Transition::entering(push_decimal(operand)),
        (
            OperatorPending {
                stored,
                operator,
                operand,
            },
            Input::Digit(d),
        ) => Transition::to(OperatorPending {
            stored,
            operator,
            operand: push_digit(operand, *d),
        }),
        (
            OperatorPending {
                stored,
                operator,
                operand,
            },
            Input::Decimal,
        ) => Transition::to(OperatorPending {
            stored,
            operator,
            operand: push_decimal(operand),
        }),

        (state, Input::Operator(op)) => apply_operator(state, *op),
        (state, Input::Equals) => calculate(state),

        (ResultShown { .. }, Input::Delete) => Transition::reset(),
        (mut state, Input::Delete) => {
            if let Entering { operand } | OperatorPending { operand, .. } = &mut state {
                operand.pop();
            }
            Transition::to(state)
        }

        (state, Input::Percent) => adjust_value(state, evaluation::percent_of),
        (state, Input::ToggleSign) => {
            adjust_value(state, |text| Some(evaluation::toggle_sign(text)))
        }
    }
}

/// Append a digit to the operand being typed, honoring the leading-zero
/// rules and the length cap.
fn push_digit(mut operand: String, digit: u8) -> String {
    let d = char::from(b'0' + digit);

    if operand == "0" {
        if d != '0' {
            operand = d.to_string();
        }
    } else if operand.chars().count() < MAX_INPUT_LEN {
        operand.push(d);
    }

    operand
}

fn push_decimal(mut operand: String) -> String {
    if operand.is_empty() {
        return "0.".to_string();
    }
    if !operand.contains('.') {
        operand.push('.');
    }
    operand
}

fn apply_operator(state: CalculatorState, op: Operator) -> Transition {
    use CalculatorState::*;

    match state {
        ResultShown { result, .. } => Transition::to(OperatorPending {
            stored: result,
            operator: op,
            operand: String::new(),
        }),
        Entering { operand } if !operand.is_empty() => Transition::to(OperatorPending {
            stored: operand,
            operator: op,
            operand: String::new(),
        }),
        // Chain: fold the pending operation, its result becomes the new
        // left-hand operand.
        OperatorPending {
            ref stored,
            operator,
            ref operand,
        } if !operand.is_empty() => match evaluation::evaluate(stored, operator, operand) {
            Some(Evaluation::Success { expression, result }) => Transition {
                state: OperatorPending {
                    stored: result.clone(),
                    operator: op,
                    operand: String::new(),
                },
                completed: Some(Completed { expression, result }),
            },
            Some(Evaluation::Error { expression }) => {
                tracing::debug!(%expression, "calculation failed");
                Transition::to(ErrorShown)
            }
            None => Transition::to(state),
        },
        // Operator substitution.
        OperatorPending { stored, .. } => Transition::to(OperatorPending {
            stored,
            operator: op,
            operand: String::new(),
        }),
        state => Transition::to(state),
    }
}

fn calculate(state: CalculatorState) -> Transition {
    let CalculatorState::OperatorPending {
        stored,
        operator,
        operand,
    } = &state
    else {
        return Transition::to(state);
    };
    if operand.is_empty() {
        return Transition::to(state);
    }

    match evaluation::evaluate(stored, *operator, operand) {
        Some(Evaluation::Success { expression, result }) => Transition {
            state: CalculatorState::ResultShown {
                result: result.clone(),
                operand: operand.clone(),
            },
            completed: Some(Completed { expression, result }),
        },
        Some(Evaluation::Error { expression }) => {
            tracing::debug!(%expression, "calculation failed");
            Transition::to(CalculatorState::ErrorShown)
        }
        None => Transition::to(state),
    }
}

/// Rewrite the operand being typed, or the shown result when there is no
/// operand text. Unparsable text leaves the state unchanged.
fn adjust_value(state: CalculatorState, f: impl Fn(&str) -> Option<String>) -> Transition {
    use CalculatorState::*;

    let next = match &state {
        Entering { operand } if !operand.is_empty() => f(operand).map(|operand| Entering { operand }),
        OperatorPending {
            stored,
            operator,
            operand,
        } if !operand.is_empty() => f(operand).map(|operand| OperatorPending {
            stored: stored.clone(),
            operator: *operator,
            operand,
        }),
        ResultShown { result, operand } if !operand.is_empty() => {
            f(operand).map(|operand| ResultShown {
                result: result.clone(),
                operand,
            })
        }
        ResultShown { result, .. } => f(result).map(|value| ResultShown {
            result: value.clone(),
            operand: value,
        }),
        _ => None,
    };

    Transition::to(next.unwrap_or(state))
}
