//! Calculator engine.
//!
//! This module provides functionality to:
//! - Fold digit, operator and command events into a running calculation
//! - Record completed operations in the history log
//! - Format operands and results for display
//! - Parse typed key sequences into input events

mod engine;
mod evaluation;
mod format;
mod keys;
mod operator;
mod state;

pub use engine::Calculator;
pub use evaluation::{Evaluation, evaluate, normalize_result};
pub use format::{format_display, strip_separators};
pub use keys::{KeyError, parse_keys};
pub use operator::Operator;
pub use state::{CalculatorState, Completed, ERROR_TEXT, Input, MAX_INPUT_LEN, Transition, transition};
