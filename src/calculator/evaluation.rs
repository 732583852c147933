//! Operand parsing and arithmetic for the calculator engine.
//!
//! Operands travel through the engine as the text the user typed. This
//! module turns that text into numbers, applies an operator and renders the
//! value back into the normalized text that is shown and stored in history.

use super::Operator;

/// Decimal places kept when rendering a result.
const RESULT_PRECISION: usize = 10;

/// Outcome of folding a pending operation into a value.
#[derive(Clone, Debug, PartialEq)]
pub enum Evaluation {
    /// The operation produced a finite number.
    Success {
        /// `"<lhs> <op> <rhs>"` using the operand text as typed.
        expression: String,
        /// The rounded, normalized result.
        result: String,
    },
    /// Division by zero or an overflow to infinity.
    Error {
        /// `"<lhs> <op> <rhs>"` using the operand text as typed.
        expression: String,
    },
}

/// Evaluate `lhs op rhs`.
///
/// Returns `None` if either operand cannot be parsed; the caller treats that
/// as a no-op.
pub fn evaluate(lhs: &str, operator: Operator, rhs: &str) -> Option<Evaluation> {
    let left = parse_operand(lhs)?;
    let right = parse_operand(rhs)?;
    let expression = format!("{} {} {}", lhs, operator, rhs);

    match operator.apply(left, right) {
        Some(value) if value.is_finite() => Some(Evaluation::Success {
            expression,
            result: normalize_result(value),
        }),
        _ => Some(Evaluation::Error { expression }),
    }
}

/// Parse operand text, ignoring thousands separators.
///
/// Only finite numbers are accepted, so text such as `"inf"` or `"NaN"`
/// never reaches the arithmetic.
pub fn parse_operand(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|&c| c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Round to [`RESULT_PRECISION`] decimal places and render without trailing
/// zeros, so `0.1 + 0.2` shows as `0.3`.
pub fn normalize_result(value: f64) -> String {
    let rounded = format!("{:.*}", RESULT_PRECISION, value);
    let value: f64 = rounded.parse().unwrap_or(value);
    render_plain(value)
}

/// Divide operand text by 100, rendering the plain value without rounding.
pub fn percent_of(text: &str) -> Option<String> {
    parse_operand(text).map(|value| render_plain(value / 100.0))
}

/// Prepend or strip a leading minus sign.
///
/// This is a textual toggle so it works on half-typed numbers like `"0."`.
pub fn toggle_sign(text: &str) -> String {
    match text.strip_prefix('-') {
        Some(rest) => rest.to_string(),
        None => format!("-{}", text),
    }
}

/// Render a number in its shortest round-trip form. Negative zero is shown
/// as `0`.
fn render_plain(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}
