//! Key sequence parsing for the calculator.
//!
//! Turns a line of typed keys such as `12.5 * 4 =` into engine input
//! events, so a keyboard can stand in for the keypad.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use super::{Input, Operator};

lazy_static! {
    /// One key at the start of the remaining input, after optional
    /// whitespace. Longer names come first so `ac` wins over `a`.
    static ref KEY: Regex = Regex::new(
        r"^\s*((?i:ac|del|neg)|[0-9]|[.=%±<]|(?i:[cnx])|[-+*/×÷−])"
    ).unwrap();

    /// Matches strings made only of whitespace.
    static ref BLANK: Regex = Regex::new(r"^\s*$").unwrap();
}

/// A key sequence that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown key {key:?} at position {position}")]
pub struct KeyError {
    pub key: String,
    pub position: usize,
}

/// Parse a line of keys into input events.
///
/// The whole line is rejected if any key is unknown, so a typo never
/// half-applies a sequence.
pub fn parse_keys(line: &str) -> Result<Vec<Input>, KeyError> {
    let mut inputs = Vec::new();
    let mut rest = line;

    while !BLANK.is_match(rest) {
        let Some(caps) = KEY.captures(rest) else {
            let trimmed = rest.trim_start();
            let position = line.len() - trimmed.len();
            let key = trimmed.chars().next().map(String::from).unwrap_or_default();
            return Err(KeyError { key, position });
        };

        let whole = caps.get(0).map_or(0, |m| m.end());
        let key = caps.get(1).map_or("", |m| m.as_str());
        if let Some(input) = key_to_input(key) {
            inputs.push(input);
        }
        rest = &rest[whole..];
    }

    Ok(inputs)
}

/// Map a single key name to its input event.
fn key_to_input(key: &str) -> Option<Input> {
    let lower = key.to_lowercase();
    match lower.as_str() {
        "ac" | "c" => return Some(Input::Clear),
        "del" | "<" => return Some(Input::Delete),
        "neg" | "n" | "±" => return Some(Input::ToggleSign),
        "." => return Some(Input::Decimal),
        "=" => return Some(Input::Equals),
        "%" => return Some(Input::Percent),
        _ => {}
    }

    let mut chars = lower.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    if let Some(d) = c.to_digit(10) {
        return Some(Input::Digit(d as u8));
    }
    Operator::from_key(c).map(Input::Operator)
}
