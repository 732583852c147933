//! Parsing of interactive input lines.
//!
//! A line is either a key sequence for the calculator or a `:`-prefixed
//! command for the panels around it.

use thiserror::Error;

use crate::calculator::{Input, KeyError, parse_keys};

pub const HELP: &str = "\
keys      0-9 . + - * / x × ÷ = %   n or ± (sign)   c or ac (clear)   del or < (delete)
:history          list previous calculations, newest first
:restore <n>      load result n from the history
:clear-history    forget all previous calculations
:copy             copy the displayed value to the clipboard
:ask <question>   ask the AI math assistant (also: ? <question>)
:chat             show the assistant transcript
:help             show this help
:quit             leave";

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Keys(Vec<Input>),
    History,
    /// 1-based position in the history list.
    Restore(usize),
    ClearHistory,
    Copy,
    Ask(String),
    Chat,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error("unknown command :{0}, try :help")]
    Unknown(String),

    #[error("usage: :restore <number>")]
    RestoreUsage,

    #[error("usage: :ask <question>")]
    AskUsage,
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();

    if let Some(question) = line.strip_prefix('?') {
        return ask(question);
    }

    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Keys(parse_keys(line)?));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "history" | "h" => Ok(Command::History),
        "restore" | "r" => arg
            .parse::<usize>()
            .ok()
            .filter(|&n| n > 0)
            .map(Command::Restore)
            .ok_or(CommandError::RestoreUsage),
        "clear-history" => Ok(Command::ClearHistory),
        "copy" => Ok(Command::Copy),
        "ask" => ask(arg),
        "chat" => Ok(Command::Chat),
        "help" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn ask(question: &str) -> Result<Command, CommandError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(CommandError::AskUsage);
    }
    Ok(Command::Ask(question.to_string()))
}
