//! zcalc: a keypad calculator with an AI math assistant.
//!
//! The calculator engine is a pure state machine over typed operands with a
//! bounded history of completed calculations. The assistant forwards free
//! text questions to an external model on a background worker and never
//! touches calculator state.

pub mod ai;
pub mod app;
pub mod calculator;
pub mod config;
pub mod history;
pub mod ui;
