pub mod chat;
pub mod clipboard;
pub mod command;
pub mod display;
pub mod history;
pub mod markdown;
pub mod theme;

pub use chat::{render_message, render_transcript};
pub use clipboard::{ClipboardError, copy_to_clipboard};
pub use command::{Command, CommandError, HELP, parse_command};
pub use display::render_display;
pub use history::render_history;
pub use markdown::render_markdown;
pub use theme::Theme;
