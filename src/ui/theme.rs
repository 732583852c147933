//! Terminal styling.

use std::io::IsTerminal;

/// ANSI style sequences used by the renderers. The plain theme uses empty
/// strings so output stays readable when piped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub bold: &'static str,
    pub italic: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
    pub error: &'static str,
    pub reset: &'static str,
    /// Width the calculator display is right-aligned to.
    pub display_width: usize,
}

impl Theme {
    pub const fn plain() -> Self {
        Self {
            bold: "",
            italic: "",
            muted: "",
            accent: "",
            error: "",
            reset: "",
            display_width: 24,
        }
    }

    pub const fn ansi() -> Self {
        Self {
            bold: "\x1b[1m",
            italic: "\x1b[3m",
            muted: "\x1b[2m",
            accent: "\x1b[34m",
            error: "\x1b[31m",
            reset: "\x1b[0m",
            display_width: 24,
        }
    }

    /// ANSI when stdout is a terminal and `NO_COLOR` is unset.
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        if std::io::stdout().is_terminal() && !no_color {
            Self::ansi()
        } else {
            Self::plain()
        }
    }

    /// Wrap `text` in a style, resetting afterwards.
    pub fn paint(&self, style: &str, text: &str) -> String {
        if style.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", style, text, self.reset)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint() {
        assert_eq!(Theme::plain().paint(Theme::plain().bold, "x"), "x");
        let t = Theme::ansi();
        assert_eq!(t.paint(t.error, "Error"), "\x1b[31mError\x1b[0m");
    }
}
