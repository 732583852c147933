//! History panel rendering.

use crate::calculator::format_display;
use crate::history::HistoryLog;
use crate::ui::theme::Theme;

pub const EMPTY_HISTORY: &str = "No calculation history yet.";

/// List entries newest first, numbered from 1 as `:restore` expects.
pub fn render_history(log: &HistoryLog, theme: &Theme) -> String {
    if log.is_empty() {
        return theme.paint(theme.muted, EMPTY_HISTORY);
    }

    log.iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "{:>3}. {}\n     = {}",
                i + 1,
                theme.paint(theme.muted, &entry.expression),
                theme.paint(theme.bold, &format_display(&entry.result))
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(render_history(&HistoryLog::new(), &Theme::plain()), EMPTY_HISTORY);
    }

    #[test]
    fn test_numbered_newest_first() {
        let mut log = HistoryLog::new();
        log.record("5 + 5".into(), "10".into());
        log.record("999 + 1".into(), "1000".into());

        let rendered = render_history(&log, &Theme::plain());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "  1. 999 + 1");
        assert_eq!(lines[1], "     = 1,000");
        assert_eq!(lines[2], "  2. 5 + 5");
    }
}
