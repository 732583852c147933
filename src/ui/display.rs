//! Calculator display rendering.
//!
//! Two right-aligned lines: the pending operation in muted text above the
//! main value. A finished result gets an `= ` prefix; the error sentinel is
//! painted in the error color.

use crate::calculator::Calculator;
use crate::ui::theme::Theme;

pub fn render_display(calc: &Calculator, theme: &Theme) -> String {
    let width = theme.display_width;
    let state = calc.state();

    let expression = calc.expression_text();
    let main = calc.display_text();

    let (main_text, style) = if state.is_error() {
        (main, theme.error)
    } else if state.last_result().is_some() {
        (format!("= {}", main), theme.bold)
    } else {
        (main, "")
    };

    let top = format!("{:>width$}", expression, width = width);
    let bottom = format!("{:>width$}", main_text, width = width);

    format!(
        "{}\n{}",
        theme.paint(theme.muted, &top),
        theme.paint(style, &bottom)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::parse_keys;

    fn calc_after(keys: &str) -> Calculator {
        let mut calc = Calculator::new();
        calc.apply_all(parse_keys(keys).unwrap());
        calc
    }

    fn lines(calc: &Calculator) -> Vec<String> {
        render_display(calc, &Theme::plain())
            .lines()
            .map(|l| l.trim().to_string())
            .collect()
    }

    #[test]
    fn test_initial_display() {
        assert_eq!(lines(&Calculator::new()), vec!["", "0"]);
    }

    #[test]
    fn test_pending_operation() {
        assert_eq!(lines(&calc_after("1500 +")), vec!["1500 +", "0"]);
        assert_eq!(lines(&calc_after("1500 + 25")), vec!["1500 +", "25"]);
    }

    #[test]
    fn test_result() {
        assert_eq!(lines(&calc_after("1500 + 25 =")), vec!["", "= 1,525"]);
    }

    #[test]
    fn test_error_painted() {
        let calc = calc_after("1 / 0 =");
        let theme = Theme::ansi();
        let rendered = render_display(&calc, &theme);
        assert!(rendered.contains("\x1b[31m"));
        assert!(rendered.contains("Error"));
    }

    #[test]
    fn test_right_aligned() {
        let rendered = render_display(&calc_after("42"), &Theme::plain());
        let bottom = rendered.lines().nth(1).unwrap();
        assert_eq!(bottom.chars().count(), Theme::plain().display_width);
        assert!(bottom.ends_with("42"));
    }
}
