//! Display formatting for operands and results.

/// Format operand or result text for the display.
///
/// The integer part gets thousands separators. Text ending in an
/// unterminated decimal point (`"5."`) is returned as typed so input in
/// progress is not rewritten.
pub fn format_display(text: &str) -> String {
    if text.is_empty() || text.ends_with('.') {
        return text.to_string();
    }

    let (int_part, frac_part) = match text.find('.') {
        Some(dot) => text.split_at(dot),
        None => (text, ""),
    };

    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return text.to_string();
    }

    format!("{}{}{}", sign, group_thousands(digits), frac_part)
}

/// Insert a `,` between every group of three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}

/// Strip display formatting, leaving the raw number (used for the clipboard).
pub fn strip_separators(text: &str) -> String {
    text.chars().filter(|&c| c != ',').collect()
}
