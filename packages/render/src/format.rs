//! French number formatting for tooltips and terminal tables.
//!
//! Thousands are grouped with a space and the decimal separator is a
//! comma: `2133111` → `"2 133 111"`, `1.2` → `"1,2"`.

/// Formats an integer with space-separated thousands.
#[must_use]
pub fn format_integer(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }

    out
}

/// Formats a decimal with at most `max_decimals` fractional digits,
/// trailing zeros removed.
#[must_use]
pub fn format_decimal(value: f64, max_decimals: usize) -> String {
    let fixed = format!("{value:.max_decimals$}");
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };

    let (sign, unsigned) = trimmed
        .strip_prefix('-')
        .map_or(("", trimmed), |rest| ("-", rest));
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let grouped = int_part
        .parse::<u64>()
        .map_or_else(|_| int_part.to_string(), format_integer);

    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped},{frac_part}")
    }
}
