//! Numeral parsing and display formatting
//!
//! Operands live as text while the user types; they are only parsed at
//! compute time. Everything here is pure.

/// Parses an operand or display string as a decimal number.
///
/// Grouping separators are ignored so that display strings parse back to
/// the value they show. Returns `None` for empty input, a lone sign or
/// point, and anything that is not a plain decimal numeral (`inf`, `NaN`
/// and friends are rejected even though `f64::from_str` accepts them).
#[must_use]
pub fn parse_numeral(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if !cleaned.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if !cleaned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'))
    {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Rounds `value` to `digits` significant decimal digits.
///
/// Uses the exact decimal expansion that scientific formatting produces,
/// so `0.1 + 0.2` rounds to `0.3` rather than keeping the binary residue.
#[must_use]
pub fn round_significant(value: f64, digits: u32) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    let precision = digits.clamp(1, 17) as usize - 1;
    format!("{:.*e}", precision, value)
        .parse::<f64>()
        .unwrap_or(value)
}

/// Renders a computed value as operand text.
///
/// Never uses exponent notation and never emits `-0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// Formats a numeral for display.
///
/// The integer part gets `,` thousands grouping; a fractional part, even
/// an empty one (`"12."`), is reattached verbatim. An integer part with no
/// digits renders as an empty string.
#[must_use]
pub fn display_number(numeral: &str) -> String {
    let (integer, fraction) = match numeral.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (numeral, None),
    };

    let integer_display = group_integer(integer);
    match fraction {
        Some(frac) => format!("{integer_display}.{frac}"),
        None => integer_display,
    }
}

/// Groups the digits of an integer numeral in threes.
fn group_integer(integer: &str) -> String {
    let (negative, digits) = match integer.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, integer),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return String::new();
    }

    let trimmed = digits.trim_start_matches('0');
    let significant = if trimmed.is_empty() { "0" } else { trimmed };

    let mut grouped = String::with_capacity(significant.len() + significant.len() / 3 + 1);
    if negative {
        grouped.push('-');
    }
    let lead = significant.len() % 3;
    for (i, ch) in significant.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
