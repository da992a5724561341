//! Colombian-peso amount and count parsing for the report form.
//!
//! Currency fields hold an es-CO formatted string while the form is being
//! edited (`2.000.000`) and are only converted to integers at submission.

/// es-CO thousands separator.
pub const THOUSANDS_SEPARATOR: char = '.';

/// Format a non-negative amount with es-CO thousands separators.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// Result of normalizing raw keyboard input for a currency field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyInput {
    /// No digits were typed; the field is cleared.
    Cleared,
    /// The re-rendered value, e.g. `"1.500.000"`.
    Formatted(String),
    /// The digits do not fit in an `i64`; the input is ignored.
    Overflow,
}

/// Strip every non-digit character and re-render the number with separators.
pub fn normalize_currency_input(raw: &str) -> CurrencyInput {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return CurrencyInput::Cleared;
    }
    match digits.parse::<i64>() {
        Ok(value) => CurrencyInput::Formatted(format_thousands(value)),
        Err(_) => CurrencyInput::Overflow,
    }
}

/// Parse a formatted currency string. Separators (`.` and `,`) are stripped
/// first; anything unparsable becomes 0.
pub fn parse_currency(formatted: &str) -> i64 {
    let stripped: String = formatted
        .chars()
        .filter(|c| *c != '.' && *c != ',')
        .collect();
    parse_count(&stripped)
}

/// Parse a free-text count field. Empty, unparsable or negative input is 0;
/// fractional input is truncated.
pub fn parse_count(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return value.max(0);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value.trunc().min(i64::MAX as f64) as i64,
        _ => 0,
    }
}
