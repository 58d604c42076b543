//! Lenient amount parsing for exported numeric columns

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse an amount column into a decimal.
///
/// Every character other than an ASCII digit, `.` or `-` is discarded first
/// (currency symbols, thousands separators, parentheses, spaces). The
/// longest leading `-?digits[.digits]` literal of what remains is then
/// parsed; anything that does not start with such a literal is zero.
///
/// The stripping is lossy: `"(500)"` becomes `500`, and a second `-` or `.`
/// ends the literal (`"1.2.3"` is `1.2`, `"12-3"` is `12`).
pub fn parse_amount(raw: &str) -> Decimal {
    static STRIP: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let strip_regex = STRIP.get_or_init(|| regex::Regex::new(r"[^0-9.\-]").unwrap());

    let stripped = strip_regex.replace_all(raw, "");
    leading_literal(&stripped)
        .and_then(|literal| Decimal::from_str(&literal).ok())
        .unwrap_or(Decimal::ZERO)
}

/// Parse an optional column, treating an absent column as zero
pub fn parse_optional_amount(raw: Option<&str>) -> Decimal {
    raw.map(parse_amount).unwrap_or(Decimal::ZERO)
}

/// Extract the leading decimal literal in canonical form (`-0.5`, `12`).
fn leading_literal(s: &str) -> Option<String> {
    let mut chars = s.chars().peekable();
    let negative = chars.next_if_eq(&'-').is_some();

    let mut integer = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        integer.push(c);
    }

    let mut fraction = String::new();
    if chars.next_if_eq(&'.').is_some() {
        while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
            fraction.push(c);
        }
    }

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut literal = String::with_capacity(integer.len() + fraction.len() + 3);
    if negative {
        literal.push('-');
    }
    if integer.is_empty() {
        literal.push('0');
    } else {
        literal.push_str(&integer);
    }
    if !fraction.is_empty() {
        literal.push('.');
        literal.push_str(&fraction);
    }
    Some(literal)
}
