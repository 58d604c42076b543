//! Utility functions and helpers

use rust_decimal::{Decimal, RoundingStrategy};

const LAKH: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Format a number with thousands separators
pub fn format_number<T: ToString>(n: T) -> String {
    let s = n.to_string();
    let (sign, rest) = split_sign(&s);
    let (int_part, frac_part) = split_fraction(rest);

    let mut result = String::new();
    let mut count = 0;
    for c in int_part.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    let grouped: String = result.chars().rev().collect();
    format!("{}{}{}", sign, grouped, frac_part)
}

/// Format an amount with Indian digit grouping (`12,34,567.5`).
///
/// At most three fraction digits are kept and trailing zeros are dropped.
pub fn format_indian(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let s = rounded.to_string();
    let (sign, rest) = split_sign(&s);
    let (int_part, frac_part) = split_fraction(rest);

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::new();
    if digits.len() <= 3 {
        grouped.push_str(int_part);
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        // Leading digits go in pairs, the last group keeps three
        let offset = head.len() % 2;
        for (i, c) in head.iter().enumerate() {
            if i > 0 && (i + 2 - offset) % 2 == 0 {
                grouped.push(',');
            }
            grouped.push(*c);
        }
        grouped.push(',');
        grouped.extend(tail);
    }

    format!("{}{}{}", sign, grouped, frac_part)
}

/// Scale an amount to lakhs with one decimal, e.g. `150000` becomes `1.5L`
pub fn format_lakhs(amount: Decimal) -> String {
    let lakhs = (amount / LAKH).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}L", lakhs)
}

fn split_sign(s: &str) -> (&str, &str) {
    match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    }
}

fn split_fraction(s: &str) -> (&str, &str) {
    match s.find('.') {
        Some(pos) => (&s[..pos], &s[pos..]),
        None => (s, ""),
    }
}
