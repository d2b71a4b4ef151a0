//! Human-readable number formatting for tooltips and metrics.

use rust_decimal::Decimal;

/// Format a population with a space between thousands groups.
///
/// `1234567` becomes `"1 234 567"`.
pub fn format_population(population: u64) -> String {
    let digits = population.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len.saturating_add(len / 3));
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && len.saturating_sub(i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// Format a percentage with two decimals and a trailing `%`.
pub fn format_percentage(percentage: Decimal) -> String {
    format!("{percentage:.2} %")
}
