//! Shared formatting helpers used by charts and the insight text.

/// Formats an integer with comma thousands separators (`1234567` -> `1,234,567`).
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Formats a monetary amount as whole dollars (`1100.4` -> `$1,100`).
#[allow(clippy::cast_possible_truncation)]
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let dollars = format_thousands(rounded);
    match dollars.strip_prefix('-') {
        Some(magnitude) => format!("-${magnitude}"),
        None => format!("${dollars}"),
    }
}

/// Formats a percentage with one decimal place (`12.345` -> `12.3%`).
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// Truncates a label to a maximum number of characters with ellipsis.
pub fn truncate_label(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
