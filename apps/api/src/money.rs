//! Rounding and display helpers shared by every calculator.
//!
//! All amounts are `f64` dollars. Intermediate values are never rounded;
//! only the figures a calculator reports pass through these helpers.

/// Rounds to the nearest cent, half away from zero.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds to the nearest whole dollar, half away from zero.
pub fn round_dollars(value: f64) -> f64 {
    value.round()
}

/// Expresses `part / whole` as a percentage with one decimal place.
/// A zero (or negative) `whole` yields 0 rather than NaN.
pub fn percent_one_decimal(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        return 0.0;
    }
    (part / whole * 1000.0).round() / 10.0
}

/// Formats a dollar amount the way result summaries show it: `$84,120`.
pub fn format_usd(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{}", rounded.abs() as u64);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents_half_away_from_zero() {
        assert_eq!(round_cents(10.125), 10.13);
        assert_eq!(round_cents(10.124), 10.12);
        assert_eq!(round_cents(0.0), 0.0);
    }

    #[test]
    fn test_percent_one_decimal() {
        assert_eq!(percent_one_decimal(1.0, 3.0), 33.3);
        assert_eq!(percent_one_decimal(12_345.0, 100_000.0), 12.3);
        assert_eq!(percent_one_decimal(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_format_usd_groups_thousands() {
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(999.4), "$999");
        assert_eq!(format_usd(1_000.0), "$1,000");
        assert_eq!(format_usd(1_234_567.6), "$1,234,568");
        assert_eq!(format_usd(-42_000.0), "-$42,000");
    }
}
