// Parsing and formatting helpers.
//
// This module centralizes the "dirty" number handling so the rest of
// the code can assume clean, typed values. POS exports routinely carry
// thousands separators, stray spaces and junk text in numeric columns;
// everything here degrades to `None` instead of erroring.
use num_format::{Locale, ToFormattedString};

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in CSV exports.
///
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(",", "");
    s.parse::<f64>().ok()
}

pub fn parse_i64_safe(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<i64>().ok()
}

/// Format a floating-point value with a fixed number of decimal places
/// and locale-aware thousands separators (e.g., `1,234,567.89`).
pub fn format_number(n: f64, decimals: usize) -> String {
    let neg = n.is_sign_negative();
    let abs_n = n.abs();
    // First, format to a plain fixed-decimal string like `1234567.89`.
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    // Use `num-format` to insert commas into the integer portion.
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    } else if decimals > 0 {
        res.push('.');
        res.push_str(&"0".repeat(decimals));
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for integer-like values, used
    // for counts in console messages (e.g., `1,024 rows loaded`).
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::{format_number, parse_f64_safe, parse_i64_safe};

    #[test]
    fn parses_plain_and_separated_amounts() {
        assert_eq!(parse_f64_safe("123.5"), Some(123.5));
        assert_eq!(parse_f64_safe(" 1,234.50 "), Some(1234.5));
        assert_eq!(parse_f64_safe("-88"), Some(-88.0));
    }

    #[test]
    fn rejects_junk_amounts() {
        assert_eq!(parse_f64_safe(""), None);
        assert_eq!(parse_f64_safe("   "), None);
        assert_eq!(parse_f64_safe("N/A"), None);
        assert_eq!(parse_f64_safe("12abc"), None);
    }

    #[test]
    fn parses_quantities_including_returns() {
        assert_eq!(parse_i64_safe("3"), Some(3));
        assert_eq!(parse_i64_safe("-2"), Some(-2));
        assert_eq!(parse_i64_safe("x"), None);
    }

    #[test]
    fn formats_with_thousands_separators() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-500.0, 2), "-500.00");
        assert_eq!(format_number(0.0, 0), "0");
    }
}
