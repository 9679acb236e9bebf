//! Lenient decimal parsing and canonical formatting for numeric field values.

/// Parses a field value as a decimal number.
///
/// Surrounding whitespace is ignored. Empty, unparseable and non-finite input
/// (`"inf"`, `"NaN"`) all read as zero.
pub fn parse_decimal_or_zero(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Formats a number with the shortest representation that round-trips.
///
/// Integral values print without a fractional part (`4`, not `4.0`) and
/// negative zero prints as `0`.
pub fn format_decimal(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_leniently() {
        assert_eq!(parse_decimal_or_zero(" 12.5 "), 12.5);
        assert_eq!(parse_decimal_or_zero("-3"), -3.0);
        assert_eq!(parse_decimal_or_zero(""), 0.0);
        assert_eq!(parse_decimal_or_zero("abc"), 0.0);
        assert_eq!(parse_decimal_or_zero("NaN"), 0.0);
        assert_eq!(parse_decimal_or_zero("-inf"), 0.0);
    }

    #[test]
    fn formats_without_trailing_zeroes() {
        assert_eq!(format_decimal(4.0), "4");
        assert_eq!(format_decimal(1.75), "1.75");
        assert_eq!(format_decimal(-0.0), "0");
        assert_eq!(format_decimal(-2.5), "-2.5");
        assert_eq!(format_decimal(0.1 + 0.2), "0.30000000000000004");
    }
}
