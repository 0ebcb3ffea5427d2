//! Number normalization for upstream rates.
//!
//! Upstreams report prices either as JSON numbers, as plain numeric strings
//! (`"130.00"`) or in Venezuelan locale format where `.` groups thousands and
//! `,` is the decimal point (`"174.231,00"`).

use crate::errors::RatesError;

/// Normalize a raw rate string into a finite `f64`.
///
/// - `"174.231,00"` (both separators): `.` is stripped, `,` becomes `.`
/// - `"36,50"` (comma only): `,` is the decimal point
/// - `"130.00"` / `"130"`: parsed as is
///
/// Fails with [`RatesError::Parse`] on empty input or when the cleaned string
/// is not a finite number (`NaN` and `inf` are rejected).
pub fn normalize_rate(raw: &str) -> Result<f64, RatesError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RatesError::parse("empty rate value"));
    }

    let cleaned = if trimmed.contains('.') && trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else if trimmed.contains(',') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };

    let value: f64 = cleaned
        .parse()
        .map_err(|_| RatesError::parse(format!("'{}' is not a number", raw)))?;

    ensure_finite(value, raw)
}

/// Reject `NaN` and infinities so they never reach a response.
pub fn ensure_finite(value: f64, origin: &str) -> Result<f64, RatesError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RatesError::parse(format!(
            "'{}' does not yield a finite number",
            origin
        )))
    }
}

/// Fixed two-decimal rendering used for quote sides.
pub fn format_two_decimals(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_formatted_rate() {
        assert_eq!(normalize_rate("174.231,00").unwrap(), 174231.00);
        assert_eq!(normalize_rate("1.234.567,89").unwrap(), 1234567.89);
    }

    #[test]
    fn test_comma_decimal_rate() {
        assert_eq!(normalize_rate("36,50").unwrap(), 36.5);
    }

    #[test]
    fn test_plain_rate() {
        assert_eq!(normalize_rate("130.00").unwrap(), 130.0);
        assert_eq!(normalize_rate(" 131 ").unwrap(), 131.0);
    }

    #[test]
    fn test_empty_rate_fails() {
        assert!(matches!(normalize_rate(""), Err(RatesError::Parse(_))));
        assert!(matches!(normalize_rate("   "), Err(RatesError::Parse(_))));
    }

    #[test]
    fn test_non_finite_rate_fails() {
        for raw in ["NaN", "inf", "-inf", "infinity", "1e999"] {
            assert!(
                matches!(normalize_rate(raw), Err(RatesError::Parse(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_garbage_fails() {
        assert!(matches!(
            normalize_rate("Invalid pair"),
            Err(RatesError::Parse(_))
        ));
    }

    #[test]
    fn test_format_two_decimals() {
        assert_eq!(format_two_decimals(132.45), "132.45");
        assert_eq!(format_two_decimals(131.0), "131.00");
        assert_eq!(format_two_decimals(130.005_1), "130.01");
    }
}
