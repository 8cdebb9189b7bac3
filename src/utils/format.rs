//! Number formatting for table cells
//!
//! Undefined statistics come through as `None` (or a non-finite float) and
//! format to `None`, which the table builder turns into an empty cell.

/// Round to `digits` decimals, ties to even.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let scaled = value * factor;
    // Too large to carry that many decimals; already integral
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round_ties_even() / factor;
    // -0.0 would print with a sign
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Format a rounded value in shortest form, keeping `.0` on integral values.
///
/// `format_number(1.23456, 3)` gives `"1.235"`, `format_number(2.0, 3)`
/// gives `"2.0"`.
pub fn format_number(value: f64, digits: u32) -> String {
    let text = round_to(value, digits).to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

/// Format an optional statistic, `None` when undefined.
pub fn format_value(value: Option<f64>, digits: u32) -> Option<String> {
    value
        .filter(|v| v.is_finite())
        .map(|v| format_number(v, digits))
}

/// Format a count-like statistic (observations, degrees of freedom).
///
/// Integral values print without decimals; anything else falls back to
/// [`format_number`].
pub fn format_count(value: Option<f64>, digits: u32) -> Option<String> {
    let v = value.filter(|v| v.is_finite())?;
    if v.fract() == 0.0 && v.abs() < 1e15 {
        Some(format!("{}", v as i64))
    } else {
        Some(format_number(v, digits))
    }
}

/// Format a significance threshold for the notes legend (`0.1`, `0.05`).
pub fn format_level(level: f64) -> String {
    level.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_rounds() {
        assert_eq!(format_number(1.23456, 3), "1.235");
        assert_eq!(format_number(0.1 + 0.2, 3), "0.3");
        assert_eq!(format_number(-4.56789, 2), "-4.57");
    }

    #[test]
    fn test_format_number_keeps_trailing_zero() {
        assert_eq!(format_number(2.0, 3), "2.0");
        assert_eq!(format_number(1.9999, 3), "2.0");
        assert_eq!(format_number(12.5, 0), "12.0");
    }

    #[test]
    fn test_format_number_ties_to_even() {
        assert_eq!(format_number(0.5, 0), "0.0");
        assert_eq!(format_number(1.5, 0), "2.0");
        assert_eq!(format_number(2.5, 0), "2.0");
    }

    #[test]
    fn test_large_values_do_not_overflow() {
        assert_eq!(round_to(1e300, 9), 1e300);
        assert_eq!(round_to(-2e299, 9), -2e299);
        let text = format_number(1e300, 9);
        assert!(!text.contains("inf"));
        assert!(text.starts_with('1'));
        assert!(text.ends_with(".0"));
        assert_eq!(format_value(Some(f64::MAX), 9), Some(format_number(f64::MAX, 0)));
    }

    #[test]
    fn test_negative_zero_is_unsigned() {
        assert_eq!(format_number(-0.0001, 3), "0.0");
    }

    #[test]
    fn test_format_value_undefined() {
        assert_eq!(format_value(None, 3), None);
        assert_eq!(format_value(Some(f64::NAN), 3), None);
        assert_eq!(format_value(Some(f64::INFINITY), 3), None);
        assert_eq!(format_value(Some(0.25), 3), Some("0.25".to_string()));
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(Some(100.0), 3), Some("100".to_string()));
        assert_eq!(format_count(Some(95.5), 3), Some("95.5".to_string()));
        assert_eq!(format_count(None, 3), None);
    }

    #[test]
    fn test_format_level() {
        assert_eq!(format_level(0.1), "0.1");
        assert_eq!(format_level(0.05), "0.05");
        assert_eq!(format_level(0.01), "0.01");
    }
}
