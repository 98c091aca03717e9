//! Number Formatting
//!
//! `%g`-style formatting for compact annotations such as p-values.

/// Format `value` with `precision` significant digits, `%g` style
///
/// Scientific notation is used when the decimal exponent is below -4 or at
/// least `precision`; trailing zeros are removed in both forms.
pub fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    // Round once in scientific form so the exponent reflects carries (9.99 -> 1.00e1)
    let sci = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= precision as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_notation() {
        assert_eq!(format_general(0.073_388, 3), "0.0734");
        assert_eq!(format_general(0.5, 3), "0.5");
        assert_eq!(format_general(1.0, 3), "1");
        assert_eq!(format_general(100.0, 3), "100");
        assert_eq!(format_general(0.0001, 3), "0.0001");
        assert_eq!(format_general(-2.5, 3), "-2.5");
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(format_general(1.8531e-5, 3), "1.85e-05");
        assert_eq!(format_general(123_456.0, 3), "1.23e+05");
        assert_eq!(format_general(1e-10, 4), "1e-10");
    }

    #[test]
    fn test_rounding_carries_exponent() {
        assert_eq!(format_general(9.9996, 4), "10");
        assert_eq!(format_general(999.7, 3), "1e+03");
    }

    #[test]
    fn test_special_values() {
        assert_eq!(format_general(0.0, 3), "0");
        assert_eq!(format_general(f64::NAN, 3), "nan");
        assert_eq!(format_general(f64::NEG_INFINITY, 3), "-inf");
    }
}
