//! Number formatting for the text format.
//!
//! Support vector data is written with C `%.Ng` semantics: `N` significant
//! digits, fixed or exponential notation depending on the decimal exponent,
//! trailing zeros removed. Header reals use the shortest representation that
//! parses back to the same `f64`.

/// Significant digits used for dual coefficients (exact for `f64`).
pub const COEFFICIENT_DIGITS: usize = 17;

/// Significant digits used for feature values.
pub const FEATURE_DIGITS: usize = 9;

/// Format `value` like C's `printf("%.{digits}g", value)`.
pub fn format_significant(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = digits.max(1);
    let sci = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return sci;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Shortest text that parses back to exactly `value`.
///
/// Very large and very small magnitudes switch to exponent notation so that
/// values like `1e-300` don't expand to hundreds of digits.
pub fn format_shortest(value: f64) -> String {
    let magnitude = value.abs();
    if value != 0.0 && value.is_finite() && !(1e-5..1e16).contains(&magnitude) {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
