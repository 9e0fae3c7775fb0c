//! Textual number formatting shared by the text codecs.

/// Formats a value the way the legacy text files spell floats.
///
/// Integral values keep a trailing `.0`, NaN is `nan`, and very small or
/// very large magnitudes switch to `1e-05` / `1e+16` notation. Everything
/// else is the shortest representation that parses back to the same `f64`.
pub(crate) fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let sci = format!("{value:e}");
        return match sci.split_once('e') {
            Some((mantissa, exp)) => with_exponent(mantissa, exp),
            None => sci,
        };
    }
    let plain = format!("{value}");
    if plain.contains('.') {
        plain
    } else {
        format!("{plain}.0")
    }
}

/// C-style `%.{precision}g` formatting.
pub(crate) fn format_g(value: f64, precision: usize) -> String {
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
    let sci = format!("{value:.*e}", precision - 1);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exponent: i32 = exp.parse().unwrap_or(0);
    if exponent < -4 || exponent >= precision as i32 {
        with_exponent(trim_fraction(mantissa), exp)
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

/// Joins a mantissa and a Rust exponent string as `m` `e±dd`.
fn with_exponent(mantissa: &str, exp: &str) -> String {
    let (sign, digits) = match exp.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exp),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

/// Drops trailing zeros of a decimal fraction, and the point if nothing is
/// left after it.
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
    fn integral_values_keep_point_zero() {
        assert_eq!(format_value(3.0), "3.0");
        assert_eq!(format_value(-777.0), "-777.0");
        assert_eq!(format_value(0.0), "0.0");
    }

    #[test]
    fn shortest_repr() {
        assert_eq!(format_value(1.5), "1.5");
        assert_eq!(format_value(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_value(0.0001), "0.0001");
    }

    #[test]
    fn exponent_notation_at_extremes() {
        assert_eq!(format_value(1e-5), "1e-05");
        assert_eq!(format_value(2.5e-7), "2.5e-07");
        assert_eq!(format_value(1e16), "1e+16");
        assert_eq!(format_value(-1.25e20), "-1.25e+20");
    }

    #[test]
    fn non_finite() {
        assert_eq!(format_value(f64::NAN), "nan");
        assert_eq!(format_value(f64::INFINITY), "inf");
        assert_eq!(format_value(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn g_fixed_range() {
        assert_eq!(format_g(5.0, 6), "5");
        assert_eq!(format_g(123.456789, 6), "123.457");
        assert_eq!(format_g(0.0001, 6), "0.0001");
        assert_eq!(format_g(-12.5, 6), "-12.5");
        assert_eq!(format_g(51.2, 9), "51.2");
        assert_eq!(format_g(0.0, 6), "0");
    }

    #[test]
    fn g_exponent_range() {
        assert_eq!(format_g(1234567.0, 6), "1.23457e+06");
        assert_eq!(format_g(0.00001234, 6), "1.234e-05");
        assert_eq!(format_g(1e100, 6), "1e+100");
    }

    #[test]
    fn g_rounding_bumps_exponent() {
        assert_eq!(format_g(999999.5, 6), "1e+06");
    }
}
