/// Number of significant digits used when a number is turned into text.
pub const SIGNIFICANT_DIGITS: usize = 6;

/// Formats a number the way the language prints it.
///
/// The output follows the classic "general" floating-point notation: at most
/// six significant digits, trailing zeros in the fraction removed, and
/// scientific notation (`1e+06`, `2.5e-05`) when the decimal exponent is below
/// `-4` or at least six.
///
/// # Parameters
/// - `value`: The number to format.
///
/// # Returns
/// The textual representation of `value`.
///
/// # Example
/// ```
/// use splice::util::num::format_number;
///
/// assert_eq!(format_number(3.0), "3");
/// assert_eq!(format_number(0.1 + 0.2), "0.3");
/// assert_eq!(format_number(1234567.0), "1.23457e+06");
/// assert_eq!(format_number(0.00001), "1e-05");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return if value.is_sign_negative() { "-nan" } else { "nan" }.to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Rounding to the requested precision decides the exponent, so `999999.5`
    // correctly switches over to `1e+06`.
    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent = exponent.parse::<i32>().unwrap_or(0);

    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    let precision = SIGNIFICANT_DIGITS as i32;

    if exponent < -4 || exponent >= precision {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", strip_trailing_zeros(mantissa), exponent.unsigned_abs())
    } else {
        #[allow(clippy::cast_sign_loss)]
        let decimals = (precision - 1 - exponent) as usize;
        let fixed = format!("{value:.decimals$}");
        strip_trailing_zeros(&fixed).to_string()
    }
}

fn strip_trailing_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Converts text to a number by reading its longest numeric prefix.
///
/// Leading whitespace is skipped, then an optional sign, digits, an optional
/// fraction and an optional exponent are consumed. Anything after that prefix
/// is ignored. Text without any leading digits converts to `0`.
///
/// # Parameters
/// - `text`: The string to convert.
///
/// # Returns
/// The numeric value of the prefix, or `0.0`.
///
/// # Example
/// ```
/// use splice::util::num::to_number;
///
/// assert_eq!(to_number("42"), 42.0);
/// assert_eq!(to_number("  -1.5kg"), -1.5);
/// assert_eq!(to_number("2e3"), 2000.0);
/// assert_eq!(to_number("abc"), 0.0);
/// ```
#[must_use]
pub fn to_number(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    end += count_digits(&bytes[end..]);
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let fraction = count_digits(&bytes[end + 1..]);
        if digits > 0 || fraction > 0 {
            end += 1 + fraction;
            digits += fraction;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse().unwrap_or(0.0)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Truncates a number toward zero for use as a loop bound or array index.
///
/// Values outside the `i64` range saturate and `NaN` becomes `0`.
///
/// # Example
/// ```
/// use splice::util::num::truncate;
///
/// assert_eq!(truncate(2.9), 2);
/// assert_eq!(truncate(-2.9), -2);
/// assert_eq!(truncate(f64::NAN), 0);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn truncate(value: f64) -> i64 {
    value as i64
}

/// Converts a length or count into a number value.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Converts a loop counter into a number value.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_format_switches_to_exponent() {
        assert_eq!(format_number(100_000.0), "100000");
        assert_eq!(format_number(1_000_000.0), "1e+06");
        assert_eq!(format_number(999_999.5), "1e+06");
        assert_eq!(format_number(0.0001), "0.0001");
        assert_eq!(format_number(0.000_012_5), "1.25e-05");
        assert_eq!(format_number(1e100), "1e+100");
    }

    #[test]
    fn general_format_rounds_to_six_digits() {
        assert_eq!(format_number(3.141_592_653), "3.14159");
        assert_eq!(format_number(-2.5), "-2.5");
        assert_eq!(format_number(10.0 / 4.0), "2.5");
        assert_eq!(format_number(-0.0), "-0");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format_number(f64::INFINITY), "inf");
        assert_eq!(format_number(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_number(f64::NAN), "nan");
    }

    #[test]
    fn numeric_prefix() {
        assert_eq!(to_number(""), 0.0);
        assert_eq!(to_number("."), 0.0);
        assert_eq!(to_number("-"), 0.0);
        assert_eq!(to_number("5."), 5.0);
        assert_eq!(to_number(".5"), 0.5);
        assert_eq!(to_number("1e"), 1.0);
        assert_eq!(to_number("1e+"), 1.0);
        assert_eq!(to_number("\t+7 apples"), 7.0);
    }
}
