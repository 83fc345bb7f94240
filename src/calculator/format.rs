//! Number formatting for calculator results.
//!
//! Results in the everyday range are rounded to ten significant digits so
//! that binary noise (`0.1 + 0.2`) does not reach the display. Everything
//! else uses the plain number-to-string conversion, which switches to
//! exponential notation for very large or very small magnitudes.

/// Magnitudes strictly between these bounds are rounded before display.
const ROUND_LOWER: f64 = 1e-9;
const ROUND_UPPER: f64 = 1e12;

/// Significant digits kept when rounding for display.
const SIGNIFICANT_DIGITS: usize = 10;

/// Fraction digits that always cover the exact decimal expansion of an `f64`.
const EXACT_DIGITS: usize = 767;

/// Decimal exponent at which plain notation gives way to `e+N`.
const PLAIN_EXPONENT_MAX: i32 = 21;

/// Decimal exponent below which plain notation gives way to `e-N`.
const PLAIN_EXPONENT_MIN: i32 = -6;

/// Format a finite result for display.
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude > ROUND_LOWER && magnitude < ROUND_UPPER {
        number_to_string(round_significant(value, SIGNIFICANT_DIGITS))
    } else {
        number_to_string(value)
    }
}

/// Round `value` to `digits` significant decimal digits.
///
/// Ties round away from zero, judged on the exact decimal expansion of the
/// binary value, so `12345678.125` keeps `12345678.13`.
pub fn round_significant(value: f64, digits: usize) -> f64 {
    if !value.is_finite() || value == 0.0 || digits == 0 {
        return value;
    }

    let exact = format!("{:.*e}", EXACT_DIGITS, value.abs());
    let Some((mantissa, exponent)) = exact.split_once('e') else {
        return value;
    };
    let Ok(mut exponent) = exponent.parse::<i32>() else {
        return value;
    };

    let expansion: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    let mut kept = expansion[..digits.min(expansion.len())].to_vec();

    if expansion.get(digits).is_some_and(|&next| next >= 5) {
        let mut index = kept.len();
        loop {
            if index == 0 {
                // Every kept digit was 9: 9.99..9 becomes 10.0..0.
                kept.insert(0, 1);
                kept.pop();
                exponent += 1;
                break;
            }
            index -= 1;
            if kept[index] == 9 {
                kept[index] = 0;
            } else {
                kept[index] += 1;
                break;
            }
        }
    }

    let text: String = kept.iter().map(|&d| char::from(b'0' + d)).collect();
    let scale = exponent - (kept.len() as i32 - 1);
    format!("{}e{}", text, scale)
        .parse::<f64>()
        .map(|rounded| rounded.copysign(value))
        .unwrap_or(value)
}

/// Convert a number to its shortest round-trip decimal string.
///
/// Uses plain notation while the decimal exponent stays within
/// `[-6, 21)` and `d.ddde±N` outside of it. Negative zero prints as `0`.
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return text.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };

    // `{:e}` yields the shortest digits that round-trip, e.g. "1.2345e3".
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let len = digits.len() as i32;
    // Position of the decimal point relative to the start of `digits`.
    let point = exponent + 1;

    let body = if len <= point && point <= PLAIN_EXPONENT_MAX {
        format!("{}{}", digits, "0".repeat((point - len) as usize))
    } else if 0 < point && point <= PLAIN_EXPONENT_MAX {
        let (int_part, frac_part) = digits.split_at(point as usize);
        format!("{}.{}", int_part, frac_part)
    } else if PLAIN_EXPONENT_MIN < point && point <= 0 {
        format!("0.{}{}", "0".repeat((-point) as usize), digits)
    } else {
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", lead, exp_sign, exponent.abs())
        } else {
            format!("{}.{}e{}{}", lead, rest, exp_sign, exponent.abs())
        }
    };

    format!("{}{}", sign, body)
}
