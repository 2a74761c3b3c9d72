//! Display formatting for computed quantities
//!
//! Every physical quantity shown to the user goes through [`format_sig_fig`] (or
//! [`format_duration`] for half-lives) so that displayed precision does not depend on
//! magnitude. Neither function ever produces scientific notation.

use chrono::TimeDelta;

/// Significant figures used for displayed values.
pub const DEFAULT_SIG_FIGS: usize = 3;

/// Formats `value` with `sig` significant digits after the decimal point.
///
/// Values whose integer part already has `sig` or more digits are printed as plain
/// integers, so magnitude is never truncated (`12345` stays `"12345"`). Trailing zeros
/// and a dangling decimal point are removed. Non-finite values give an empty string.
pub fn format_sig_fig(value: f64, sig: usize) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sig = sig.max(1) as i32;
    let order = value.abs().log10().floor() as i32;

    if order >= sig - 1 {
        return to_fixed(value, 0);
    }

    let decimals = (sig - 1 - order) as usize;
    trim_fraction(to_fixed(value, decimals))
}

/// Formats a duration in seconds using the largest unit with a magnitude of at least one.
///
/// The magnitude is rounded to `sig` significant figures, e.g. `90000` seconds
/// gives `"1.04 days"`. Zero, negative and NaN durations give `"0 s"`.
pub fn format_duration(seconds: f64, sig: usize) -> String {
    if seconds.is_nan() || seconds <= 0.0 {
        return "0 s".to_string();
    }
    if seconds.is_infinite() {
        return String::new();
    }

    let (value, unit) = duration_units()
        .into_iter()
        .find(|(unit_seconds, _)| seconds >= *unit_seconds)
        .map(|(unit_seconds, unit)| (seconds / unit_seconds, unit))
        .unwrap_or((seconds, "s"));

    format!("{} {}", format_precision(value, sig), unit)
}

/// Day, hour and minute lengths in seconds, largest first.
fn duration_units() -> [(f64, &'static str); 3] {
    [
        (TimeDelta::days(1).num_seconds() as f64, "days"),
        (TimeDelta::hours(1).num_seconds() as f64, "h"),
        (TimeDelta::minutes(1).num_seconds() as f64, "min"),
    ]
}

/// Rounds to `sig` significant figures without switching to exponent notation.
fn format_precision(value: f64, sig: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let sig = sig.max(1) as i32;
    let order = value.abs().log10().floor() as i32;

    if order >= sig - 1 {
        // Round the leading digits only; the rest are written as zeros since the
        // rounded value itself may not be representable.
        let shift = order - sig + 1;
        let mantissa = (value / 10_f64.powi(shift)).round();
        return format!("{}{}", to_fixed(mantissa, 0), "0".repeat(shift as usize));
    }

    let decimals = (sig - 1 - order) as usize;
    trim_fraction(to_fixed(value, decimals))
}

/// Fixed-point text with `decimals` fraction digits.
///
/// Rounds on the exact binary value, with exact ties going away from zero
/// (`100.5` gives `"101"`, `1.125` with two decimals gives `"1.13"`).
fn to_fixed(value: f64, decimals: usize) -> String {
    // Wide enough for the exact expansion of any finite f64.
    let exact = format!("{:.1100}", value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(decimals))
        .collect();
    let mut int_len = int_part.len();

    if frac_part.as_bytes().get(decimals).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
            int_len += 1;
        }
    }

    let mut text = String::with_capacity(digits.len() + 2);
    if value < 0.0 && digits.iter().any(|d| *d != b'0') {
        text.push('-');
    }
    text.extend(digits[..int_len].iter().map(|d| *d as char));
    if decimals > 0 {
        text.push('.');
        text.extend(digits[int_len..].iter().map(|d| *d as char));
    }
    text
}

fn trim_fraction(text: String) -> String {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
