//! Numeric formatting for motion program literals.
//!
//! Every number written into a program goes through [`format_number`]. The
//! output always has exactly [`DECIMAL_PLACES`] fractional digits, rounds
//! half away from zero, and never depends on locale.
//!
//! Rounding is applied to the shortest decimal representation of the value
//! (the text `f64`'s `Display` produces), so `0.123455` becomes `0.12346`
//! even though the nearest double lies a hair below the written tie.

/// Number of digits after the decimal point
pub const DECIMAL_PLACES: usize = 5;

/// Format a number with exactly five fractional digits.
///
/// The sign of the input is kept even when the rounded magnitude is zero,
/// so `-0.000004` formats as `-0.00000`. Non-finite values are written as
/// `NaN`, `inf` or `-inf`; the controller rejects those, and callers are
/// expected to keep them out of programs.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut int_digits: Vec<u8> = int_part.bytes().map(|b| b - b'0').collect();
    let frac_digits: Vec<u8> = frac_part.bytes().map(|b| b - b'0').collect();

    let mut kept: Vec<u8> = (0..DECIMAL_PLACES)
        .map(|i| frac_digits.get(i).copied().unwrap_or(0))
        .collect();

    let round_up = frac_digits
        .get(DECIMAL_PLACES)
        .is_some_and(|&digit| digit >= 5);

    if round_up && increment(&mut kept) {
        // Carry out of the fraction
        if increment(&mut int_digits) {
            int_digits.insert(0, 1);
        }
    }

    let mut out = String::with_capacity(int_digits.len() + DECIMAL_PLACES + 2);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.extend(int_digits.iter().map(|d| char::from(b'0' + d)));
    out.push('.');
    out.extend(kept.iter().map(|d| char::from(b'0' + d)));
    out
}

/// Format a list of numbers as a bracketed, comma-separated array literal
pub fn format_array(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| format_number(*v)).collect();
    format!("[{}]", items.join(","))
}

/// Add one to a most-significant-first digit string. Returns true when the
/// carry runs off the front.
fn increment(digits: &mut [u8]) -> bool {
    for digit in digits.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(format_number(1.0), "1.00000");
        assert_eq!(format_number(0.0), "0.00000");
        assert_eq!(format_number(-42.0), "-42.00000");
    }

    #[test]
    fn test_small_negative_keeps_sign() {
        assert_eq!(format_number(-0.000004), "-0.00000");
        assert_eq!(format_number(-0.0), "-0.00000");
    }

    #[test]
    fn test_half_away_from_zero() {
        assert_eq!(format_number(0.123455), "0.12346");
        assert_eq!(format_number(-0.123455), "-0.12346");
        assert_eq!(format_number(0.015625), "0.01563");
        assert_eq!(format_number(0.1234549), "0.12345");
    }

    #[test]
    fn test_carry_into_integer_part() {
        assert_eq!(format_number(0.999995), "1.00000");
        assert_eq!(format_number(9.999999), "10.00000");
        assert_eq!(format_number(-99.999996), "-100.00000");
    }

    #[test]
    fn test_tiny_and_large_values() {
        assert_eq!(format_number(1e-12), "0.00000");
        assert_eq!(format_number(123456789.0), "123456789.00000");
        assert_eq!(format_number(std::f64::consts::PI), "3.14159");
        assert_eq!(format_number(-std::f64::consts::FRAC_PI_2), "-1.57080");
    }

    #[test]
    fn test_format_array() {
        assert_eq!(format_array(&[0.0, 1.5, -2.0]), "[0.00000,1.50000,-2.00000]");
        assert_eq!(format_array(&[]), "[]");
    }
}
