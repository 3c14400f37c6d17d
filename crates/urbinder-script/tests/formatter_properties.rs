use proptest::prelude::*;
use urbinder_script::{format_number, DECIMAL_PLACES};

fn fractional_digits(text: &str) -> usize {
    text.split_once('.').map(|(_, frac)| frac.len()).unwrap_or(0)
}

proptest! {
    #[test]
    fn always_five_fractional_digits(x in -1.0e9f64..1.0e9f64) {
        let text = format_number(x);
        prop_assert_eq!(fractional_digits(&text), DECIMAL_PLACES);
        prop_assert!(text.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-'));
    }

    #[test]
    fn reformat_after_reparse_is_stable(x in -1.0e6f64..1.0e6f64) {
        let first = format_number(x);
        let reparsed: f64 = first.parse().unwrap();
        prop_assert_eq!(format_number(reparsed), first);
    }

    #[test]
    fn formatted_value_is_within_half_a_unit(x in -1.0e6f64..1.0e6f64) {
        let reparsed: f64 = format_number(x).parse().unwrap();
        prop_assert!((reparsed - x).abs() <= 0.5e-5 + 1e-9);
    }

    #[test]
    fn sign_is_symmetric(x in 0.0f64..1.0e6f64) {
        let positive = format_number(x);
        let negative = format_number(-x);
        prop_assert_eq!(negative, format!("-{}", positive));
    }
}

#[test]
fn known_values() {
    assert_eq!(format_number(1.0), "1.00000");
    assert_eq!(format_number(-0.000004), "-0.00000");
    assert_eq!(format_number(2.5), "2.50000");
}
