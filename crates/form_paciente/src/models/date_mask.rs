use once_cell::sync::Lazy;
use regex::Regex;

/// Digits kept by the mask: DDMMYYYY
pub const MAX_DATE_DIGITS: usize = 8;

/// Anything that is not an ASCII digit. `\D` would keep non-ASCII digits.
static NON_DIGIT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^0-9]").expect("Invalid regex pattern for non-digits")
});

/// Strips every character that is not an ASCII digit
pub fn digits_only(raw: &str) -> String {
    NON_DIGIT_PATTERN.replace_all(raw, "").into_owned()
}

/// Rewrites free-form keystrokes into `DD/MM/YYYY`.
///
/// Non-digits are dropped, the rest is cut to 8 digits and separators are
/// inserted after the day and the month once there are digits past them.
/// No calendar check is made.
///
/// # Example
/// ```rust
/// use form_paciente::models::date_mask::mask_birth_date;
///
/// assert_eq!(mask_birth_date("01012020"), "01/01/2020");
/// assert_eq!(mask_birth_date("310"), "31/0");
/// assert_eq!(mask_birth_date("3"), "3");
/// ```
pub fn mask_birth_date(raw: &str) -> String {
    let mut digits = digits_only(raw);
    digits.truncate(MAX_DATE_DIGITS);

    if digits.len() > 4 {
        format!("{}/{}/{}", &digits[..2], &digits[2..4], &digits[4..])
    } else if digits.len() > 2 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_full_date() {
        assert_eq!(mask_birth_date("01012020"), "01/01/2020");
    }

    #[test]
    fn test_truncates_to_eight_digits() {
        assert_eq!(mask_birth_date("0101202099999"), "01/01/2020");
    }

    #[test]
    fn test_strips_non_digits_first() {
        assert_eq!(mask_birth_date("01a01/2020"), "01/01/2020");
        assert_eq!(mask_birth_date("01/01/2020"), "01/01/2020");
        assert_eq!(mask_birth_date("abc"), "");
        assert_eq!(mask_birth_date("١٢٣"), "");
    }

    #[test]
    fn test_partial_input() {
        assert_eq!(mask_birth_date(""), "");
        assert_eq!(mask_birth_date("3"), "3");
        assert_eq!(mask_birth_date("31"), "31");
        assert_eq!(mask_birth_date("310"), "31/0");
        assert_eq!(mask_birth_date("3101"), "31/01");
        assert_eq!(mask_birth_date("31011"), "31/01/1");
    }

    #[test]
    fn test_no_calendar_validation() {
        assert_eq!(mask_birth_date("99999999"), "99/99/9999");
    }

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("31/01/1990"), "31011990");
        assert_eq!(digits_only(" 3 1 "), "31");
    }

    proptest! {
        #[test]
        fn prop_mask_is_idempotent(raw in ".{0,20}") {
            let masked = mask_birth_date(&raw);
            prop_assert_eq!(mask_birth_date(&masked), masked);
        }

        #[test]
        fn prop_keeps_leading_digits(raw in "[0-9/a-z ]{0,20}") {
            let masked = mask_birth_date(&raw);
            let expected: String = digits_only(&raw).chars().take(MAX_DATE_DIGITS).collect();
            prop_assert_eq!(digits_only(&masked), expected);
            prop_assert!(masked.len() <= 10);
        }
    }
}
