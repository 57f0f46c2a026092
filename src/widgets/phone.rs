//! Live phone-number input mask.

/// Reformat whatever is in a phone field from its digits alone.
///
/// * fewer than 3 digits: raw digits
/// * 3 to 5 digits: `(DDD) D..`
/// * 6 to 9 digits: raw digits, until the number is complete
/// * 10 or more: `(DDD) DDD-DDDD`, extra digits dropped
///
/// The cursor position is not preserved by callers; the output depends on
/// the digit count only.
pub fn format_phone_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let len = digits.len();

    if len >= 10 {
        format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..10])
    } else if len >= 6 {
        digits
    } else if len >= 3 {
        format!("({}) {}", &digits[..3], &digits[3..])
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_number() {
        assert_eq!(format_phone_input("5551234567"), "(555) 123-4567");
    }

    #[test]
    fn test_idempotent_on_formatted() {
        let once = format_phone_input("(555) 123-4567");
        assert_eq!(once, "(555) 123-4567");
        assert_eq!(format_phone_input(&once), once);
    }

    #[test]
    fn test_partial_lengths() {
        assert_eq!(format_phone_input("55"), "55");
        assert_eq!(format_phone_input("555"), "(555) ");
        assert_eq!(format_phone_input("55512"), "(555) 12");
        assert_eq!(format_phone_input("555123"), "555123");
        assert_eq!(format_phone_input("5551234"), "5551234");
        assert_eq!(format_phone_input("(555) 123-456"), "555123456");
    }

    #[test]
    fn test_strips_non_digits_and_truncates() {
        assert_eq!(format_phone_input("+1 (555) 123-45678"), "(155) 512-3456");
        assert_eq!(format_phone_input("abc"), "");
    }
}
