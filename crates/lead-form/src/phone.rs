//! US phone number display formatting

/// Format a phone number for display
///
/// - 10 digits: `(AAA) EEE-NNNN`
/// - 11 digits with a leading `1`: `+1 (AAA) EEE-NNNN`
/// - anything else is returned unchanged
#[must_use]
pub fn format_phone_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        10 => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        11 if digits.starts_with('1') => {
            format!("+1 ({}) {}-{}", &digits[1..4], &digits[4..7], &digits[7..])
        }
        _ => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_digits() {
        assert_eq!(format_phone_number("555.234.5678"), "(555) 234-5678");
        assert_eq!(format_phone_number("5552345678"), "(555) 234-5678");
    }

    #[test]
    fn eleven_digits_with_country_code() {
        assert_eq!(format_phone_number("1 555 234 5678"), "+1 (555) 234-5678");
        assert_eq!(format_phone_number("+15552345678"), "+1 (555) 234-5678");
    }

    #[test]
    fn other_lengths_pass_through() {
        assert_eq!(format_phone_number("25552345678"), "25552345678");
        assert_eq!(format_phone_number("555-1234"), "555-1234");
        assert_eq!(format_phone_number(""), "");
    }
}
