use fastnum::{UD128, decimal::Context};

/// Upper bound on significant digits accepted in an amount, well below
/// [`UD128`] precision so parsing never rounds.
pub const MAX_AMOUNT_DIGITS: usize = 30;

/// Filters raw amount input down to digits and a single decimal point.
///
/// Anything else is dropped rather than rejected, and every decimal point
/// after the first one is dropped as well.
pub fn sanitize_amount(raw: &str) -> String {
    let mut seen_point = false;
    raw.chars()
        .filter(|&c| match c {
            '0'..='9' => true,
            '.' if !seen_point => {
                seen_point = true;
                true
            }
            _ => false,
        })
        .collect()
}

/// Parses sanitized amount text into an exact decimal.
///
/// Returns `None` for empty input, a bare decimal point, or more significant
/// digits than [`MAX_AMOUNT_DIGITS`].
pub fn parse_amount(text: &str) -> Option<UD128> {
    let text = text.trim();
    if text.is_empty() || text == "." {
        return None;
    }
    let significant = text
        .trim_start_matches(['0', '.'])
        .chars()
        .filter(char::is_ascii_digit)
        .count();
    if significant > MAX_AMOUNT_DIGITS {
        return None;
    }

    let normalized = match (text.starts_with('.'), text.ends_with('.')) {
        (true, _) => format!("0{text}"),
        (false, true) => text.trim_end_matches('.').to_string(),
        (false, false) => text.to_string(),
    };
    UD128::from_str(&normalized, Context::default()).ok()
}

/// Whether the amount text parses to a strictly positive number.
pub fn is_positive_amount(text: &str) -> bool {
    parse_amount(text).is_some_and(|amount| amount > UD128::ZERO)
}

#[cfg(test)]
mod tests {
    use fastnum::udec128;

    use super::*;

    #[test]
    fn test_sanitize_amount() {
        assert_eq!(sanitize_amount("12a.5b"), "12.5");
        assert_eq!(sanitize_amount("1.2.3"), "1.23");
        assert_eq!(sanitize_amount("-100"), "100");
        assert_eq!(sanitize_amount("1 000,50"), "100050");
        assert_eq!(sanitize_amount("abc"), "");
        assert_eq!(sanitize_amount("..5"), ".5");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("50"), Some(udec128!(50)));
        assert_eq!(parse_amount("0.25"), Some(udec128!(0.25)));
        assert_eq!(parse_amount(".5"), Some(udec128!(0.5)));
        assert_eq!(parse_amount("5."), Some(udec128!(5)));
        assert_eq!(parse_amount("12.3456789"), Some(udec128!(12.3456789)));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("."), None);
    }

    #[test]
    fn test_parse_amount_rejects_excess_precision() {
        let long = format!("1.{}", "1".repeat(MAX_AMOUNT_DIGITS));
        assert_eq!(parse_amount(&long), None);
        let padded = format!("000{}", "9".repeat(MAX_AMOUNT_DIGITS));
        assert!(parse_amount(&padded).is_some());
    }

    #[test]
    fn test_is_positive_amount() {
        assert!(is_positive_amount("0.01"));
        assert!(is_positive_amount("50"));
        assert!(!is_positive_amount("0"));
        assert!(!is_positive_amount("0.000"));
        assert!(!is_positive_amount(""));
    }
}
