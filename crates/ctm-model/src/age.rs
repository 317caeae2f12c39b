//! Free-text age expressions.
//!
//! The registry publishes eligibility bounds as text such as `"18 Years"` or
//! `"N/A"`. Parsing is lenient: malformed input never fails, it yields `None`
//! and the caller picks the default.

/// Parse the first all-digit, whitespace-delimited token of `text` as years.
///
/// Returns `None` for empty text, text starting with `n/a` (any case), and
/// text without a numeric token. Values beyond `u32::MAX` saturate.
pub fn parse_age(text: &str) -> Option<u32> {
    if text.is_empty() || starts_with_not_applicable(text) {
        return None;
    }
    let token = text
        .split_whitespace()
        .find(|token| token.bytes().all(|b| b.is_ascii_digit()))?;
    Some(token.parse::<u32>().unwrap_or(u32::MAX))
}

/// Lenient form of [`parse_age`]: absent or unparseable text is 0 years.
pub fn age_years(text: Option<&str>) -> u32 {
    text.and_then(parse_age).unwrap_or(0)
}

/// Render an age the way the registry query language expects it.
pub fn format_age_query(age_years: u32) -> String {
    format!("{age_years} Years")
}

fn starts_with_not_applicable(text: &str) -> bool {
    text.get(..3)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("n/a"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_registry_age_text() {
        assert_eq!(parse_age("18 Years"), Some(18));
        assert_eq!(parse_age("6 Months"), Some(6));
        assert_eq!(parse_age("  65   Years "), Some(65));
        assert_eq!(parse_age("Years 40"), Some(40));
    }

    #[test]
    fn not_applicable_and_empty_are_absent() {
        assert_eq!(parse_age(""), None);
        assert_eq!(parse_age("N/A"), None);
        assert_eq!(parse_age("n/a therapy"), None);
        assert_eq!(parse_age("N/a 18 Years"), None);
    }

    #[test]
    fn text_without_numeric_token_is_absent() {
        assert_eq!(parse_age("abc"), None);
        assert_eq!(parse_age("18years"), None);
        assert_eq!(parse_age("-5 Years"), None);
        assert_eq!(parse_age("   "), None);
    }

    #[test]
    fn zero_is_distinguishable_from_absent() {
        assert_eq!(parse_age("0 Years"), Some(0));
        assert_eq!(age_years(Some("0 Years")), 0);
        assert_eq!(age_years(None), 0);
    }

    #[test]
    fn oversized_token_saturates() {
        assert_eq!(parse_age("99999999999999999999 Years"), Some(u32::MAX));
    }

    #[test]
    fn formats_query_age() {
        assert_eq!(format_age_query(45), "45 Years");
        assert_eq!(format_age_query(0), "0 Years");
    }

    proptest! {
        #[test]
        fn lenient_parse_never_panics(text in ".*") {
            let _ = age_years(Some(&text));
        }

        #[test]
        fn formatted_age_parses_back(age in 0u32..200) {
            prop_assert_eq!(parse_age(&format_age_query(age)), Some(age));
        }
    }
}
