use regex::Regex;
use std::sync::OnceLock;

/// Pattern for a syntactically valid domain name: one or more lowercase
/// labels (letters, digits, inner hyphens, at most 63 characters) separated
/// by dots, ending in a final label of at least two letters.
const DOMAIN_PATTERN: &str = r"^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}$";

fn domain_regex() -> &'static Regex {
    static DOMAIN_REGEX: OnceLock<Regex> = OnceLock::new();
    DOMAIN_REGEX.get_or_init(|| Regex::new(DOMAIN_PATTERN).expect("domain pattern is valid"))
}

/// Checks whether a submitted string is a syntactically valid domain name
///
/// This is the submission-boundary filter: entries that do not match are
/// skipped by the submission handler and never reach the queue.
///
/// # Arguments
///
/// * `domain` - The raw string submitted by a client
///
/// # Examples
///
/// ```
/// use linkharvest::is_valid_domain;
///
/// assert!(is_valid_domain("example.com"));
/// assert!(is_valid_domain("shop.example.co.uk"));
/// assert!(!is_valid_domain("not a domain"));
/// ```
pub fn is_valid_domain(domain: &str) -> bool {
    domain_regex().is_match(domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_domain() {
        assert!(is_valid_domain("example.com"));
    }

    #[test]
    fn test_subdomain() {
        assert!(is_valid_domain("shop.example.com"));
    }

    #[test]
    fn test_multi_level_tld() {
        assert!(is_valid_domain("example.co.uk"));
    }

    #[test]
    fn test_digits_and_hyphens() {
        assert!(is_valid_domain("my-shop2.example.com"));
    }

    #[test]
    fn test_rejects_whitespace() {
        assert!(!is_valid_domain("not a domain"));
    }

    #[test]
    fn test_rejects_uppercase() {
        assert!(!is_valid_domain("Example.com"));
    }

    #[test]
    fn test_rejects_missing_tld() {
        assert!(!is_valid_domain("localhost"));
    }

    #[test]
    fn test_rejects_short_final_label() {
        assert!(!is_valid_domain("example.c"));
    }

    #[test]
    fn test_rejects_numeric_tld() {
        assert!(!is_valid_domain("192.168.0.1"));
    }

    #[test]
    fn test_rejects_scheme_prefix() {
        assert!(!is_valid_domain("http://example.com"));
    }

    #[test]
    fn test_rejects_leading_hyphen_label() {
        assert!(!is_valid_domain("-bad.example.com"));
    }

    #[test]
    fn test_rejects_empty_string() {
        assert!(!is_valid_domain(""));
    }

    #[test]
    fn test_rejects_trailing_dot() {
        assert!(!is_valid_domain("example.com."));
    }
}
