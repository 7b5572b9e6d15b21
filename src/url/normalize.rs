/// Normalizes a bare domain or URL string into a fetchable absolute URL
///
/// If the input does not already begin with an `http://` or `https://`
/// scheme prefix, `http://` is prepended. No other transformation is
/// performed: no trailing-slash normalization, no case-folding, no punycode
/// handling. The function is pure and always returns a string.
///
/// # Arguments
///
/// * `input` - A bare domain (e.g. `example.com`) or a full URL
///
/// # Examples
///
/// ```
/// use linkharvest::normalize_url;
///
/// assert_eq!(normalize_url("example.com"), "http://example.com");
/// assert_eq!(normalize_url("https://example.com"), "https://example.com");
/// ```
pub fn normalize_url(input: &str) -> String {
    if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("http://{}", input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_domain_gets_http_scheme() {
        assert_eq!(normalize_url("example.com"), "http://example.com");
    }

    #[test]
    fn test_http_url_unchanged() {
        assert_eq!(
            normalize_url("http://example.com/page"),
            "http://example.com/page"
        );
    }

    #[test]
    fn test_https_url_unchanged() {
        assert_eq!(
            normalize_url("https://example.com/page"),
            "https://example.com/page"
        );
    }

    #[test]
    fn test_no_trailing_slash_added() {
        assert_eq!(normalize_url("example.com"), "http://example.com");
        assert_eq!(normalize_url("example.com/"), "http://example.com/");
    }

    #[test]
    fn test_case_preserved() {
        assert_eq!(normalize_url("Example.COM"), "http://Example.COM");
    }

    #[test]
    fn test_subdomain_and_path_preserved() {
        assert_eq!(
            normalize_url("shop.example.com/products?id=1"),
            "http://shop.example.com/products?id=1"
        );
    }

    #[test]
    fn test_scheme_prefix_must_match_exactly() {
        // "httpx://" is not an HTTP scheme, so the prefix is still added
        assert_eq!(normalize_url("ftp://example.com"), "http://ftp://example.com");
    }
}
