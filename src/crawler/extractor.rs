//! Anchor link extraction
//!
//! This module turns fetched HTML into the ordered sequence of anchor
//! `href` values. Extraction is deliberately raw: hrefs are returned as
//! written in the document. Relative paths stay relative, non-HTTP schemes
//! (mailto:, javascript:) are kept, and duplicates within one page are
//! preserved. Downstream consumers decide what to do with them.

use scraper::{Html, Selector};

/// Extracts every anchor `href` value from an HTML document
///
/// The document tree is traversed depth-first and hrefs are collected in
/// document order. A document whose parse reports errors (truncated
/// markup, stray tags) is treated as malformed and no sequence is
/// returned; a cleanly parsed document with zero anchors yields an empty
/// sequence.
///
/// # Arguments
///
/// * `html` - The raw HTML text
///
/// # Returns
///
/// * `Ok(Vec<String>)` - All href values in document order
/// * `Err(String)` - The document is malformed
pub fn extract_links(html: &str) -> Result<Vec<String>, String> {
    let document = Html::parse_document(html);

    if !document.errors.is_empty() {
        return Err(format!(
            "malformed document: {}",
            document.errors.join("; ")
        ));
    }

    let anchor_selector = Selector::parse("a[href]").map_err(|e| e.to_string())?;

    let links = document
        .select(&anchor_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(String::from)
        .collect();

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_link() {
        let html = r#"<!DOCTYPE html><html><head></head><body><a href="/p1">One</a></body></html>"#;
        assert_eq!(extract_links(html).unwrap(), vec!["/p1"]);
    }

    #[test]
    fn test_document_order_and_duplicates_preserved() {
        let html = r#"<!DOCTYPE html><html><head></head><body>
            <a href="a">1</a>
            <a href="b">2</a>
            <a href="a">3</a>
            <a href="c">4</a>
        </body></html>"#;
        assert_eq!(extract_links(html).unwrap(), vec!["a", "b", "a", "c"]);
    }

    #[test]
    fn test_relative_hrefs_returned_as_is() {
        let html = r#"<!DOCTYPE html><html><head></head><body><a href="../up">Up</a><a href="sub/page">Sub</a></body></html>"#;
        assert_eq!(extract_links(html).unwrap(), vec!["../up", "sub/page"]);
    }

    #[test]
    fn test_non_http_schemes_not_filtered() {
        let html = r#"<!DOCTYPE html><html><head></head><body>
            <a href="mailto:shop@example.com">Mail</a>
            <a href="javascript:void(0)">JS</a>
            <a href="https://example.com/p">Abs</a>
        </body></html>"#;
        assert_eq!(
            extract_links(html).unwrap(),
            vec!["mailto:shop@example.com", "javascript:void(0)", "https://example.com/p"]
        );
    }

    #[test]
    fn test_anchors_without_href_skipped() {
        let html = r#"<!DOCTYPE html><html><head></head><body><a name="top">Top</a><a href="/p1">One</a></body></html>"#;
        assert_eq!(extract_links(html).unwrap(), vec!["/p1"]);
    }

    #[test]
    fn test_nested_anchors_in_document_order() {
        let html = r#"<!DOCTYPE html><html><head></head><body>
            <div><a href="/first">1</a></div>
            <ul><li><a href="/second">2</a></li><li><a href="/third">3</a></li></ul>
        </body></html>"#;
        assert_eq!(
            extract_links(html).unwrap(),
            vec!["/first", "/second", "/third"]
        );
    }

    #[test]
    fn test_zero_anchors_is_empty_not_error() {
        let html = r#"<!DOCTYPE html><html><head></head><body><p>No links here</p></body></html>"#;
        assert_eq!(extract_links(html).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_truncated_markup_is_malformed() {
        let html = r#"<html><body><a href="#;
        assert!(extract_links(html).is_err());
    }

    #[test]
    fn test_other_elements_with_href_ignored() {
        let html = r#"<!DOCTYPE html><html><head><link rel="stylesheet" href="/style.css"></head><body><a href="/p1">One</a></body></html>"#;
        assert_eq!(extract_links(html).unwrap(), vec!["/p1"]);
    }
}
