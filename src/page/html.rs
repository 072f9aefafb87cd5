// src/page/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We also use the `url` crate to resolve relative hrefs against the crawl's
// base URL ("../parent" on "http://t.org/dir/" -> "http://t.org/parent").
// Hrefs that are already absolute are returned exactly as written.
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

use crate::error::CrawlError;

// Extracts every http(s) link target found in <a href="..."> elements
//
// Parameters:
//   html: the page body
//   base: the URL relative hrefs are resolved against
//
// Returns: absolute URLs in document order, or ParseFailure
//
// Example:
//   html = "<a href='/docs'>Docs</a>", base = "https://example.com"
//   result = ["https://example.com/docs"]
pub fn extract_links(html: &str, base: &Url) -> Result<Vec<String>, CrawlError> {
    let selector =
        Selector::parse("a[href]").map_err(|e| CrawlError::ParseFailure(e.to_string()))?;

    let document = Html::parse_document(html);

    let links = document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_href(base, href))
        .collect();

    Ok(links)
}

// Resolves one href against the base
//
// Returns None for hrefs that cannot be resolved and for targets that are
// not http/https (mailto:, tel:, javascript:, data:...)
fn resolve_href(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();

    match Url::parse(href) {
        // Already absolute: pass it through untouched
        Ok(absolute) => is_web_url(&absolute).then(|| href.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let joined = base.join(href).ok()?;
            is_web_url(&joined).then(|| joined.to_string())
        }
        Err(_) => None,
    }
}

fn is_web_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn test_absolute_and_relative_urls() {
        let html = r#"
        <html>
            <body>
                <a href="/path/one">
                    <span>Boot.dev</span>
                </a>
                <a href="https://other.com/path/one">
                    <span>Boot.dev</span>
                </a>
            </body>
        </html>
        "#;
        let links = extract_links(html, &base("https://blog.boot.dev")).unwrap();
        assert_eq!(
            links,
            vec!["https://blog.boot.dev/path/one", "https://other.com/path/one"]
        );
    }

    #[test]
    fn test_absolute_href_passed_through_unchanged() {
        let html = r#"
            <a href="https://google.com">Google</a>
            <a href="/about">About Us</a>
            <a href="contact.html">Contact</a>
        "#;
        let links = extract_links(html, &base("https://example.com")).unwrap();
        assert_eq!(
            links,
            vec![
                "https://google.com",
                "https://example.com/about",
                "https://example.com/contact.html",
            ]
        );
    }

    #[test]
    fn test_dot_segments_resolved() {
        let html = r#"
            <a href="../parent">Parent Dir</a>
            <a href="./sibling">Sibling</a>
            <a href="http://external.com/page">External Page</a>
        "#;
        let links = extract_links(html, &base("http://t.org/dir/")).unwrap();
        assert_eq!(
            links,
            vec![
                "http://t.org/parent",
                "http://t.org/dir/sibling",
                "http://external.com/page",
            ]
        );
    }

    #[test]
    fn test_base_with_trailing_slash() {
        let html = r#"
            <a href="/home">Home</a>
            <a href="2025/05/24/article">Article</a>
        "#;
        let links = extract_links(html, &base("https://site.io/blog/")).unwrap();
        assert_eq!(
            links,
            vec!["https://site.io/home", "https://site.io/blog/2025/05/24/article"]
        );
    }

    #[test]
    fn test_skip_non_web_schemes() {
        let html = r#"
            <a href="mailto:test@example.com">Email</a>
            <a href="tel:+123">Call</a>
            <a href="javascript:void(0)">Nothing</a>
            <a>No href</a>
        "#;
        let links = extract_links(html, &base("https://example.com")).unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn test_broken_markup_still_yields_links() {
        let html = r#"<div><a href="/ok">ok<p></div></span>"#;
        let links = extract_links(html, &base("https://example.com")).unwrap();
        assert_eq!(links, vec!["https://example.com/ok"]);
    }
}
