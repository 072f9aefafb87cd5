// src/page/normalize.rs
// =============================================================================
// This module turns a URL into the key we use in the visitation ledger.
//
// Two URLs that point at the same page should produce the same key, so that
// "https://example.com/path/" and "http://example.com/path" are counted as
// one page. To do that we:
// - Drop the scheme (http/https)
// - Drop the query string and the fragment
// - Keep userinfo (if any), host, port (if not the default) and path
// - Remove exactly one trailing '/'
//
// The output of normalize_url() is itself accepted by normalize_url() and
// comes back unchanged, so normalizing twice is the same as normalizing once.
// =============================================================================

use url::Url;

use crate::error::CrawlError;

// Scheme used to re-read a scheme-less key. It is not one of the "special"
// schemes (http, https, ws, ftp...), so it has no default port and an
// explicit ":80" or ":443" in the key survives the round trip.
const KEY_SCHEME: &str = "key";

// Normalizes a raw URL into a ledger key
//
// Examples:
//   "https://blog.boot.dev/path/" -> "blog.boot.dev/path"
//   "http://user:pw@a.com:8080/x" -> "user:pw@a.com:8080/x"
//   "/relative/path"              -> Err(MalformedUrl)
pub fn normalize_url(raw: &str) -> Result<String, CrawlError> {
    let raw = raw.trim();

    // Only an explicit "scheme://" marks a full URL. Keys like "a.com:8080/x"
    // or "user:pw@a.com/x" would otherwise parse with "a.com" or "user" as
    // their scheme.
    let parsed = if raw.contains("://") {
        Url::parse(raw).map_err(|e| CrawlError::malformed(raw, e))?
    } else if looks_like_key(raw) {
        Url::parse(&format!("{}://{}", KEY_SCHEME, raw))
            .map_err(|e| CrawlError::malformed(raw, e))?
    } else {
        return Err(CrawlError::malformed(raw, "relative URL without a host"));
    };

    let mut key = String::new();

    if !parsed.username().is_empty() {
        key.push_str(parsed.username());
        if let Some(password) = parsed.password() {
            key.push(':');
            key.push_str(password);
        }
        key.push('@');
    }

    if let Some(host) = parsed.host_str() {
        key.push_str(host);
    }

    // Url::port() is None when the port is the scheme's default
    if let Some(port) = parsed.port() {
        key.push(':');
        key.push_str(&port.to_string());
    }

    key.push_str(parsed.path());

    if key.ends_with('/') {
        key.pop();
    }

    Ok(key)
}

// A scheme-less string we are willing to read as "host/path".
// Anything starting like a relative reference is rejected instead.
fn looks_like_key(raw: &str) -> bool {
    match raw.chars().next() {
        None => false,
        Some(first) => !matches!(first, '/' | '.' | '?' | '#'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_https_scheme() {
        assert_eq!(
            normalize_url("https://blog.boot.dev/path").unwrap(),
            "blog.boot.dev/path"
        );
    }

    #[test]
    fn test_remove_scheme_and_trailing_slash() {
        assert_eq!(
            normalize_url("https://blog.boot.dev/path/").unwrap(),
            "blog.boot.dev/path"
        );
        assert_eq!(
            normalize_url("http://blog.boot.dev/path/").unwrap(),
            "blog.boot.dev/path"
        );
    }

    #[test]
    fn test_scheme_and_slash_variants_collapse() {
        let a = normalize_url("https://a.com/p/").unwrap();
        let b = normalize_url("http://a.com/p").unwrap();
        assert_eq!(a, "a.com/p");
        assert_eq!(a, b);
    }

    #[test]
    fn test_only_one_trailing_slash_removed() {
        assert_eq!(normalize_url("https://a.com/p//").unwrap(), "a.com/p/");
    }

    #[test]
    fn test_bare_host() {
        assert_eq!(normalize_url("https://a.com").unwrap(), "a.com");
        assert_eq!(normalize_url("https://a.com/").unwrap(), "a.com");
    }

    #[test]
    fn test_query_and_fragment_dropped() {
        assert_eq!(
            normalize_url("https://a.com/search?q=rust#top").unwrap(),
            "a.com/search"
        );
    }

    #[test]
    fn test_userinfo_and_port_kept() {
        assert_eq!(
            normalize_url("http://user:pw@a.com:8080/x/").unwrap(),
            "user:pw@a.com:8080/x"
        );
        // Default port is not part of the key
        assert_eq!(normalize_url("https://a.com:443/x").unwrap(), "a.com/x");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "https://blog.boot.dev/path/",
            "http://user:pw@a.com:8080/x",
            "https://a.com",
            "https://a.com/dir/page.html?x=1",
            "https://a.com:8080/x",
            "http://user:pw@a.com/x",
            "http://user@a.com:8443/",
            // 80 is not https's default, so it stays in the key
            "https://a.com:80/x",
        ];
        for input in inputs {
            let once = normalize_url(input).unwrap();
            let twice = normalize_url(&once).unwrap();
            assert_eq!(once, twice, "normalizing {} twice changed it", input);
        }
    }

    #[test]
    fn test_key_with_port_or_password_is_its_own_key() {
        assert_eq!(normalize_url("a.com:8080/x").unwrap(), "a.com:8080/x");
        assert_eq!(normalize_url("a.com:80/x").unwrap(), "a.com:80/x");
        assert_eq!(normalize_url("user:pw@a.com/x").unwrap(), "user:pw@a.com/x");
        assert_eq!(normalize_url("a.com/p/").unwrap(), "a.com/p");
    }

    #[test]
    fn test_relative_is_malformed() {
        assert!(matches!(
            normalize_url("/just/a/path"),
            Err(CrawlError::MalformedUrl { .. })
        ));
        assert!(matches!(
            normalize_url("../up"),
            Err(CrawlError::MalformedUrl { .. })
        ));
        assert!(matches!(normalize_url(""), Err(CrawlError::MalformedUrl { .. })));
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert!(normalize_url("http://[::1").is_err());
    }
}
