//! URL classification for links and image sources
//!
//! The platform delivers relative paths and http(s) URLs; image fields may
//! additionally carry `data:image/...` URIs. Script-bearing schemes are
//! refused outright, while unrecognized schemes are tolerated on builder
//! fields for backward compatibility.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a URI scheme prefix per RFC 3986 (`scheme:`).
static SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-zA-Z][a-zA-Z0-9+.\-]*):").expect("valid scheme regex"));

/// Classification of a URL string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    /// Absolute http or https URL with a host
    Http,
    /// No scheme at all: a relative path
    Relative,
    /// `data:image/...` URI, acceptable for image fields only
    DataImage,
    /// A scheme that can carry executable content
    Scriptable,
    /// Some other scheme the platform does not recognize
    OtherScheme,
    /// An absolute URL that fails validation (e.g. hostless http)
    Rejected,
}

/// Classify a URL string.
pub fn classify(url: &str) -> UrlKind {
    if let Some(rest) = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
    {
        if rest.is_empty() || rest.starts_with('/') {
            return UrlKind::Rejected;
        }
        return UrlKind::Http;
    }

    if url.starts_with("data:") {
        if url.starts_with("data:image/") {
            return UrlKind::DataImage;
        }
        return UrlKind::Scriptable;
    }

    match SCHEME.captures(url) {
        Some(caps) => {
            let scheme = caps[1].to_ascii_lowercase();
            match scheme.as_str() {
                "javascript" | "vbscript" => UrlKind::Scriptable,
                // http:/https: without the double slash
                "http" | "https" => UrlKind::Rejected,
                _ => UrlKind::OtherScheme,
            }
        }
        None => UrlKind::Relative,
    }
}

/// Whether a URL may be used as a link destination in rendered text.
pub fn is_valid_link(url: &str) -> bool {
    matches!(classify(url), UrlKind::Http | UrlKind::Relative)
}

/// Whether a URL may be used as an image source.
pub fn is_valid_image(url: &str) -> bool {
    matches!(
        classify(url),
        UrlKind::Http | UrlKind::Relative | UrlKind::DataImage
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_urls_accepted() {
        assert_eq!(classify("http://example.com"), UrlKind::Http);
        assert_eq!(classify("https://example.com/a/b?c=d"), UrlKind::Http);
    }

    #[test]
    fn test_relative_urls_accepted() {
        assert_eq!(classify("/images/logo.png"), UrlKind::Relative);
        assert_eq!(classify("docs/readme.md"), UrlKind::Relative);
        assert_eq!(classify("../up.png"), UrlKind::Relative);
    }

    #[test]
    fn test_data_image_uri_is_image_only() {
        let uri = "data:image/png;base64,iVBORw0KGgo=";
        assert_eq!(classify(uri), UrlKind::DataImage);
        assert!(is_valid_image(uri));
        assert!(!is_valid_link(uri));
    }

    #[test]
    fn test_script_schemes_rejected() {
        assert_eq!(classify("javascript:alert(1)"), UrlKind::Scriptable);
        assert_eq!(classify("VBScript:x"), UrlKind::Scriptable);
        assert_eq!(classify("data:text/html,<script>"), UrlKind::Scriptable);
        assert!(!is_valid_link("javascript:alert(1)"));
        assert!(!is_valid_image("javascript:alert(1)"));
    }

    #[test]
    fn test_unrecognized_schemes_classified_separately() {
        assert_eq!(classify("mailto:x@example.com"), UrlKind::OtherScheme);
        assert_eq!(classify("ftp://example.com/file"), UrlKind::OtherScheme);
        assert!(!is_valid_link("mailto:x@example.com"));
    }

    #[test]
    fn test_hostless_http_rejected() {
        assert_eq!(classify("http://"), UrlKind::Rejected);
        assert_eq!(classify("https:///path"), UrlKind::Rejected);
        assert_eq!(classify("http:example.com"), UrlKind::Rejected);
    }
}
