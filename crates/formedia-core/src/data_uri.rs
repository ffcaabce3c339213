//! Data-URI grammar
//!
//! Pure string functions for the embedded-media representation: `encode`
//! produces the `data:<type>;base64,<payload>` form a browser `FileReader`
//! emits, and `sniff_media_type` extracts the declared mediatype from a URI
//! header. Neither touches the DOM or any I/O, so both are unit-testable in
//! isolation.

use std::sync::LazyLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::Regex;

/// Mediatype header grammar: `data:` prefix, then an optional
/// `<word>/<subtype>` where the subtype excludes literal `;` characters.
/// The capture is everything between `data:` and the first `;` (or the
/// whole remainder when no `;` is present).
static MEDIATYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:((?:\w+/[^;]+)?)").expect("mediatype pattern is valid")
});

/// Encode raw bytes as a base64 data URI with the given content type.
pub fn encode(content_type: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(data))
}

/// Extract the declared mediatype from a data URI header.
///
/// Returns `None` when the string is not a data URI or when the mediatype
/// segment is empty (e.g. `data:;base64,...`). Callers leave their
/// mimetype/subtype fields untouched in that case.
pub fn sniff_media_type(uri: &str) -> Option<&str> {
    let captures = MEDIATYPE_RE.captures(uri)?;
    let mediatype = captures.get(1)?.as_str();
    if mediatype.is_empty() {
        None
    } else {
        Some(mediatype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_browser_shaped_data_uri() {
        let uri = encode("image/png", b"png-bytes");
        assert!(uri.starts_with("data:image/png;base64,"));
        let payload = uri.strip_prefix("data:image/png;base64,").unwrap();
        assert_eq!(STANDARD.decode(payload).unwrap(), b"png-bytes");
    }

    #[test]
    fn sniffs_mediatype_up_to_first_semicolon() {
        let uri = encode("image/png", b"x");
        assert_eq!(sniff_media_type(&uri), Some("image/png"));
        assert_eq!(
            sniff_media_type("data:video/mp4;base64,AAAA"),
            Some("video/mp4")
        );
        assert_eq!(
            sniff_media_type("data:image/svg+xml;base64,PHN2Zz4="),
            Some("image/svg+xml")
        );
    }

    #[test]
    fn round_trip_preserves_reported_content_type() {
        for mime in ["image/png", "video/x-m4v", "audio/mpeg", "application/pdf"] {
            let uri = encode(mime, b"payload");
            assert_eq!(sniff_media_type(&uri), Some(mime));
        }
    }

    #[test]
    fn empty_or_missing_mediatype_is_none() {
        assert_eq!(sniff_media_type("data:;base64,AAAA"), None);
        assert_eq!(sniff_media_type("data:,plain"), None);
        assert_eq!(sniff_media_type("http://example.com/a.png"), None);
        assert_eq!(sniff_media_type(""), None);
    }

    #[test]
    fn non_base64_uri_captures_through_to_payload() {
        // With no `;` in the URI the greedy capture runs to the end of the
        // string, matching the original grammar exactly.
        assert_eq!(
            sniff_media_type("data:text/plain,hello"),
            Some("text/plain,hello")
        );
    }
}
