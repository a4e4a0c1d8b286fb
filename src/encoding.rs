//! Character encoding detection and transcoding.
//!
//! Reader pages from older mirrors still ship in legacy encodings. The byte
//! entry points detect the charset from the document's meta tags and
//! transcode to UTF-8 before resolution; invalid sequences become the
//! Unicode replacement character rather than errors.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// Match `<meta charset="...">`.
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>]+)"#).expect("META_CHARSET regex")
});

/// Detect the character encoding declared in the first 1024 bytes.
///
/// Falls back to UTF-8, the web default, when no declaration is found or the
/// label is unknown.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = &html[..html.len().min(1024)];
    let head_str = String::from_utf8_lossy(head);

    META_CHARSET
        .captures(&head_str)
        .and_then(|c| c.get(1))
        .and_then(|label| Encoding::for_label(label.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Transcode HTML bytes to a UTF-8 string, lossily.
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);

    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }

    let (decoded, _, _) = encoding.decode(html);
    decoded.into_owned()
}
