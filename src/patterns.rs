//! Compiled regex patterns, marker tables, and default CSS selectors.
//!
//! All patterns are compiled once at startup using `LazyLock`. They are
//! organized by the pipeline stage that consumes them: script deobfuscation,
//! URL normalization, and garbage detection.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Script Deobfuscation Patterns
// =============================================================================

/// Matches hex-variable declarations like `var h1a = "68";`.
///
/// The site spreads one URL across many such variables, each holding a run of
/// hex digit pairs. Capture 1 is the variable name (used for ordering),
/// capture 2 the hex payload.
pub static HEX_VARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"var\s+(h\d+[a-z])\s*=\s*['"]([^'"]+)['"]"#).expect("HEX_VARS regex")
});

/// Matches the first half of a split Base64 URL: `var u1 = "...";`.
pub static SPLIT_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"var\s+u1\s*=\s*['"]([^'"]+)['"]"#).expect("SPLIT_FIRST regex")
});

/// Matches the second half of a split Base64 URL: `var u2 = "...";`.
pub static SPLIT_SECOND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"var\s+u2\s*=\s*['"]([^'"]+)['"]"#).expect("SPLIT_SECOND regex")
});

/// Matches the bracketed segment array: `imageSegments = [ ... ]`.
///
/// Known to carry decoy content on some chapters, so the segment strategy is
/// last in the cascade and its output still passes the garbage filter.
pub static IMAGE_SEGMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"imageSegments\s*=\s*\[([\s\S]*?)\]").expect("IMAGE_SEGMENTS regex")
});

/// Matches one quoted string inside the segment array body.
pub static SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"]([^'"]+)['"]"#).expect("SEGMENT regex"));

// =============================================================================
// URL Normalization Patterns
// =============================================================================

/// Matches image-resizing suffixes like `-150x150` or `_200x300` immediately
/// before the file extension, e.g. `page-150x150.jpg` -> `page.jpg`.
pub static SIZE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-_]\d{1,4}x\d{1,4}(\.[a-zA-Z]{2,4})$").expect("SIZE_SUFFIX regex")
});

// =============================================================================
// Garbage Detection Patterns
// =============================================================================

/// Matches terse cryptic filenames (1-4 lowercase letters + image extension)
/// at the end of a path, e.g. `asd.png` or `ab.jpg`. The sabotage images use
/// short throwaway names; legitimate pages carry longer descriptive ones.
pub static SHORT_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r".*/[a-z]{1,4}\.(png|jpg|jpeg|gif|webp)$").expect("SHORT_FILENAME regex")
});

/// Substrings that mark a URL as known sabotage or placeholder content.
pub const GARBAGE_MARKERS: &[&str] = &[
    "asd.png",
    "/asd.",
    "asd-",
    "blob:",
    "1x1.",
    "placeholder",
    "loading.gif",
    "spacer.",
];

/// Substrings that mark a URL as low quality for scoring purposes.
pub const LOW_QUALITY_MARKERS: &[&str] =
    &["placeholder", "loading", "fake", "decoy", "trap", "blob:", "asd"];

/// Path marker for the canonical uploads directory where real pages live.
pub const UPLOADS_MARKER: &str = "/wp-content/uploads/";

/// Directory marker used when comparing page folders in the trailing-page
/// heuristic (the segment after this marker identifies the chapter folder).
pub const UPLOADS_SEGMENT: &str = "uploads/";

// =============================================================================
// Element Attributes and Default Selectors
// =============================================================================

/// Attribute carrying the Base64-obfuscated image URL.
pub const OBFUSCATED_ATTR: &str = "data-obfuscated";

/// Attribute carrying the per-image security token.
pub const TOKEN_ATTR: &str = "data-token";

/// Fragment marker used to carry a security token on a decoded URL.
pub const TOKEN_FRAGMENT: &str = "#token=";

/// Lazy-load attributes checked, in order, before falling back to `src`.
pub const LAZY_ATTRS: &[&str] = &["data-src", "data-lazy-src", "data-srcset", "srcset"];

/// Default selector for per-page container blocks.
pub const PAGE_BREAK_SELECTOR: &str = "div.page-break, li.blocks-gallery-item";

/// Default selector for the main reading container scanned when no
/// page-break block yields an image.
pub const READING_CONTENT_SELECTOR: &str = "div.reading-content";

/// Default selector for the chapter-protector marker element.
pub const CHAPTER_PROTECTOR_SELECTOR: &str = "#chapter-protector-data";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_vars_captures_name_and_payload() {
        let script = r#"var h1a = "68"; var h1b = "74";"#;
        let caps: Vec<_> = HEX_VARS
            .captures_iter(script)
            .map(|c| (c[1].to_string(), c[2].to_string()))
            .collect();
        assert_eq!(
            caps,
            vec![
                ("h1a".to_string(), "68".to_string()),
                ("h1b".to_string(), "74".to_string())
            ]
        );
    }

    #[test]
    fn size_suffix_strips_resize_markers() {
        assert_eq!(
            SIZE_SUFFIX.replace("https://x/a-150x150.jpg", "$1"),
            "https://x/a.jpg"
        );
        assert_eq!(
            SIZE_SUFFIX.replace("https://x/a_1024x768.webp", "$1"),
            "https://x/a.webp"
        );
        // No suffix: unchanged
        assert_eq!(SIZE_SUFFIX.replace("https://x/a.jpg", "$1"), "https://x/a.jpg");
    }

    #[test]
    fn short_filename_matches_cryptic_names() {
        assert!(SHORT_FILENAME.is_match("https://x/files/asd.png"));
        assert!(SHORT_FILENAME.is_match("https://x/ab.jpg"));
        assert!(!SHORT_FILENAME.is_match("https://x/chapter-12-page-03.jpg"));
        assert!(!SHORT_FILENAME.is_match("https://x/asdfg.png"));
    }

    #[test]
    fn image_segments_captures_array_body() {
        let script = r#"imageSegments = ["aGVsbG8=", "d29ybGQ="];"#;
        let caps = IMAGE_SEGMENTS.captures(script);
        assert!(caps.is_some());
    }
}
