//! URL normalization, quality scoring, and token handling.
//!
//! Different representations of the same image (http vs https, resized
//! thumbnail vs original, with or without a cache-buster query) must compare
//! equal during deduplication. `normalize_image_url` produces the canonical
//! key; `score_url` ranks representations so the best one survives.

use url::Url;

use crate::garbage;
use crate::patterns::{LOW_QUALITY_MARKERS, SIZE_SUFFIX, TOKEN_FRAGMENT, UPLOADS_MARKER};

/// Normalize an image URL into a deduplication key.
///
/// Steps, in order: reject garbage URLs (empty key means "drop"); split off
/// and remember a `#token=` suffix; strip query string and any other
/// fragment; trim trailing slashes; force the scheme to https; strip a
/// `-WxH`/`_WxH` resize suffix before the extension; reattach the token.
///
/// Normalization is idempotent: feeding the output back in returns it
/// unchanged.
#[must_use]
pub fn normalize_image_url(url: &str) -> String {
    if garbage::is_garbage_url(url) {
        log::debug!("dropping garbage url during normalization: {url}");
        return String::new();
    }

    let (bare, token) = split_token(url);

    let mut normalized = bare
        .split('#')
        .next()
        .unwrap_or(bare)
        .split('?')
        .next()
        .unwrap_or(bare)
        .trim_end_matches('/')
        .to_string();

    if let Some(rest) = normalized.strip_prefix("http://") {
        normalized = format!("https://{rest}");
    }

    normalized = SIZE_SUFFIX.replace(&normalized, "$1").into_owned();

    match token {
        Some(token) => format!("{normalized}{TOKEN_FRAGMENT}{token}"),
        None => normalized,
    }
}

/// Quality score for one image URL.
///
/// Used only to compare two URLs that normalize to the same key. Additive:
/// `+2` https, `+3` canonical uploads directory, `-5` data URI, `-10` any
/// known low-quality marker, `+len/50` as a mild tie-break favoring longer
/// descriptive URLs.
#[must_use]
pub fn score_url(url: &str) -> i32 {
    let mut score = 0;

    if url.starts_with("https://") {
        score += 2;
    }
    if url.contains(UPLOADS_MARKER) {
        score += 3;
    }
    if url.contains("data:image") {
        score -= 5;
    }

    let lower = url.to_lowercase();
    if LOW_QUALITY_MARKERS.iter().any(|m| lower.contains(m)) {
        score -= 10;
    }

    score += i32::try_from(url.len() / 50).unwrap_or(i32::MAX);

    score
}

/// Whether `candidate` should replace `current` for the same normalized key.
///
/// Ties keep the first-seen URL.
#[must_use]
pub fn is_better_image(candidate: &str, current: Option<&str>) -> bool {
    match current {
        None => true,
        Some(current) if current.is_empty() => true,
        Some(current) => score_url(candidate) > score_url(current),
    }
}

/// Split a URL into its bare form and an optional security token.
#[must_use]
pub fn split_token(url: &str) -> (&str, Option<&str>) {
    match url.split_once(TOKEN_FRAGMENT) {
        Some((bare, token)) => (bare, Some(token)),
        None => (url, None),
    }
}

/// Filename portion of a URL path, with query and fragment stripped.
#[must_use]
pub fn extract_filename(url: &str) -> &str {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let without_query = without_fragment.split('?').next().unwrap_or(without_fragment);
    without_query.rsplit('/').next().unwrap_or("")
}

/// Whether the string is an absolute HTTP(S) URL.
#[must_use]
pub fn is_absolute_http(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Resolve a possibly-relative URL against a base, keeping only absolute
/// HTTP(S) results.
#[must_use]
pub fn resolve_against(base: &Url, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if is_absolute_http(raw) {
        return Some(raw.to_string());
    }
    // Protocol-relative and path-relative inputs resolve against the chapter
    // URL; anything else (data:, blob:, javascript:) is not a page image.
    if raw.starts_with("data:") || raw.starts_with("blob:") || raw.starts_with("javascript:") {
        return None;
    }
    match base.join(raw) {
        Ok(resolved) if resolved.scheme() == "http" || resolved.scheme() == "https" => {
            Some(resolved.to_string())
        }
        _ => None,
    }
}
