//! Cascading deobfuscation of image URLs.
//!
//! The host site hides each page's image URL behind one of several encoding
//! schemes inside the page-break block: a Base64 attribute paired with a
//! security token, hex payloads spread over many script variables, a URL
//! split into two Base64 halves, or a Base64 segment array. Each scheme gets
//! one pure decoding function; `decode_script` folds over them in trust
//! order and stops at the first success.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine;

use crate::page::{Candidate, DecodeMethod};
use crate::patterns::{HEX_VARS, IMAGE_SEGMENTS, SEGMENT, SPLIT_FIRST, SPLIT_SECOND, TOKEN_FRAGMENT};

/// Decode a Base64 string into UTF-8, tolerating missing padding.
#[must_use]
pub fn decode_base64(encoded: &str) -> Option<String> {
    let encoded = encoded.trim();
    let bytes = STANDARD
        .decode(encoded)
        .or_else(|_| STANDARD_NO_PAD.decode(encoded.trim_end_matches('=')))
        .ok()?;
    String::from_utf8(bytes).ok()
}

/// Strategy 1: Base64 URL attribute plus a separate security-token attribute.
///
/// The decoded URL gets the token appended as a `#token=` fragment so it
/// travels through normalization and deduplication and can be presented when
/// the image is fetched.
#[must_use]
pub fn decode_token_attr(obfuscated: &str, token: &str) -> Option<Candidate> {
    if obfuscated.is_empty() || token.is_empty() {
        return None;
    }

    let decoded = decode_base64(obfuscated)?;
    if decoded.is_empty() {
        return None;
    }

    Some(Candidate::new(
        format!("{decoded}{TOKEN_FRAGMENT}{token}"),
        DecodeMethod::TokenAttr,
    ))
}

/// Strategy 2: hex payloads spread across script variables.
///
/// Variables follow a digit+letter suffix pattern (`h1a`, `h2b`, ...), each
/// holding a run of hex digit pairs. Byte order is defined by sorting the
/// variable names lexicographically, not by source order. Every 2-digit
/// group decodes to one character code. The result is accepted only when it
/// starts with an HTTP(S) scheme; the site reserves this scheme for genuine
/// images, so the gate costs nothing and rejects mangled reconstructions.
#[must_use]
pub fn decode_hex_vars(script: &str) -> Option<String> {
    let mut vars: Vec<(String, String)> = HEX_VARS
        .captures_iter(script)
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect();
    if vars.is_empty() {
        return None;
    }

    vars.sort_by(|a, b| a.0.cmp(&b.0));

    let hex: String = vars.into_iter().map(|(_, payload)| payload).collect();
    if hex.len() % 2 != 0 {
        log::debug!("odd-length hex payload, treating as decode failure");
        return None;
    }

    let mut decoded = String::with_capacity(hex.len() / 2);
    let hex_bytes = hex.as_bytes();
    for pair in hex_bytes.chunks(2) {
        let group = std::str::from_utf8(pair).ok()?;
        let code = u8::from_str_radix(group, 16).ok()?;
        decoded.push(char::from(code));
    }

    if decoded.starts_with("http") {
        Some(decoded)
    } else {
        log::debug!("hex decode produced non-http output, rejecting");
        None
    }
}

/// Strategy 3: URL split into two fixed-name Base64 halves (`u1`, `u2`).
///
/// Both halves must be present and valid; they concatenate in fixed order.
#[must_use]
pub fn decode_split_pair(script: &str) -> Option<String> {
    let first = SPLIT_FIRST.captures(script)?;
    let second = SPLIT_SECOND.captures(script)?;

    let first = decode_base64(&first[1])?;
    let second = decode_base64(&second[1])?;
    Some(format!("{first}{second}"))
}

/// Strategy 4: bracketed array of Base64 segments.
///
/// Lowest trust: the site sometimes fills this array with decoy content, so
/// no scheme gate is applied here (decoys may legitimately look like partial
/// paths) and the output still passes the garbage filter downstream.
/// Individually malformed segments decode to nothing rather than failing
/// the whole array.
#[must_use]
pub fn decode_segments(script: &str) -> Option<String> {
    let body = IMAGE_SEGMENTS.captures(script)?;

    let segments: Vec<String> = SEGMENT
        .captures_iter(&body[1])
        .map(|c| c[1].to_string())
        .collect();
    if segments.is_empty() {
        return None;
    }

    let joined: String = segments
        .iter()
        .map(|segment| decode_base64(segment).unwrap_or_default())
        .collect();

    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// Run the script-based strategies in trust order, first success wins.
///
/// Order: hex variables, split pair, segment array. The token-attribute
/// strategy operates on element attributes rather than script text and is
/// handled by the pipeline before any script is inspected.
#[must_use]
pub fn decode_script(script: &str) -> Option<Candidate> {
    type Strategy = (DecodeMethod, fn(&str) -> Option<String>);
    const STRATEGIES: &[Strategy] = &[
        (DecodeMethod::HexVars, decode_hex_vars),
        (DecodeMethod::SplitPair, decode_split_pair),
        (DecodeMethod::Segments, decode_segments),
    ];

    STRATEGIES.iter().find_map(|(method, strategy)| {
        strategy(script).map(|url| Candidate::new(url, *method))
    })
}
