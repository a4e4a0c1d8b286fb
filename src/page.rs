//! Result types for page resolution output.
//!
//! This module defines the page list produced by resolution along with the
//! intermediate candidate type passed between decoder and pipeline.

use serde::{Deserialize, Serialize};

use crate::patterns::TOKEN_FRAGMENT;

/// One resolved chapter page.
///
/// Within one resolved chapter, `index` values form a contiguous 0-based
/// sequence matching list order, and `image_url` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 0-based position of this page within the chapter.
    pub index: usize,

    /// URL of the chapter document this page was resolved from.
    pub chapter_url: String,

    /// Full-resolution image URL. May carry a trailing `#token=...` fragment
    /// when the site requires a per-image security token.
    pub image_url: String,
}

impl Page {
    /// Creates a page at the given index.
    #[must_use]
    pub fn new(index: usize, chapter_url: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            index,
            chapter_url: chapter_url.into(),
            image_url: image_url.into(),
        }
    }

    /// Returns the security token carried on the image URL, if any.
    ///
    /// Tokens travel as a `#token=...` fragment so they survive
    /// normalization and deduplication; the site expects them back as an
    /// `X-Security-Token` style credential when the image is fetched.
    #[must_use]
    pub fn security_token(&self) -> Option<&str> {
        self.image_url
            .split_once(TOKEN_FRAGMENT)
            .map(|(_, token)| token)
    }

    /// Returns the image URL ready for fetching: the URL with any token
    /// fragment stripped, plus the token to present separately.
    #[must_use]
    pub fn fetch_url(&self) -> (&str, Option<&str>) {
        match self.image_url.split_once(TOKEN_FRAGMENT) {
            Some((clean, token)) => (clean, Some(token)),
            None => (self.image_url.as_str(), None),
        }
    }
}

/// Result of resolving one chapter document.
#[derive(Debug, Clone, Default)]
pub struct ChapterPages {
    /// Ordered page list. Empty when nothing could be resolved; an empty
    /// chapter is a result, not an error.
    pub pages: Vec<Page>,

    /// Non-fatal issues encountered during resolution, such as page-break
    /// blocks no strategy could decode or delegation to the structural
    /// fallback scraper.
    pub warnings: Vec<String>,
}

/// Decoding strategy that produced a candidate URL.
///
/// Ordered from most to least trusted; the cascade tries them in this order
/// and stops at the first success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMethod {
    /// Base64 attribute plus security-token attribute on the image element.
    TokenAttr,
    /// Hex string reassembled from name-sorted script variables.
    HexVars,
    /// Two fixed-name Base64 halves concatenated.
    SplitPair,
    /// Base64 segment array; lowest trust, may carry decoys.
    Segments,
    /// Plain `<img>` attribute, no decoding involved.
    DirectImg,
}

impl DecodeMethod {
    /// Short tag used in log output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TokenAttr => "token-attr",
            Self::HexVars => "hex",
            Self::SplitPair => "u1u2",
            Self::Segments => "segments",
            Self::DirectImg => "direct-img",
        }
    }
}

/// A decoded image URL plus the strategy that produced it.
///
/// Intermediate only: lives within one block's resolution and is never part
/// of the final output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The recovered URL (possibly carrying a `#token=` fragment).
    pub url: String,
    /// Which strategy recovered it.
    pub method: DecodeMethod,
}

impl Candidate {
    pub(crate) fn new(url: impl Into<String>, method: DecodeMethod) -> Self {
        Self {
            url: url.into(),
            method,
        }
    }
}
