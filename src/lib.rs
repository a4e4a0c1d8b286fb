//! # rs-mangapages
//!
//! Chapter page-list extraction for manga reader pages that deliberately
//! obfuscate and sabotage scraping.
//!
//! The host site hides each page's image URL behind Base64 blobs, hex-encoded
//! variable soups, split variable pairs, and security tokens, and plants
//! decoy images meant to corrupt naive extraction. This library takes the
//! chapter HTML plus its URL and recovers the ordered list of full-resolution
//! page images: a cascading decoder per page-break block, URL normalization
//! and quality scoring for deduplication, and a garbage filter that removes
//! known sabotage patterns and a suspicious trailing page.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_mangapages::resolve;
//!
//! let html = r#"<html><body><div class="reading-content">
//!   <div class="page-break"><script>
//!     var h1a = "68747470733a2f2f782f75706c6f6164732f70312e6a7067";
//!   </script></div>
//! </div></body></html>"#;
//!
//! let chapter = resolve(html, "https://example.com/manga/title/chapter-1/")?;
//! assert_eq!(chapter.pages.len(), 1);
//! assert_eq!(chapter.pages[0].image_url, "https://x/uploads/p1.jpg");
//! # Ok::<(), rs_mangapages::Error>(())
//! ```
//!
//! ## Design
//!
//! - **Decoder cascade**: independent pure strategies tried in trust order,
//!   first success wins per block.
//! - **Normalize & score**: different representations of the same image
//!   compare equal; the highest-scoring representation survives.
//! - **Garbage filter**: known sabotage patterns plus a trailing-page
//!   heuristic comparing the last page against the chapter's directory
//!   pattern.
//! - **Soft failures**: an undecodable block is a gap, not an error; an
//!   empty chapter is an empty result, not an exception.

mod error;
mod options;
mod page;
mod patterns;
mod pipeline;

/// Cascading deobfuscation strategies for script and attribute payloads.
pub mod decoder;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Generic structural page scraper used for protected chapters and as the
/// fallback of last resort.
pub mod fallback;

/// Sabotage/decoy detection and page-list filtering.
pub mod garbage;

/// URL normalization, scoring, and token handling.
pub mod url_utils;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::Options;
pub use page::{Candidate, ChapterPages, DecodeMethod, Page};

/// Resolves the ordered page list for a chapter document using default options.
///
/// # Arguments
///
/// * `html` - The chapter document as a string slice
/// * `chapter_url` - The document's canonical URL; recorded on every page
///   and used to resolve relative image paths
///
/// # Returns
///
/// Returns `Ok(ChapterPages)` with the ordered, deduplicated, reindexed page
/// list. An empty list means nothing could be resolved; that is a result,
/// not an error. The only error is an unparseable chapter URL.
#[allow(clippy::missing_errors_doc)]
pub fn resolve(html: &str, chapter_url: &str) -> Result<ChapterPages> {
    resolve_with_options(html, chapter_url, &Options::default())
}

/// Resolves the ordered page list for a chapter document with custom options.
///
/// # Example
///
/// ```rust
/// use rs_mangapages::{resolve_with_options, Options};
///
/// let options = Options {
///     drop_suspicious_last_page: false,
///     ..Options::default()
/// };
/// let chapter = resolve_with_options(
///     "<html><body></body></html>",
///     "https://example.com/manga/title/chapter-1/",
///     &options,
/// )?;
/// assert!(chapter.pages.is_empty());
/// # Ok::<(), rs_mangapages::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn resolve_with_options(
    html: &str,
    chapter_url: &str,
    options: &Options,
) -> Result<ChapterPages> {
    pipeline::resolve_document(html, chapter_url, options)
}

/// Resolves a chapter from raw HTML bytes with automatic encoding detection.
///
/// Detects the charset from meta tags and transcodes to UTF-8 before
/// resolution. Invalid characters are replaced rather than treated as
/// errors.
///
/// # Example
///
/// ```rust
/// use rs_mangapages::resolve_bytes;
///
/// let html = b"<html><body><div class=\"page-break\">\
///     <img src=\"https://x/wp-content/uploads/c1/page-001.jpg\">\
///     </div></body></html>";
/// let chapter = resolve_bytes(html, "https://example.com/manga/title/chapter-1/")?;
/// assert_eq!(chapter.pages.len(), 1);
/// # Ok::<(), rs_mangapages::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn resolve_bytes(html: &[u8], chapter_url: &str) -> Result<ChapterPages> {
    pipeline::resolve_document_bytes(html, chapter_url, &Options::default())
}

/// Resolves a chapter from raw HTML bytes with custom options.
#[allow(clippy::missing_errors_doc)]
pub fn resolve_bytes_with_options(
    html: &[u8],
    chapter_url: &str,
    options: &Options,
) -> Result<ChapterPages> {
    pipeline::resolve_document_bytes(html, chapter_url, options)
}
