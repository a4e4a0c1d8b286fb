//! Configuration options for page resolution.
//!
//! The `Options` struct carries the site-specific CSS selectors and the
//! heuristic toggles. Defaults match the reference site; sister sites of the
//! same family usually only need a selector swap.

use crate::patterns::{CHAPTER_PROTECTOR_SELECTOR, PAGE_BREAK_SELECTOR, READING_CONTENT_SELECTOR};

/// Configuration options for page resolution.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_mangapages::Options;
///
/// let options = Options {
///     drop_suspicious_last_page: false,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Selector for per-page container blocks, matched in document order.
    ///
    /// Default: `div.page-break, li.blocks-gallery-item`
    pub page_break_selector: String,

    /// Selector for the main reading container, scanned for stray `<img>`
    /// elements only when no page-break block yields an image.
    ///
    /// Default: `div.reading-content`
    pub reading_content_selector: String,

    /// Selector for the chapter-protector marker. When present in the
    /// document the obfuscation cascade is skipped entirely and the
    /// structural fallback scraper is used instead.
    ///
    /// Default: `#chapter-protector-data`
    pub chapter_protector_selector: String,

    /// Apply the trailing-page heuristic that drops a last page with a terse
    /// filename or an unfamiliar directory.
    ///
    /// The heuristic is approximate and can misfire on a legitimately
    /// short-named final page; disable it for sites without trailing
    /// sabotage images.
    ///
    /// Default: `true`
    pub drop_suspicious_last_page: bool,

    /// Run the structural fallback scraper when the page-break walk and the
    /// direct-image scan both come up empty.
    ///
    /// Default: `true`
    pub use_structural_fallback: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            page_break_selector: PAGE_BREAK_SELECTOR.to_string(),
            reading_content_selector: READING_CONTENT_SELECTOR.to_string(),
            chapter_protector_selector: CHAPTER_PROTECTOR_SELECTOR.to_string(),
            drop_suspicious_last_page: true,
            use_structural_fallback: true,
        }
    }
}
