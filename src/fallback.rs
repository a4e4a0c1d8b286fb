//! Generic structural page scraper.
//!
//! Sites of this family share a structural convention even when obfuscation
//! is absent: one container per page with an `<img>` carrying the real URL
//! in `src` or one of the usual lazy-load attributes. This scraper is the
//! collaborator of last resort - used wholesale for protector-guarded
//! chapters (which skip obfuscation) and as the final fallback when the
//! decoder pipeline produces nothing. Its output always goes through the
//! garbage filter afterwards.

use std::collections::HashSet;

use url::Url;

use crate::dom::{self, Document, Selection};
use crate::options::Options;
use crate::page::Page;
use crate::patterns::LAZY_ATTRS;
use crate::url_utils::resolve_against;

/// Scrape pages by structure alone, without any deobfuscation.
///
/// Walks the configured page containers in document order and takes the
/// first usable image per container; when the document has no containers at
/// all, scans the reading content directly. Exact duplicate URLs are
/// skipped; no scoring or normalization happens here.
#[must_use]
pub fn scrape_pages(doc: &Document, base: &Url, chapter_url: &str, options: &Options) -> Vec<Page> {
    let mut pages: Vec<Page> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    let blocks = doc.select(&options.page_break_selector);
    let block_nodes = blocks.nodes();

    if block_nodes.is_empty() {
        log::debug!("structural fallback: no page containers, scanning reading content");
        let scope = format!("{} img", options.reading_content_selector);
        for node in doc.select(&scope).nodes() {
            let img = Selection::from(*node);
            push_image(&img, base, chapter_url, &mut pages, &mut seen);
        }
        return pages;
    }

    for node in block_nodes {
        let block = Selection::from(*node);
        if let Some(img) = dom::select_first(&block, "img") {
            push_image(&img, base, chapter_url, &mut pages, &mut seen);
        }
    }

    log::debug!("structural fallback found {} pages", pages.len());
    pages
}

fn push_image(
    img: &Selection,
    base: &Url,
    chapter_url: &str,
    pages: &mut Vec<Page>,
    seen: &mut HashSet<String>,
) {
    let Some(url) = image_url_from_element(img, base) else {
        return;
    };
    if seen.insert(url.clone()) {
        pages.push(Page::new(pages.len(), chapter_url, url));
    }
}

/// Best image URL carried by an `<img>` element.
///
/// Lazy-load attributes win over `src` because themes routinely point `src`
/// at a placeholder while the real image sits in `data-src`. `srcset`-style
/// values contribute only their first candidate URL.
#[must_use]
pub fn image_url_from_element(img: &Selection, base: &Url) -> Option<String> {
    for attr in LAZY_ATTRS {
        if let Some(value) = dom::get_trimmed_attribute(img, attr) {
            let raw = first_srcset_candidate(&value);
            if let Some(resolved) = resolve_against(base, raw) {
                return Some(resolved);
            }
        }
    }

    let src = dom::get_trimmed_attribute(img, "src")?;
    resolve_against(base, &src)
}

/// First URL of a srcset-style value (`url 1x, url2 2x` -> `url`).
fn first_srcset_candidate(value: &str) -> &str {
    value
        .split(',')
        .next()
        .unwrap_or(value)
        .split_whitespace()
        .next()
        .unwrap_or(value)
}
