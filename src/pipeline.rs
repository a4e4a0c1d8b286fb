//! Page assembly pipeline.
//!
//! Walks a chapter document's page-break blocks in order, runs the decoder
//! cascade on each, normalizes and deduplicates the recovered URLs, falls
//! back to a direct image scan and finally to the structural scraper, and
//! filters the accumulated list before handing it back.
//!
//! One block resolves independently of the others: the only cross-block
//! state is the accumulator below (running page list plus seen-key map),
//! threaded explicitly through the walk.

use std::collections::HashMap;

use url::Url;

use crate::dom::{self, Document, Selection};
use crate::error::{Error, Result};
use crate::fallback;
use crate::garbage;
use crate::options::Options;
use crate::page::{Candidate, ChapterPages, DecodeMethod, Page};
use crate::patterns::{OBFUSCATED_ATTR, TOKEN_ATTR};
use crate::url_utils::{is_better_image, normalize_image_url, split_token};
use crate::{decoder, encoding};

/// Resolve the ordered page list for one chapter document.
pub(crate) fn resolve_document(
    html: &str,
    chapter_url: &str,
    options: &Options,
) -> Result<ChapterPages> {
    let base = Url::parse(chapter_url).map_err(|source| Error::InvalidChapterUrl {
        url: chapter_url.to_string(),
        source,
    })?;

    let doc = Document::from(html);
    let mut state = Accumulator::new(chapter_url);

    // Protector-guarded chapters carry no obfuscation; the structural
    // scraper is authoritative for them. Sabotage images are still possible,
    // so the garbage filter runs regardless.
    if dom::select_first_in_doc(&doc, &options.chapter_protector_selector).is_some() {
        log::debug!("chapter protector detected, delegating to structural scraper");
        state
            .warnings
            .push("chapter protector present; used structural scraper".to_string());
        let pages = fallback::scrape_pages(&doc, &base, chapter_url, options);
        return Ok(state.finish(pages, options));
    }

    let blocks = doc.select(&options.page_break_selector);
    let block_nodes = blocks.nodes();
    log::debug!("found {} page-break blocks", block_nodes.len());

    for (block_index, node) in block_nodes.iter().enumerate() {
        let block = Selection::from(*node);
        match resolve_block(&block, &base) {
            Some(candidate) => {
                log::debug!(
                    "block {block_index}: {} via {}",
                    candidate.url,
                    candidate.method.as_str()
                );
                state.offer(block_index, &candidate.url);
            }
            None => {
                log::warn!("block {block_index}: no strategy recovered an image");
                state
                    .warnings
                    .push(format!("page-break block {block_index} yielded no image"));
            }
        }
    }

    // Some chapters place images straight in the reading container without
    // page-break wrappers. Scanned only when the block walk produced
    // nothing, so stray decorations cannot pollute a normally-built chapter.
    if state.pages.is_empty() {
        scan_direct_images(&doc, &base, options, &mut state);
    }

    let pages = std::mem::take(&mut state.pages);
    let filtered = garbage::filter_garbage_with(pages, options.drop_suspicious_last_page);

    if filtered.is_empty() && options.use_structural_fallback {
        log::warn!("no pages resolved, delegating to structural scraper");
        state
            .warnings
            .push("no pages resolved from page-break blocks; used structural scraper".to_string());
        let scraped = fallback::scrape_pages(&doc, &base, chapter_url, options);
        return Ok(state.finish(scraped, options));
    }

    Ok(ChapterPages {
        pages: filtered,
        warnings: state.warnings,
    })
}

/// Byte-input variant: transcode to UTF-8 first.
pub(crate) fn resolve_document_bytes(
    html: &[u8],
    chapter_url: &str,
    options: &Options,
) -> Result<ChapterPages> {
    let html_str = encoding::transcode_to_utf8(html);
    resolve_document(&html_str, chapter_url, options)
}

/// Resolve one page-break block to a candidate URL, or nothing.
///
/// Strategies run in fixed priority order with first-success short-circuit:
/// token-attached attribute, then the script cascade (hex variables, split
/// pair, segment array), then a plain `<img>` read. A block that resolves to
/// nothing is a gap, not an error.
fn resolve_block(block: &Selection, base: &Url) -> Option<Candidate> {
    if let Some(img) = dom::select_first(block, &format!("img[{OBFUSCATED_ATTR}]")) {
        let obfuscated = dom::get_attribute(&img, OBFUSCATED_ATTR).unwrap_or_default();
        let token = dom::get_attribute(&img, TOKEN_ATTR).unwrap_or_default();
        if let Some(candidate) = decoder::decode_token_attr(&obfuscated, &token) {
            return Some(candidate);
        }
    }

    let scripts = block.select("script");
    for node in scripts.nodes() {
        let script = Selection::from(*node);
        let text = dom::text_content(&script);
        if let Some(candidate) = decoder::decode_script(&text) {
            return Some(candidate);
        }
    }

    let img = dom::select_first(block, "img[src]")?;
    fallback::image_url_from_element(&img, base)
        .map(|url| Candidate::new(url, DecodeMethod::DirectImg))
}

/// Scan the reading container for images outside any page-break wrapper.
fn scan_direct_images(doc: &Document, base: &Url, options: &Options, state: &mut Accumulator) {
    let Some(container) = dom::select_first_in_doc(doc, &options.reading_content_selector) else {
        return;
    };

    let images = container.select("img");
    for (image_index, node) in images.nodes().iter().enumerate() {
        let img = Selection::from(*node);

        // Images inside a page-break were already handled by the block walk
        if dom::has_ancestor_with_class(&img, "page-break")
            || dom::has_ancestor_with_class(&img, "no-gaps")
        {
            continue;
        }

        if is_preloader(&img) {
            log::debug!("direct image {image_index}: skipping preloader/placeholder");
            continue;
        }

        if let Some(url) = fallback::image_url_from_element(&img, base) {
            log::debug!("direct image {image_index}: {url}");
            state.offer(image_index, &url);
        }
    }
}

/// Whether an image element is named like a preloader or placeholder.
fn is_preloader(img: &Selection) -> bool {
    let class = dom::class_name(img).unwrap_or_default().to_lowercase();
    if class.contains("preloader") || class.contains("placeholder") {
        return true;
    }
    let id = dom::id(img).unwrap_or_default().to_lowercase();
    id.contains("preload")
}

/// Running resolution state: the page list under construction plus the map
/// from normalized URL key to the index holding it.
struct Accumulator<'a> {
    chapter_url: &'a str,
    pages: Vec<Page>,
    seen: HashMap<String, usize>,
    warnings: Vec<String>,
}

impl<'a> Accumulator<'a> {
    fn new(chapter_url: &'a str) -> Self {
        Self {
            chapter_url,
            pages: Vec::new(),
            seen: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    /// Accept, replace, or reject one recovered URL.
    ///
    /// A new normalized key appends a page at the next index. A key already
    /// seen keeps its index; the stored URL is swapped in place when the
    /// newcomer scores strictly higher.
    fn offer(&mut self, origin_index: usize, raw_url: &str) {
        let normalized = normalize_image_url(raw_url);
        if normalized.is_empty() {
            log::debug!("origin {origin_index}: dropping invalid/garbage url: {raw_url}");
            return;
        }
        // The token is a fetch credential, not part of the image's identity:
        // a token-attached URL and its bare twin are the same page, and the
        // higher-scoring of the two should win the slot.
        let (key, _) = split_token(&normalized);
        let key = key.to_string();

        match self.seen.get(&key) {
            None => {
                let page_index = self.pages.len();
                self.seen.insert(key, page_index);
                self.pages
                    .push(Page::new(page_index, self.chapter_url, raw_url));
                log::debug!("origin {origin_index}: page {page_index} added: {raw_url}");
            }
            Some(&page_index) => {
                let current = self.pages[page_index].image_url.clone();
                if is_better_image(raw_url, Some(&current)) {
                    log::debug!(
                        "origin {origin_index}: page {page_index} replaced: {current} -> {raw_url}"
                    );
                    self.pages[page_index].image_url = raw_url.to_string();
                } else {
                    log::debug!("origin {origin_index}: duplicate discarded: {raw_url}");
                }
            }
        }
    }

    /// Wrap externally scraped pages into a result, applying the garbage
    /// filter and keeping accumulated warnings.
    fn finish(self, pages: Vec<Page>, options: &Options) -> ChapterPages {
        ChapterPages {
            pages: garbage::filter_garbage_with(pages, options.drop_suspicious_last_page),
            warnings: self.warnings,
        }
    }
}
