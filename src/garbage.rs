//! Sabotage and decoy detection.
//!
//! The host site plants fake trailing images (hidden in a real browser via
//! an `onerror` handler) and placeholder URLs meant to corrupt naive
//! extraction. This module flags known sabotage patterns and applies a
//! trailing-page heuristic that compares the last page against the directory
//! pattern established by the rest of the chapter.

use crate::page::Page;
use crate::patterns::{GARBAGE_MARKERS, SHORT_FILENAME, UPLOADS_SEGMENT};
use crate::url_utils::extract_filename;

/// Whether a URL is known sabotage or placeholder content.
///
/// Flags: empty URLs, any known sabotage substring, non-Base64 data URIs,
/// a path ending in the bare decoy name, and terse cryptic filenames
/// (1-4 lowercase letters plus an image extension).
#[must_use]
pub fn is_garbage_url(url: &str) -> bool {
    if url.is_empty() {
        return true;
    }

    let lower = url.to_lowercase();

    if GARBAGE_MARKERS.iter().any(|m| lower.contains(m)) {
        return true;
    }

    // Data URIs without a base64 payload cannot hold a real page image
    if lower.starts_with("data:") && !lower.contains("base64") {
        return true;
    }

    if lower.ends_with("/asd") {
        return true;
    }

    SHORT_FILENAME.is_match(&lower)
}

/// Heuristic check for a sabotage image appended after the real last page.
///
/// With fewer than two pages there is nothing to compare and the answer is
/// `false`. Otherwise the last page is flagged when its filename (query
/// stripped) is at most 7 characters, or when its directory - taken relative
/// to the uploads marker - matches none of the directories seen among the
/// other pages (exact match, or prefix match on the first path component).
///
/// The heuristic is approximate: a legitimately short-named final page can
/// misfire. It is kept because the site's sabotage image characteristically
/// lives in an unrelated folder under a terse name.
#[must_use]
pub fn should_drop_last(pages: &[Page]) -> bool {
    if pages.len() < 2 {
        return false;
    }

    let last_url = match pages.last() {
        Some(page) => page.image_url.as_str(),
        None => return false,
    };

    let last_filename = extract_filename(last_url);
    if !last_filename.is_empty() && last_filename.len() <= 7 {
        log::debug!("last page has suspiciously short filename: {last_filename}");
        return true;
    }

    let last_dir = directory_of(last_url);
    let other_dirs: Vec<&str> = pages[..pages.len() - 1]
        .iter()
        .map(|p| directory_of(&p.image_url))
        .collect();

    if other_dirs.is_empty() {
        return false;
    }

    let last_folder = after_uploads(last_dir);
    let familiar = other_dirs.iter().any(|dir| {
        let folder = after_uploads(dir);
        last_folder == folder || last_folder.starts_with(first_component(folder))
    });

    if !familiar {
        log::debug!("last page lives in unfamiliar folder: {last_folder}");
        return true;
    }

    false
}

/// Remove sabotage pages and reindex the survivors.
///
/// First drops every page whose URL `is_garbage_url` flags, then repeatedly
/// applies `should_drop_last` until the trailing page is no longer suspect.
/// Repeating the trailing check (rather than a single drop) is what makes
/// the whole filter idempotent. Survivors are reindexed to a contiguous
/// 0-based sequence.
#[must_use]
pub fn filter_garbage(pages: Vec<Page>) -> Vec<Page> {
    filter_garbage_with(pages, true)
}

/// `filter_garbage` with the trailing-page heuristic made optional.
///
/// The URL-pattern pass always runs; `apply_trailing_heuristic` controls
/// only the `should_drop_last` loop.
#[must_use]
pub fn filter_garbage_with(pages: Vec<Page>, apply_trailing_heuristic: bool) -> Vec<Page> {
    let total = pages.len();

    let mut filtered: Vec<Page> = pages
        .into_iter()
        .filter(|page| {
            let garbage = is_garbage_url(&page.image_url);
            if garbage {
                log::debug!("filtering garbage page: {}", page.image_url);
            }
            !garbage
        })
        .collect();

    while apply_trailing_heuristic && !filtered.is_empty() && should_drop_last(&filtered) {
        if let Some(dropped) = filtered.pop() {
            log::debug!("dropping suspicious trailing page: {}", dropped.image_url);
        }
    }

    if filtered.len() != total {
        log::debug!("filtered {} of {total} pages as garbage", total - filtered.len());
    }

    filtered
        .into_iter()
        .enumerate()
        .map(|(i, page)| Page::new(i, page.chapter_url, page.image_url))
        .collect()
}

/// Directory portion of a URL (everything before the last separator).
fn directory_of(url: &str) -> &str {
    url.rsplit_once('/').map_or(url, |(dir, _)| dir)
}

/// Path relative to the uploads marker, or the whole input when absent.
fn after_uploads(path: &str) -> &str {
    path.rsplit_once(UPLOADS_SEGMENT).map_or(path, |(_, rest)| rest)
}

/// First path component of a directory string.
fn first_component(path: &str) -> &str {
    path.split('/').next().unwrap_or(path)
}
