//! DOM Operations Adapter
//!
//! Thin wrappers over the `dom_query` crate used throughout the resolution
//! pipeline. Keeps attribute access and ancestor tests in one place so the
//! pipeline code reads in terms of the document model, not the DOM library.

// Re-export core types for external use
pub use dom_query::{Document, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

/// Get element ID attribute
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

/// Get element class attribute
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get an attribute value, trimmed, dropping empty results.
#[must_use]
pub fn get_trimmed_attribute(sel: &Selection, name: &str) -> Option<String> {
    get_attribute(sel, name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Get all text content of node and descendants
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// you need owned storage.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// First element matched by `selector` below `sel`, if any.
#[must_use]
pub fn select_first<'a>(sel: &Selection<'a>, selector: &str) -> Option<Selection<'a>> {
    let matches = sel.select(selector);
    matches.nodes().first().map(|n| Selection::from(*n))
}

/// First element matched by `selector` in the document, if any.
#[must_use]
pub fn select_first_in_doc<'a>(doc: &'a Document, selector: &str) -> Option<Selection<'a>> {
    let matches = doc.select(selector);
    matches.nodes().first().map(|n| Selection::from(*n))
}

/// Walk ancestors of `sel` and report whether any carries a class containing
/// `needle`.
#[must_use]
pub fn has_ancestor_with_class(sel: &Selection, needle: &str) -> bool {
    let mut current = sel.parent();
    while current.length() > 0 {
        if let Some(class) = class_name(&current) {
            if class
                .split_whitespace()
                .any(|c| c == needle || c.contains(needle))
            {
                return true;
            }
        }
        current = current.parent();
    }
    false
}
