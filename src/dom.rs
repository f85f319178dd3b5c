//! DOM Query Adapter
//!
//! Thin helpers over the `dom_query` crate covering what the extractors need
//! from the tree: selector lookup, positional access, sibling traversal and
//! text/attribute/markup reads. Positional helpers count element nodes only,
//! in document order, so `nth(sel, 2)` means the same thing as `.eq(2)` in a
//! jQuery-style API.

// Re-export core types for external use
pub use dom_query::{Document, Selection};

pub use tendril::StrTendril;

use crate::encoding;

// === Parsing ===

/// Parse an HTML string into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Parse raw page bytes, honouring a `<meta charset>` declaration.
#[must_use]
pub fn parse_bytes(html: &[u8]) -> Document {
    Document::from(encoding::transcode_to_utf8(html))
}

// === Attribute Operations ===

/// Attribute of the first element in the selection.
#[inline]
#[must_use]
pub fn attr(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Attribute of the first element, trimmed, `None` when empty.
#[must_use]
pub fn non_empty_attr(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// === Tag/Node Information ===

/// Tag name (lowercase) of the first element.
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_string())
}

// === Text Content ===

/// All text of the selection and its descendants.
///
/// Returns `StrTendril` for zero-copy passing.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Text of the selection with surrounding whitespace removed.
#[must_use]
pub fn trimmed_text(sel: &Selection) -> String {
    sel.text().trim().to_string()
}

/// Trimmed text, `None` when the selection is empty or renders no text.
#[must_use]
pub fn non_empty_text(sel: &Selection) -> Option<String> {
    Some(trimmed_text(sel)).filter(|s| !s.is_empty())
}

/// Inner HTML of the first element, `None` when nothing matched.
#[must_use]
pub fn inner_html(sel: &Selection) -> Option<String> {
    first(sel).map(|s| s.inner_html().to_string())
}

// === Positional Access ===

/// The first element of the selection.
#[inline]
#[must_use]
pub fn first<'a>(sel: &Selection<'a>) -> Option<Selection<'a>> {
    nth(sel, 0)
}

/// The element at `index` within the selection.
#[must_use]
pub fn nth<'a>(sel: &Selection<'a>, index: usize) -> Option<Selection<'a>> {
    sel.nodes().get(index).map(|node| Selection::from(*node))
}

/// The last element of the selection.
#[must_use]
pub fn last<'a>(sel: &Selection<'a>) -> Option<Selection<'a>> {
    sel.nodes().last().map(|node| Selection::from(*node))
}

/// Elements of the selection as individual selections, in document order.
#[must_use]
pub fn each<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    sel.nodes().iter().map(|node| Selection::from(*node)).collect()
}

/// First descendant matching `selector`, if any.
#[must_use]
pub fn select_first<'a>(sel: &Selection<'a>, selector: &str) -> Option<Selection<'a>> {
    first(&sel.select(selector))
}

/// Whether any descendant matches `selector`.
#[inline]
#[must_use]
pub fn exists(sel: &Selection, selector: &str) -> bool {
    !sel.select(selector).is_empty()
}

// === Tree Navigation ===

/// Direct element children.
#[inline]
#[must_use]
pub fn children<'a>(sel: &Selection<'a>) -> Selection<'a> {
    sel.children()
}

/// The element child at `index` (zero-based; `nth_child(sel, 3)` is CSS
/// `:nth-child(4)`).
#[must_use]
pub fn nth_child<'a>(sel: &Selection<'a>, index: usize) -> Option<Selection<'a>> {
    nth(&sel.children(), index)
}

/// Next element sibling, skipping text and comment nodes.
#[must_use]
pub fn next_element_sibling<'a>(sel: &Selection<'a>) -> Option<Selection<'a>> {
    sel.nodes().first().and_then(|node| {
        let mut sibling = node.next_sibling();
        while let Some(s) = sibling {
            if s.is_element() {
                return Some(Selection::from(s));
            }
            sibling = s.next_sibling();
        }
        None
    })
}

/// Previous element sibling, skipping text and comment nodes.
#[must_use]
pub fn previous_element_sibling<'a>(sel: &Selection<'a>) -> Option<Selection<'a>> {
    sel.nodes().first().and_then(|node| {
        let mut sibling = node.prev_sibling();
        while let Some(s) = sibling {
            if s.is_element() {
                return Some(Selection::from(s));
            }
            sibling = s.prev_sibling();
        }
        None
    })
}
