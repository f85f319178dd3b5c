//! Session and pagination helpers.
//!
//! Whether the viewer is signed in, how many pages a listing has, and where
//! the single-use `once` tokens hide.

use dom_query::Document;
use serde::{Deserialize, Serialize};

use crate::dom;
use crate::patterns::ONCE_IN_HANDLER;
use crate::primitives::leading_int;
use crate::url_utils;

/// Pagination state of a listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page: u32,
    pub last_page: u32,
    /// Next page to request, `None` on the last page.
    pub next: Option<u32>,
}

/// True when the toolbar's last action is the sign-out link.
#[must_use]
pub fn is_logged_in(doc: &Document) -> bool {
    dom::last(&doc.select("#Top .tools a"))
        .and_then(|a| dom::attr(&a, "onclick"))
        .is_some_and(|onclick| onclick.contains("signout"))
}

/// Highest page number offered by the page-jump input, 1 without one.
#[must_use]
pub fn last_page_bound(doc: &Document) -> u32 {
    dom::attr(&doc.select(".page_input"), "max")
        .and_then(|max| leading_int(&max))
        .and_then(|max| u32::try_from(max).ok())
        .unwrap_or(1)
}

/// The page after `page`, or `None` once `last_page` has been reached.
#[must_use]
pub fn next_page_cursor(page: u32, last_page: u32) -> Option<u32> {
    (last_page > page).then(|| page + 1)
}

/// Pagination state for `doc`, which was fetched as page `page`.
#[must_use]
pub fn pagination(doc: &Document, page: u32) -> Page {
    let last_page = last_page_bound(doc);
    Page {
        page,
        last_page,
        next: next_page_cursor(page, last_page),
    }
}

/// The `once` query parameter of an action URL.
#[must_use]
pub fn extract_once_token(url: Option<&str>) -> Option<String> {
    url_utils::query_param(url?, "once")
}

/// The `once` value inside an inline handler such as
/// `if (confirm('...')) { location.href = '/signout?once=12345'; }`.
#[must_use]
pub fn once_from_handler(onclick: Option<&str>) -> Option<String> {
    ONCE_IN_HANDLER
        .captures(onclick?)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
