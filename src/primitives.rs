//! Primitive extractors shared by every page family.
//!
//! These are the leaf transforms: timestamp clean-up, client hints, node and
//! topic references from anchors, coin balances, and the lenient integer
//! parsing the site's counters need.

use chrono::NaiveDateTime;
use dom_query::Selection;

use crate::dom;
use crate::patterns::{
    BALANCE_TIER, DIGIT_RUN, MEMBER_PATH_PREFIX, NODE_PATH_PREFIX, SITE_OFFSET_SUFFIX,
    SITE_TIMESTAMP,
};
use crate::result::{Balance, ClientHint, Node};
use crate::url_utils;

/// Identity of a topic as carried by a link to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicRef {
    pub id: u64,
    pub title: String,
    pub reply_count: u64,
}

// ============================================================
// TEXT
// ============================================================

/// Drop the site's fixed ` +08:00` suffix.
///
/// Only that literal is recognised; any other offset passes through
/// untouched. The result never ends with the suffix, so applying this twice
/// is the same as applying it once.
#[must_use]
pub fn normalize_timestamp(timestamp: &str) -> String {
    timestamp.trim_end_matches(SITE_OFFSET_SUFFIX).to_string()
}

/// Parse a full-precision site timestamp (`2024-03-01 09:30:00`, with or
/// without the ` +08:00` suffix). Relative times yield `None`.
#[must_use]
pub fn parse_site_time(timestamp: &str) -> Option<NaiveDateTime> {
    let caps = SITE_TIMESTAMP.captures(timestamp.trim())?;
    NaiveDateTime::parse_from_str(caps.get(1)?.as_str(), "%Y-%m-%d %H:%M:%S").ok()
}

/// Classify the client from "via" text. iPhone wins over Android.
#[must_use]
pub fn classify_client_hint(via: &str) -> Option<ClientHint> {
    if via.contains("iPhone") {
        Some(ClientHint::IPhone)
    } else if via.contains("Android") {
        Some(ClientHint::Android)
    } else {
        None
    }
}

/// Leading integer of a string, after leading whitespace (`" 12 次点击"` -> 12).
#[must_use]
pub fn leading_int(text: &str) -> Option<u64> {
    let text = text.trim_start();
    let end = text
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(text.len(), |(i, _)| i);
    text[..end].parse().ok()
}

/// Counter that always renders: unparsable text counts as zero.
#[inline]
#[must_use]
pub fn count_or_zero(text: &str) -> u64 {
    leading_int(text).unwrap_or(0)
}

// ============================================================
// ANCHORS
// ============================================================

/// Node reference from an anchor like `<a href="/go/rust">Rust</a>`.
///
/// `None` when the anchor is missing, has no href, or the href carries no
/// key.
#[must_use]
pub fn parse_node_ref(anchor: &Selection) -> Option<Node> {
    let href = dom::attr(anchor, "href")?;
    let name = url_utils::path_key(&href, NODE_PATH_PREFIX)?;
    Some(Node {
        name,
        title: dom::text_content(anchor).to_string(),
    })
}

/// Topic reference from an anchor like `<a href="/t/123#reply45">Title</a>`.
///
/// The first digit run of the href is the id; a second run, when present, is
/// the reply count. `None` when the href has no digits at all.
#[must_use]
pub fn parse_topic_ref(anchor: &Selection) -> Option<TopicRef> {
    let href = dom::attr(anchor, "href")?;
    let mut runs = DIGIT_RUN.find_iter(&href).map(|m| m.as_str().parse::<u64>());
    let id = runs.next()?.ok().filter(|id| *id > 0)?;
    let reply_count = runs.next().and_then(Result::ok).unwrap_or(0);

    Some(TopicRef {
        id,
        title: dom::text_content(anchor).to_string(),
        reply_count,
    })
}

/// Username from a member link's href (`/member/alice` -> `alice`).
#[must_use]
pub fn member_from_href(anchor: &Selection) -> Option<String> {
    let href = dom::attr(anchor, "href")?;
    url_utils::path_key(&href, MEMBER_PATH_PREFIX)
}

// ============================================================
// BALANCE
// ============================================================

/// Coin balance rendered under `root`.
///
/// Each tier is matched on its own; a tier whose icon is not in the markup
/// stays `None` without affecting the others.
#[must_use]
pub fn parse_balance(root: &Selection) -> Balance {
    dom::inner_html(root).map_or_else(Balance::default, |markup| balance_from_markup(&markup))
}

/// Coin balance from raw markup (see [`parse_balance`]).
#[must_use]
pub fn balance_from_markup(markup: &str) -> Balance {
    let [gold, silver, bronze] = BALANCE_TIER.each_ref().map(|pattern| {
        pattern
            .captures(markup)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
    });

    Balance {
        gold,
        silver,
        bronze,
    }
}
