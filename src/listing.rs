//! Topic listings.
//!
//! One traversal covers both listing families; [`ListOptions`] decides where
//! times and usernames come from and whether the viewer's ignore/block state
//! filters the result. Cells are emitted in document order.

use std::collections::HashSet;

use dom_query::{Document, Selection};
use regex::Regex;
use tracing::{debug, trace};

use crate::dom;
use crate::error::{Error, PageKind, Result};
use crate::options::{ListOptions, TimestampSource, UsernameSource};
use crate::patterns::{BLOCKED_ARRAY, IGNORED_TOPICS_ARRAY, SENDER_CLASS};
use crate::primitives::{
    count_or_zero, member_from_href, normalize_timestamp, parse_node_ref, parse_topic_ref,
};
use crate::result::{Member, Topic};

const LISTING_ROOT: &str = "#Main";

/// Topics of a node or tag index page, unfiltered.
///
/// # Errors
///
/// [`Error::MissingRoot`] when the document has no `#Main` container.
pub fn extract_topic_list(doc: &Document) -> Result<Vec<Topic>> {
    extract_listing(doc, &ListOptions::generic())
}

/// Topics of a personalized feed, minus ignored topics and blocked senders.
///
/// # Errors
///
/// [`Error::MissingRoot`] when the document has no `#Main` container.
pub fn extract_filtered_topic_list(doc: &Document, cell_selector: &str) -> Result<Vec<Topic>> {
    extract_listing(doc, &ListOptions::personalized(cell_selector))
}

/// Topics of any listing page, as configured by `options`.
///
/// Cells whose title link carries no topic id are skipped.
///
/// # Errors
///
/// [`Error::MissingRoot`] when the document has no `#Main` container.
pub fn extract_listing(doc: &Document, options: &ListOptions) -> Result<Vec<Topic>> {
    if doc.select(LISTING_ROOT).is_empty() {
        return Err(Error::MissingRoot {
            page: PageKind::TopicList,
            selector: LISTING_ROOT,
        });
    }

    let filters = options.apply_filters.then(|| ViewerFilters::from_document(doc));
    let cells = dom::each(&doc.select(&options.cell_selector));
    let mut topics = Vec::with_capacity(cells.len());

    for cell in &cells {
        let Some(topic) = extract_cell(cell, options) else {
            trace!("listing cell without topic id skipped");
            continue;
        };

        if let Some(filters) = &filters {
            if filters.hides(cell, topic.id) {
                trace!(id = topic.id, "listing cell filtered");
                continue;
            }
        }

        topics.push(topic);
    }

    debug!(cells = cells.len(), topics = topics.len(), "extracted listing");
    Ok(topics)
}

/// One listing cell; `None` when it has no topic id.
fn extract_cell(cell: &Selection, options: &ListOptions) -> Option<Topic> {
    let row = cell.select("table > tbody > tr:first-child");
    let info = row.select(".topic_info");
    let topic_ref = parse_topic_ref(&row.select(".item_title a"))?;

    // A node link with an href shifts the info children: the time is the
    // fourth child with it and the second without it, whether or not the
    // href yields a node key.
    let node_anchor = row.select(".node");
    let time_child = if dom::attr(&node_anchor, "href").is_some() { 3 } else { 1 };
    let node = parse_node_ref(&node_anchor);
    let last_touched = dom::nth_child(&info, time_child)
        .and_then(|time| read_timestamp(&time, options.timestamp_source));

    let avatar_img = row.select("td:first-child a > img");
    let username = match options.username_source {
        UsernameSource::AvatarAlt => dom::non_empty_attr(&avatar_img, "alt"),
        UsernameSource::AnchorText => {
            dom::first(&info.select("strong a")).and_then(|a| dom::non_empty_text(&a))
        }
    };
    let member =
        username.map(|username| Member::reference(username, dom::attr(&avatar_img, "src")));

    let last_reply_by =
        dom::first(&info.select("strong:nth-of-type(2) a")).and_then(|a| member_from_href(&a));

    Some(Topic {
        id: topic_ref.id,
        title: topic_ref.title,
        reply_count: topic_ref.reply_count,
        votes: count_or_zero(&dom::text_content(&row.select(".votes"))),
        node,
        member,
        last_touched,
        last_reply_by,
        ..Topic::default()
    })
}

fn read_timestamp(el: &Selection, source: TimestampSource) -> Option<String> {
    match source {
        TimestampSource::VisibleText => dom::non_empty_text(el),
        TimestampSource::TitleAttribute => {
            dom::attr(el, "title").map(|title| normalize_timestamp(&title))
        }
    }
}

/// The viewer's ignore/block state, as embedded in the page's inline script.
struct ViewerFilters {
    ignored_topics: HashSet<u64>,
    blocked_members: HashSet<u64>,
}

impl ViewerFilters {
    fn from_document(doc: &Document) -> Self {
        let text = dom::text_content(&doc.select("html"));
        let filters = Self {
            ignored_topics: embedded_id_set(&text, &IGNORED_TOPICS_ARRAY),
            blocked_members: embedded_id_set(&text, &BLOCKED_ARRAY),
        };
        debug!(
            ignored = filters.ignored_topics.len(),
            blocked = filters.blocked_members.len(),
            "loaded viewer filters"
        );
        filters
    }

    fn hides(&self, cell: &Selection, topic_id: u64) -> bool {
        if self.ignored_topics.contains(&topic_id) {
            return true;
        }
        dom::attr(cell, "class")
            .and_then(|class| {
                SENDER_CLASS
                    .captures(&class)
                    .and_then(|c| c.get(1))
                    .and_then(|m| m.as_str().parse::<u64>().ok())
            })
            .is_some_and(|sender| self.blocked_members.contains(&sender))
    }
}

/// Integers of the first bracketed array matched by `pattern` in `text`.
///
/// `text` is the page's whole text content, inline scripts included, so an
/// array rendered anywhere on the page counts. Fragile by nature: it depends
/// on the exact `name = [1,2,3]` form the site's inline script emits. If that
/// changes the set comes back empty and listings are under-filtered. A
/// missing array and an empty one are not distinguished.
#[must_use]
pub fn embedded_id_set(text: &str, pattern: &Regex) -> HashSet<u64> {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|list| {
            list.as_str()
                .split(',')
                .filter_map(|id| id.trim().parse().ok())
                .collect()
        })
        .unwrap_or_default()
}
