//! Sidebar profile card and the grouped node directory.

use dom_query::{Document, Selection};
use tracing::debug;

use crate::dom;
use crate::error::{Error, PageKind, Result};
use crate::patterns::NODE_PATH_PREFIX;
use crate::primitives::{count_or_zero, member_from_href, parse_balance};
use crate::result::{NavigationSection, Profile};
use crate::session::once_from_handler;
use crate::url_utils;

const SIDEBAR_ROOT: &str = "#Rightbar";
const DIRECTORY_ROOT: &str = "#Main .box";

/// Extract the signed-in member's card from the right sidebar.
///
/// Returns `Ok(None)` when the sidebar shows no member link, which is how
/// signed-out pages render it.
///
/// # Errors
///
/// [`Error::MissingRoot`] when the document has no `#Rightbar` container.
pub fn extract_profile_widget(doc: &Document) -> Result<Option<Profile>> {
    let sidebar = doc.select(SIDEBAR_ROOT);
    if sidebar.is_empty() {
        return Err(Error::MissingRoot {
            page: PageKind::ProfileWidget,
            selector: SIDEBAR_ROOT,
        });
    }

    let cells = sidebar.select(".box .cell");
    let Some(username) = dom::first(&cells.select("a")).and_then(|a| member_from_href(&a)) else {
        debug!("sidebar has no member card");
        return Ok(None);
    };

    let card = dom::first(&cells);
    let tables = card
        .as_ref()
        .map(|card| dom::each(&card.select("table")))
        .unwrap_or_default();
    let motto = tables
        .first()
        .and_then(|identity| dom::select_first(identity, ".fade"))
        .and_then(|fade| dom::non_empty_text(&fade));
    let counters = tables.get(1).map(|t| dom::each(&t.select("td"))).unwrap_or_default();
    let counter = |index: usize| {
        counters
            .get(index)
            .map_or(0, |td| count_or_zero(&dom::text_content(&td.select(".bigger"))))
    };

    let profile = Profile {
        username,
        motto,
        avatar: dom::attr(&cells.select("img"), "src"),
        my_notification: notification_count(doc),
        once: dom::last(&doc.select(".site-nav .tools a"))
            .and_then(|a| once_from_handler(dom::attr(&a, "onclick").as_deref())),
        my_nodes: counter(0),
        my_topics: counter(1),
        my_following: counter(2),
        balance: parse_balance(&doc.select(".balance_area")),
    };

    debug!(
        username = %profile.username,
        notifications = profile.my_notification,
        "extracted profile widget"
    );
    Ok(Some(profile))
}

/// Unread notifications, rendered just before the `#money` block.
fn notification_count(doc: &Document) -> u64 {
    dom::first(&doc.select("#money"))
        .and_then(|money| dom::previous_element_sibling(&money))
        .map_or(0, |prev| count_or_zero(&dom::text_content(&prev)))
}

/// Extract the grouped node directory shown on the home page.
///
/// Every child block of the second `#Main .box` after its heading is one
/// section: a title cell followed by a cell of node links. Links that do
/// not carry a node key are dropped.
///
/// # Errors
///
/// [`Error::MissingRoot`] when the page has fewer than two `#Main .box`
/// containers.
pub fn extract_navigation_directory(doc: &Document) -> Result<Vec<NavigationSection>> {
    let directory = dom::nth(&doc.select(DIRECTORY_ROOT), 1).ok_or(Error::MissingRoot {
        page: PageKind::NodeDirectory,
        selector: DIRECTORY_ROOT,
    })?;

    let sections: Vec<NavigationSection> = dom::each(&dom::children(&directory))
        .iter()
        .skip(1)
        .filter(|child| dom::tag_name(child).as_deref() == Some("div"))
        .filter_map(extract_section)
        .collect();

    debug!(sections = sections.len(), "extracted node directory");
    Ok(sections)
}

fn extract_section(block: &Selection) -> Option<NavigationSection> {
    let tds = dom::each(&block.select("td"));
    let title_cell = tds.first()?;

    let node_names = tds
        .get(1)
        .map(|links| {
            dom::each(&links.select("a"))
                .iter()
                .filter_map(|a| dom::attr(a, "href"))
                .filter_map(|href| url_utils::path_key(&href, NODE_PATH_PREFIX))
                .collect()
        })
        .unwrap_or_default();

    Some(NavigationSection {
        title: dom::trimmed_text(title_cell),
        node_names,
    })
}
