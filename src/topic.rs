//! Topic detail pages.
//!
//! The opening post, its stats and action buttons, appended supplements and
//! the page's replies. Header fields each live in one fixed place; the
//! repeating parts (supplements, replies) keep document order.

use dom_query::{Document, Selection};
use tracing::{debug, trace};

use crate::dom;
use crate::error::{Error, PageKind, Result};
use crate::patterns::{
    MEMBER_MENTION, REPLY_ROW_ID, STATS_LIKES, STATS_SEPARATOR, STATS_THANKS, STATS_VIEWS,
};
use crate::primitives::{
    classify_client_hint, count_or_zero, leading_int, normalize_timestamp, parse_node_ref,
};
use crate::result::{Member, Reply, Supplement, Topic};
use crate::session::extract_once_token;

const TOPIC_ROOT: &str = "#Main";

/// Extract the topic shown on a `/t/<id>` page.
///
/// The page does not render its own id in a stable place, so the caller
/// passes the id it requested.
///
/// # Errors
///
/// [`Error::MissingRoot`] when the document has no `#Main` container.
pub fn extract_topic_detail(doc: &Document, id: u64) -> Result<Topic> {
    let main = doc.select(TOPIC_ROOT);
    if main.is_empty() {
        return Err(Error::MissingRoot {
            page: PageKind::TopicDetail,
            selector: TOPIC_ROOT,
        });
    }

    let header = main.select(".header");
    let stats = TopicStats::parse(&dom::text_content(&main.select(".topic_stats")));
    let actions = TopicActions::parse(&main.select(".topic_buttons .tb"));
    let byline = main.select("small.gray");

    let replies = extract_replies(doc);
    let supplements = extract_supplements(&main);

    debug!(
        id,
        replies = replies.len(),
        supplements = supplements.len(),
        "extracted topic detail"
    );

    Ok(Topic {
        id,
        title: dom::text_content(&main.select("h1")).to_string(),
        content: dom::inner_html(&main.select(".topic_content")),
        votes: dom::first(&main.select(".votes a"))
            .map_or(0, |a| count_or_zero(&dom::text_content(&a))),
        reply_count: dom::first(&main.select(".box .cell .gray")).map_or(0, |gray| {
            count_or_zero(dom::text_content(&gray).split('•').next().unwrap_or_default())
        }),
        node: parse_node_ref(&main.select(".header > a:nth-child(4)")),
        member: member_from_avatar(&header.select(".avatar")),
        created: dom::attr(&byline.select("span[title]"), "title")
            .map(|title| normalize_timestamp(&title)),
        last_touched: None,
        last_reply_by: None,
        views: stats.views,
        likes: stats.likes,
        thanks: stats.thanks,
        liked: actions.as_ref().map(|a| a.liked),
        ignored: actions.as_ref().map(|a| a.ignored),
        once: actions.and_then(|a| a.once),
        thanked: dom::exists(&main, ".topic_thanked"),
        via: dom::first(&byline)
            .and_then(|b| dom::text_content(&b).split('·').nth(1).and_then(classify_client_hint)),
        supplements,
        replies,
    })
}

/// View, favorite and thank counts from the stats line
/// (`1234 次点击 ∙ 5 人收藏 ∙ 2 人感谢`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TopicStats {
    views: u64,
    likes: u64,
    thanks: u64,
}

impl TopicStats {
    fn parse(line: &str) -> Self {
        let mut stats = Self::default();
        for segment in line.split(STATS_SEPARATOR) {
            let value = leading_int(segment).unwrap_or(0);
            if segment.contains(STATS_VIEWS) {
                stats.views = value;
            } else if segment.contains(STATS_LIKES) {
                stats.likes = value;
            } else if segment.contains(STATS_THANKS) {
                stats.thanks = value;
            }
        }
        stats
    }
}

/// State carried by the favorite/ignore buttons; absent for signed-out views.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TopicActions {
    liked: bool,
    ignored: bool,
    once: Option<String>,
}

impl TopicActions {
    fn parse(buttons: &Selection) -> Option<Self> {
        let favorite = dom::first(buttons).and_then(|b| dom::attr(&b, "href"))?;
        let ignored = dom::nth(buttons, 2)
            .and_then(|b| dom::attr(&b, "href"))
            .is_some_and(|href| href.contains("unignore"));

        Some(Self {
            liked: favorite.contains("unfavorite"),
            ignored,
            once: extract_once_token(Some(&favorite)),
        })
    }
}

fn member_from_avatar(avatar: &Selection) -> Option<Member> {
    let username = dom::non_empty_attr(avatar, "alt")?;
    Some(Member::reference(username, dom::attr(avatar, "src")))
}

fn extract_supplements(main: &Selection) -> Vec<Supplement> {
    dom::each(&main.select(".subtle"))
        .iter()
        .map(|subtle| Supplement {
            created: dom::attr(&subtle.select(".fade > span"), "title")
                .map(|title| normalize_timestamp(&title)),
            content: dom::inner_html(&subtle.select(".topic_content")),
        })
        .collect()
}

/// Reply rows are the `.cell`s carrying an `r_<id>` id; anything else
/// (headers, pagers, deleted placeholders) is skipped.
fn extract_replies(doc: &Document) -> Vec<Reply> {
    dom::each(&doc.select(".cell"))
        .iter()
        .filter_map(|row| {
            let reply = extract_reply(row);
            if reply.is_none() && dom::attr(row, "id").is_some() {
                trace!("reply row without numeric id skipped");
            }
            reply
        })
        .collect()
}

fn extract_reply(row: &Selection) -> Option<Reply> {
    let id = dom::attr(row, "id")
        .and_then(|id| {
            REPLY_ROW_ID
                .captures(id.trim())
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse::<u64>().ok())
        })
        .filter(|id| *id > 0)?;

    let avatar = row.select(".avatar");
    let ago = row.select(".ago");
    let content = dom::inner_html(&row.select(".reply_content"));
    let has_related_replies = content
        .as_deref()
        .is_some_and(|html| MEMBER_MENTION.is_match(html));

    Some(Reply {
        id,
        member: member_from_avatar(&avatar),
        created: dom::non_empty_attr(&ago, "title").map(|title| normalize_timestamp(&title)),
        via: classify_client_hint(&dom::text_content(&ago)),
        content,
        thanks: count_or_zero(&dom::text_content(&row.select(".small.fade"))),
        thanked: dom::exists(row, ".thanked"),
        op: dom::exists(row, ".badge.op"),
        is_mod: dom::exists(row, ".badge.mod"),
        has_related_replies,
    })
}
