//! Member profile pages and their reply history.

use dom_query::{Document, Selection};
use tracing::{debug, trace};

use crate::dom;
use crate::error::{Error, PageKind, Result};
use crate::patterns::{COMPANY_MARKER, JOINED_AT, MEMBER_NUMBER};
use crate::primitives::{parse_balance, parse_node_ref, parse_topic_ref};
use crate::result::{Member, MemberReply, ReplyExcerpt, Topic, Widget};
use crate::session::once_from_handler;

const PROFILE_ROOT: &str = "#Main .box";
const REPLY_LOG_ROOT: &str = "#Main";

/// Extract the member shown on a `/member/<username>` page.
///
/// The username is the one the caller requested. Every other field degrades
/// on its own: a missing member number, join date or activity score leaves
/// just that field `None`.
///
/// # Errors
///
/// [`Error::MissingRoot`] when the document has no `#Main .box` container.
pub fn extract_member_profile(doc: &Document, username: &str) -> Result<Member> {
    let profile = dom::first(&doc.select(PROFILE_ROOT)).ok_or(Error::MissingRoot {
        page: PageKind::MemberProfile,
        selector: PROFILE_ROOT,
    })?;

    let info_text = dom::first(&profile.select(".gray"))
        .map(|info| dom::text_content(&info).to_string())
        .unwrap_or_default();
    let buttons = dom::first(&profile.select(".fr"))
        .map(|fr| dom::each(&fr.select("input")))
        .unwrap_or_default();
    let (company, title) = company_and_title(&doc.select(PROFILE_ROOT)).unzip();

    let member = Member {
        username: username.to_string(),
        id: capture(&MEMBER_NUMBER, &info_text).and_then(|id| id.parse().ok()),
        avatar: dom::attr(&profile.select("img"), "src"),
        created: capture(&JOINED_AT, &info_text),
        activity: dom::first(&profile.select(".gray a"))
            .and_then(|a| dom::trimmed_text(&a).parse().ok()),
        online: !doc.select(".online").is_empty(),
        motto: dom::non_empty_text(&doc.select(".bigger")),
        widgets: extract_widgets(doc),
        company: company.flatten(),
        title: title.flatten(),
        overview: dom::nth(&profile.select(".cell"), 1)
            .map(|cell| cell.inner_html().to_string())
            .filter(|html| !html.is_empty()),
        blocked: buttons
            .get(1)
            .and_then(|b| dom::attr(b, "value"))
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("unblock")),
        followed: buttons
            .first()
            .and_then(|b| dom::attr(b, "value"))
            .is_some_and(|value| value.contains("取消")),
        once: buttons
            .first()
            .and_then(|b| once_from_handler(dom::attr(b, "onclick").as_deref())),
        balance: parse_balance(&doc.select(".balance_area")),
    };

    debug!(username, id = ?member.id, widgets = member.widgets.len(), "extracted member profile");
    Ok(member)
}

/// First capture group of `pattern` in `text`.
fn capture(pattern: &regex::Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn extract_widgets(doc: &Document) -> Vec<Widget> {
    dom::each(&doc.select(".widgets a"))
        .iter()
        .map(|a| Widget {
            uri: dom::attr(&a.select("img"), "src").unwrap_or_default(),
            title: dom::trimmed_text(a),
            link: dom::attr(a, "href").unwrap_or_default(),
        })
        .collect()
}

/// Company and job title from the span marked with the office glyph
/// (`🏢 <strong>ACME</strong> / Engineer`). `None` when no span carries the
/// marker; either half may still be empty.
fn company_and_title(boxes: &Selection) -> Option<(Option<String>, Option<String>)> {
    let span = dom::each(&boxes.select("span"))
        .into_iter()
        .find(|span| dom::text_content(span).contains(COMPANY_MARKER))?;

    let company = dom::non_empty_text(&span.select("strong"));
    let title = dom::text_content(&span)
        .split('/')
        .nth(1)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    Some((company, title))
}

/// Extract a member's reply history.
///
/// Each `.dock_area` row names the topic replied to; the reply itself is in
/// the element right after the row, so sibling order must be intact.
///
/// # Errors
///
/// [`Error::MissingRoot`] when the document has no `#Main` container.
pub fn extract_member_reply_log(doc: &Document) -> Result<Vec<MemberReply>> {
    if doc.select(REPLY_LOG_ROOT).is_empty() {
        return Err(Error::MissingRoot {
            page: PageKind::ReplyLog,
            selector: REPLY_LOG_ROOT,
        });
    }

    let rows = dom::each(&doc.select("#Main .box .dock_area"));
    let entries: Vec<MemberReply> = rows.iter().filter_map(extract_reply_log_row).collect();

    debug!(rows = rows.len(), entries = entries.len(), "extracted reply log");
    Ok(entries)
}

fn extract_reply_log_row(row: &Selection) -> Option<MemberReply> {
    let dock = dom::select_first(row, "table tbody tr td")?;
    let anchors = dock.select(".gray a");

    // Topic author, node, topic: always in this order.
    let Some(topic_ref) = dom::nth(&anchors, 2).and_then(|a| parse_topic_ref(&a)) else {
        trace!("reply log row without topic id skipped");
        return None;
    };
    let member = dom::nth(&anchors, 0)
        .and_then(|a| dom::non_empty_text(&a))
        .map(|username| Member::reference(username, None));
    let node = dom::nth(&anchors, 1).and_then(|a| parse_node_ref(&a));

    let reply_body = dom::next_element_sibling(row);
    let content = reply_body
        .as_ref()
        .and_then(|body| dom::inner_html(&body.select(".reply_content")));

    Some(MemberReply {
        topic: Topic {
            id: topic_ref.id,
            title: topic_ref.title,
            reply_count: topic_ref.reply_count,
            node,
            member,
            ..Topic::default()
        },
        reply: ReplyExcerpt {
            created: dom::non_empty_text(&dock.select(".fr")),
            content,
        },
    })
}
