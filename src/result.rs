//! Domain records produced by the extractors.
//!
//! Every optional field is an `Option`: a field the page did not render is
//! `None`, which is never the same thing as a rendered zero or empty string.
//! Records are plain owned values, built fresh per extraction call.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::primitives::parse_site_time;

/// A forum node (board). `name` is the key taken from the `/go/<name>` path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub title: String,
}

/// Gold/silver/bronze coin counts.
///
/// A tier is `None` when the page did not render it at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub gold: Option<u64>,
    pub silver: Option<u64>,
    pub bronze: Option<u64>,
}

/// Client the post was made from, as hinted by the "via" text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClientHint {
    #[serde(rename = "iPhone")]
    IPhone,
    Android,
}

impl ClientHint {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IPhone => "iPhone",
            Self::Android => "Android",
        }
    }
}

/// One social link shown on a member profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    /// Icon image URL.
    pub uri: String,
    pub title: String,
    pub link: String,
}

/// A member, either a partial reference (username and avatar, as seen in
/// listings and replies) or a full profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Member {
    pub username: String,
    /// Registration number ("member #N").
    pub id: Option<u64>,
    pub avatar: Option<String>,
    /// Join timestamp, as rendered.
    pub created: Option<String>,
    /// Activity ranking score.
    pub activity: Option<u64>,
    pub online: bool,
    pub motto: Option<String>,
    pub widgets: Vec<Widget>,
    pub company: Option<String>,
    /// Job title; only present alongside the company marker.
    pub title: Option<String>,
    /// Raw HTML of the self-description cell.
    pub overview: Option<String>,
    pub blocked: bool,
    pub followed: bool,
    pub once: Option<String>,
    pub balance: Balance,
}

impl Member {
    /// Partial reference as rendered next to a topic or reply.
    #[must_use]
    pub fn reference(username: impl Into<String>, avatar: Option<String>) -> Self {
        Self {
            username: username.into(),
            avatar,
            ..Self::default()
        }
    }
}

/// An addendum appended to a topic after posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplement {
    pub created: Option<String>,
    pub content: Option<String>,
}

/// A reply under a topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Reply {
    pub id: u64,
    pub member: Option<Member>,
    pub created: Option<String>,
    pub via: Option<ClientHint>,
    /// Raw HTML.
    pub content: Option<String>,
    pub thanks: u64,
    pub thanked: bool,
    /// Written by the topic author.
    pub op: bool,
    /// Written by a moderator.
    #[serde(rename = "mod")]
    pub is_mod: bool,
    /// The reply mentions another member.
    #[serde(rename = "hasRelatedReplies")]
    pub has_related_replies: bool,
}

/// A topic: either a listing summary or a fully extracted detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: u64,
    pub title: String,
    /// Raw HTML of the opening post.
    pub content: Option<String>,
    pub votes: u64,
    pub reply_count: u64,
    pub node: Option<Node>,
    pub member: Option<Member>,
    pub created: Option<String>,
    pub last_touched: Option<String>,
    pub last_reply_by: Option<String>,
    pub views: u64,
    pub likes: u64,
    pub thanks: u64,
    /// `None` when the page rendered no action buttons (signed out).
    pub liked: Option<bool>,
    pub ignored: Option<bool>,
    pub thanked: bool,
    pub once: Option<String>,
    pub via: Option<ClientHint>,
    pub supplements: Vec<Supplement>,
    pub replies: Vec<Reply>,
}

impl Topic {
    /// `created` as a timestamp, when it carries full precision.
    #[must_use]
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        self.created.as_deref().and_then(parse_site_time)
    }

    /// `last_touched` as a timestamp. Listings that only render relative
    /// times ("3 小时前") yield `None`.
    #[must_use]
    pub fn last_touched_at(&self) -> Option<NaiveDateTime> {
        self.last_touched.as_deref().and_then(parse_site_time)
    }
}

/// The signed-in member's sidebar card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    pub motto: Option<String>,
    pub avatar: Option<String>,
    pub my_notification: u64,
    pub once: Option<String>,
    pub my_nodes: u64,
    pub my_topics: u64,
    pub my_following: u64,
    pub balance: Balance,
}

/// One group of the node directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationSection {
    pub title: String,
    #[serde(rename = "nodeNames")]
    pub node_names: Vec<String>,
}

/// The reply half of a reply-log entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyExcerpt {
    /// Relative time as rendered ("2 天前").
    pub created: Option<String>,
    pub content: Option<String>,
}

/// An entry of a member's reply history: the topic replied to and the reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberReply {
    pub topic: Topic,
    pub reply: ReplyExcerpt,
}
