//! # forum-scrape
//!
//! Extraction engine for a community forum that has no structured API.
//!
//! Every page the forum serves is server-rendered HTML. This crate turns an
//! already-parsed page into typed records: topic listings, topic details with
//! their replies, member profiles and reply history, the sidebar profile card
//! and the node directory. Fetching, caching and presentation belong to the
//! caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use forum_scrape::{dom, extract_topic_list};
//!
//! let html = r##"<html><body><div id="Main"><div class="box">
//!   <div class="cell item"><table><tr>
//!     <td><a href="/member/alice"><img src="/a.png" class="avatar" alt="alice"></a></td>
//!     <td><span class="item_title"><a href="/t/42#reply7">Hello</a></span>
//!       <span class="topic_info"><strong><a href="/member/alice">alice</a></strong>
//!       <span>3 小时前</span></span></td>
//!   </tr></table></div>
//! </div></div></body></html>"##;
//!
//! let doc = dom::parse(html);
//! let topics = extract_topic_list(&doc)?;
//! assert_eq!(topics[0].id, 42);
//! assert_eq!(topics[0].reply_count, 7);
//! # Ok::<(), forum_scrape::Error>(())
//! ```
//!
//! ## Degradation
//!
//! Extraction is best-effort per field. Optional fields that are not
//! rendered come back as `None`; always-rendered counters fall back to 0;
//! records without their identity (topic id, reply id, node key) are
//! dropped from their list. The only error is [`Error::MissingRoot`], raised
//! when a page lacks the container its family always has.
//!
//! All extractors are pure functions of the document and can run
//! concurrently on different documents.

mod error;
mod options;
mod patterns;
mod result;

/// DOM query helpers over `dom_query`.
pub mod dom;

/// Page byte decoding.
pub mod encoding;

/// URL utilities for site-relative hrefs.
pub mod url_utils;

/// Timestamps, client hints, anchors and balances.
pub mod primitives;

/// Sign-in state, pagination and `once` tokens.
pub mod session;

/// Topic listings (generic and personalized).
pub mod listing;

/// Topic detail pages.
pub mod topic;

/// Member profiles and reply history.
pub mod member;

/// Sidebar profile card and node directory.
pub mod sidebar;

// Public API - re-exports
pub use error::{Error, PageKind, Result};
pub use listing::{extract_filtered_topic_list, extract_listing, extract_topic_list};
pub use member::{extract_member_profile, extract_member_reply_log};
pub use options::{ListOptions, TimestampSource, UsernameSource, DEFAULT_CELL_SELECTOR};
pub use result::{
    Balance, ClientHint, Member, MemberReply, NavigationSection, Node, Profile, Reply,
    ReplyExcerpt, Supplement, Topic, Widget,
};
pub use session::{is_logged_in, last_page_bound, next_page_cursor, pagination, Page};
pub use sidebar::{extract_navigation_directory, extract_profile_widget};
pub use topic::extract_topic_detail;
