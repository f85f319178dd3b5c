//! Error types for forum-scrape.
//!
//! Extraction degrades field by field, so almost nothing is an error. The one
//! hard failure is a document that lacks the root container of the page
//! family it was handed to, which means the caller supplied the wrong page.

use std::fmt;

/// Page families the extractors understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// Node, tag or home topic index.
    TopicList,
    /// A single topic with its replies.
    TopicDetail,
    /// A member's public profile.
    MemberProfile,
    /// The reply history section of a member profile.
    ReplyLog,
    /// Right-hand sidebar of a signed-in page.
    ProfileWidget,
    /// The grouped node directory.
    NodeDirectory,
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TopicList => "topic list",
            Self::TopicDetail => "topic detail",
            Self::MemberProfile => "member profile",
            Self::ReplyLog => "reply log",
            Self::ProfileWidget => "profile widget",
            Self::NodeDirectory => "node directory",
        };
        f.write_str(name)
    }
}

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document is missing the container every page of this family has.
    #[error("not a {page} page: missing root container `{selector}`")]
    MissingRoot {
        page: PageKind,
        selector: &'static str,
    },
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
