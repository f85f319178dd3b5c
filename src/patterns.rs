//! Compiled regex patterns and markup constants for the forum's pages.
//!
//! All patterns are compiled once on first use via `LazyLock`. Together with
//! the selector strings used by each extractor, these are the contract with
//! the site's markup; fixtures under `tests/` pin them.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Markup Constants
// =============================================================================

/// Path prefix of node links (`/go/<name>`).
pub const NODE_PATH_PREFIX: &str = "/go/";

/// Path prefix of member links (`/member/<username>`).
pub const MEMBER_PATH_PREFIX: &str = "/member/";

/// The only timezone suffix the site renders.
pub const SITE_OFFSET_SUFFIX: &str = " +08:00";

/// Balance tiers, in the order they are rendered.
pub const BALANCE_TIERS: [&str; 3] = ["gold", "silver", "bronze"];

/// Separator between segments of the topic stats line.
pub const STATS_SEPARATOR: char = '∙';

/// Stats segment keywords: views, favorites, thanks.
pub const STATS_VIEWS: &str = "点击";
pub const STATS_LIKES: &str = "收藏";
pub const STATS_THANKS: &str = "感谢";

/// Glyph marking the company/title span on a member profile.
pub const COMPANY_MARKER: &str = "🏢";

// =============================================================================
// Identity Patterns
// =============================================================================

/// Digit runs; the first is a topic id, the second a reply count.
pub static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("DIGIT_RUN regex"));

/// Reply row ids look like `r_123456`.
pub static REPLY_ROW_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^r_(\d+)$").expect("REPLY_ROW_ID regex"));

/// Sender id embedded in a listing cell's class list (`from_123`).
pub static SENDER_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"from_(\d+)").expect("SENDER_CLASS regex"));

/// Once token inside an inline handler (`...?once=12345'`).
pub static ONCE_IN_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"once=(\d+)").expect("ONCE_IN_HANDLER regex"));

/// A link to another member inside reply content.
pub static MEMBER_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a href="/member/(.*?)">"#).expect("MEMBER_MENTION regex")
});

// =============================================================================
// Profile Info Patterns
// =============================================================================

/// "V2EX 第 123 号会员" in the profile info block.
pub static MEMBER_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"V2EX\s第\s(\d+)").expect("MEMBER_NUMBER regex"));

/// "加入于 2012-01-01 00:00:00 +08:00" in the profile info block.
pub static JOINED_AT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"加入于\s(.+\+08:00)").expect("JOINED_AT regex"));

// =============================================================================
// Balance Patterns
// =============================================================================

/// One pattern per tier: the digits immediately before the tier's icon.
pub static BALANCE_TIER: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    BALANCE_TIERS.map(|tier| {
        Regex::new(&format!(r#"(\d+)\s<img\ssrc="/static/img/{tier}"#))
            .expect("BALANCE_TIER regex")
    })
});

// =============================================================================
// Inline Script State
// =============================================================================

/// `ignored_topics = [1,2,3]` in the feed page's inline script.
pub static IGNORED_TOPICS_ARRAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ignored_topics\s=\s\[(.+)\]").expect("IGNORED_TOPICS_ARRAY regex")
});

/// `blocked = [4,5]` in the feed page's inline script.
pub static BLOCKED_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"blocked\s=\s\[(.+)\]").expect("BLOCKED_ARRAY regex"));

// =============================================================================
// Timestamp Patterns
// =============================================================================

/// Full-precision site timestamp, with or without its offset suffix.
pub static SITE_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})(?: \+08:00)?$")
        .expect("SITE_TIMESTAMP regex")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_tier_patterns_follow_tier_order() {
        let html = r#"7 <img src="/static/img/silver@2x.png" alt="S">"#;
        assert!(!BALANCE_TIER[0].is_match(html));
        assert!(BALANCE_TIER[1].is_match(html));
        assert!(!BALANCE_TIER[2].is_match(html));
    }

    #[test]
    fn reply_row_id_requires_prefix() {
        assert!(REPLY_ROW_ID.is_match("r_42"));
        assert!(!REPLY_ROW_ID.is_match("Main"));
        assert!(!REPLY_ROW_ID.is_match("r_"));
    }

    #[test]
    fn joined_at_captures_through_offset() {
        let caps = JOINED_AT.captures("第 1 号会员，加入于 2011-05-06 12:00:00 +08:00 今日活跃度排名 12");
        assert_eq!(
            caps.and_then(|c| c.get(1)).map(|m| m.as_str()),
            Some("2011-05-06 12:00:00 +08:00")
        );
    }
}
