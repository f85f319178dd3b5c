//! Configuration for the listing extractor.
//!
//! Listing pages come in two families that share their cell markup but not
//! their needs. Node and tag indexes render relative times and show every
//! topic; the personalized feeds carry exact times in `title` attributes and
//! must hide what the viewer ignored or blocked. `ListOptions` describes the
//! difference so one traversal serves both.

/// Cell selector of node, tag and most index pages.
pub const DEFAULT_CELL_SELECTOR: &str = "#Main .box .cell.item";

/// Where a cell's last-touched time is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampSource {
    /// The rendered text ("3 小时前").
    #[default]
    VisibleText,
    /// The `title` attribute, with the site offset stripped.
    TitleAttribute,
}

/// Where a cell's author username is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UsernameSource {
    /// The `alt` of the avatar image.
    #[default]
    AvatarAlt,
    /// The text of the first member link in the topic info line.
    AnchorText,
}

/// Configuration options for listing extraction.
///
/// # Example
///
/// ```rust
/// use forum_scrape::{ListOptions, TimestampSource};
///
/// // Node index
/// let generic = ListOptions::default();
///
/// // Home feed, with ignore/block filtering
/// let feed = ListOptions::personalized("#Wrapper .box .cell.item");
/// assert_eq!(feed.timestamp_source, TimestampSource::TitleAttribute);
///
/// // Exact times, but no filtering
/// let custom = ListOptions {
///     timestamp_source: TimestampSource::TitleAttribute,
///     ..ListOptions::default()
/// };
/// assert!(!custom.apply_filters);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// CSS selector matching one element per listing cell.
    ///
    /// Default: [`DEFAULT_CELL_SELECTOR`]
    pub cell_selector: String,

    /// Default: [`TimestampSource::VisibleText`]
    pub timestamp_source: TimestampSource,

    /// Default: [`UsernameSource::AvatarAlt`]
    pub username_source: UsernameSource,

    /// Drop cells whose topic is in the page's `ignored_topics` array or
    /// whose sender is in its `blocked` array.
    ///
    /// Default: `false`
    pub apply_filters: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self::generic()
    }
}

impl ListOptions {
    /// Node/tag index pages.
    #[must_use]
    pub fn generic() -> Self {
        Self {
            cell_selector: DEFAULT_CELL_SELECTOR.to_string(),
            timestamp_source: TimestampSource::VisibleText,
            username_source: UsernameSource::AvatarAlt,
            apply_filters: false,
        }
    }

    /// Personalized feeds: exact times, anchor usernames, filtering on.
    #[must_use]
    pub fn personalized(cell_selector: impl Into<String>) -> Self {
        Self {
            cell_selector: cell_selector.into(),
            timestamp_source: TimestampSource::TitleAttribute,
            username_source: UsernameSource::AnchorText,
            apply_filters: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_generic_listing() {
        let options = ListOptions::default();
        assert_eq!(options.cell_selector, DEFAULT_CELL_SELECTOR);
        assert_eq!(options.timestamp_source, TimestampSource::VisibleText);
        assert_eq!(options.username_source, UsernameSource::AvatarAlt);
        assert!(!options.apply_filters);
    }

    #[test]
    fn personalized_preset() {
        let options = ListOptions::personalized(".cell.item");
        assert_eq!(options.cell_selector, ".cell.item");
        assert_eq!(options.username_source, UsernameSource::AnchorText);
        assert!(options.apply_filters);
    }
}
