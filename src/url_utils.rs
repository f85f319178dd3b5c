//! URL Utility Functions
//!
//! Hrefs on the forum are almost always site-relative (`/go/rust`,
//! `/favorite/topic/1?once=123`). Relative hrefs are resolved against a
//! placeholder origin so the `url` crate can parse their query strings.

use std::sync::LazyLock;

use url::Url;

#[allow(clippy::expect_used)]
static PLACEHOLDER_ORIGIN: LazyLock<Url> =
    LazyLock::new(|| Url::parse("https://forum.invalid/").expect("placeholder origin"));

/// Parse an absolute or site-relative href.
#[must_use]
pub fn resolve(href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    match Url::parse(href) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => PLACEHOLDER_ORIGIN.join(href).ok(),
        Err(_) => None,
    }
}

/// Value of the query parameter `name`, `None` when the href or the
/// parameter is missing.
#[must_use]
pub fn query_param(href: &str, name: &str) -> Option<String> {
    let url = resolve(href)?;
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// The path segment that follows `prefix` in an href
/// (`/go/rust` -> `rust`, `https://host/member/alice` -> `alice`).
///
/// `None` when the href does not live under `prefix` or the key is empty.
#[must_use]
pub fn path_key(href: &str, prefix: &str) -> Option<String> {
    let url = resolve(href)?;
    let key = url.path().strip_prefix(prefix)?.split('/').next()?.trim();
    (!key.is_empty()).then(|| key.to_string())
}
