//! Page byte decoding.
//!
//! The fetch layer may hand over raw response bytes. The forum serves UTF-8,
//! but mirrors and saved pages sometimes declare another charset in a
//! `<meta>` tag; honour it and fall back to UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// `<meta charset="...">` or the charset parameter of an http-equiv content type.
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s;>]+)"#).expect("META_CHARSET regex")
});

/// Number of leading bytes searched for a charset declaration.
const SNIFF_LEN: usize = 2048;

/// Encoding declared in the document head, defaulting to UTF-8.
#[must_use]
pub fn sniff_encoding(html: &[u8]) -> &'static Encoding {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);

    META_CHARSET
        .captures(&head)
        .and_then(|c| c.get(1))
        .and_then(|label| Encoding::for_label(label.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode page bytes to a UTF-8 string.
///
/// Invalid sequences become U+FFFD instead of failing the page.
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = sniff_encoding(html);

    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }

    let (decoded, _, had_errors) = encoding.decode(html);
    debug!(encoding = encoding.name(), had_errors, "transcoded page bytes");
    decoded.into_owned()
}
