//! Link resolution against a base URL.

use url::Url;

/// Resolve a possibly-relative href against a base URL.
///
/// Absolute hrefs override the base; relative hrefs are joined;
/// fragment-only hrefs resolve to base plus fragment. Returns `None`
/// on malformed input; callers treat that as "skip this candidate."
#[must_use]
pub fn resolve(base: &str, href: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    base.join(href).ok().map(|url| url.to_string())
}
