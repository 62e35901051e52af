//! Contact page discovery.
//!
//! When a landing page has no form, we look for a contact link using an
//! ordered pattern list, then a case-insensitive fallback scan. Both
//! passes run over one anchor enumeration snapshot, so the worst case
//! costs a single DOM traversal.

use crate::chain::first_match;
use crate::resolve::resolve;
use outreach_browser::{Anchor, PageDriver};

/// Anchor-matching patterns, tried in order. Structural hints first for
/// precision; text patterns match the literal casing sites actually use
/// for their navigation labels, the fallback scan below catches the rest.
#[derive(Debug, Clone, Copy)]
enum LinkPattern {
    /// href contains the needle, case-insensitive.
    HrefContains(&'static str),
    /// Trimmed visible text equals the label exactly.
    TextEquals(&'static str),
    /// Visible text contains the label exactly.
    TextContains(&'static str),
    /// href starts with the prefix, case-insensitive.
    HrefStartsWith(&'static str),
}

const CONTACT_PATTERNS: &[LinkPattern] = &[
    LinkPattern::HrefContains("contact"),
    LinkPattern::TextEquals("Contact"),
    LinkPattern::TextEquals("Contact Us"),
    LinkPattern::TextEquals("Get in touch"),
    LinkPattern::TextContains("Contact"),
    LinkPattern::HrefStartsWith("/contact"),
    LinkPattern::HrefStartsWith("#contact"),
];

impl LinkPattern {
    fn matches(&self, anchor: &Anchor) -> bool {
        match self {
            Self::HrefContains(needle) => anchor.href.to_lowercase().contains(needle),
            Self::TextEquals(wanted) => anchor.text.trim() == *wanted,
            Self::TextContains(needle) => anchor.text.contains(needle),
            Self::HrefStartsWith(prefix) => anchor.href.to_lowercase().starts_with(prefix),
        }
    }
}

/// Try to navigate to a contact-specific page.
///
/// Returns true as soon as a candidate link was followed; navigation
/// errors are swallowed, since a partially loaded contact page is still
/// worth attempting a fill on. Returns false with the page untouched
/// when nothing matched.
pub async fn locate_contact_page(driver: &dyn PageDriver, base_url: &str) -> bool {
    let anchors = driver.anchors().await;
    if anchors.is_empty() {
        return false;
    }

    let mut target = first_match(CONTACT_PATTERNS.iter().copied(), |pattern| {
        let anchors = &anchors;
        async move {
            anchors
                .iter()
                .find(|anchor| pattern.matches(anchor))
                .and_then(|anchor| resolve(base_url, &anchor.href))
        }
    })
    .await;

    // Fallback scan: any anchor mentioning contact in any casing.
    if target.is_none() {
        target = anchors
            .iter()
            .find(|anchor| {
                anchor.text.to_lowercase().contains("contact")
                    || anchor.href.to_lowercase().contains("contact")
            })
            .and_then(|anchor| resolve(base_url, &anchor.href));
    }

    let Some(target) = target else {
        return false;
    };

    if let Err(error) = driver.goto(&target).await {
        tracing::debug!(%target, %error, "contact page navigation failed");
    }
    true
}
