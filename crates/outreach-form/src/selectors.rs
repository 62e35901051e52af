//! Selector candidate lists and timing constants.
//!
//! Order encodes priority: the first structural match wins and the
//! remaining candidates are never tried for that field.

use outreach_core::FieldKind;
use std::time::Duration;

/// Ordered candidates for the email field.
pub const EMAIL_SELECTORS: &[&str] = &[
    r#"input[type="email"]"#,
    r#"input[name*="email" i]"#,
    r#"input[id*="email" i]"#,
    r#"input[placeholder*="email" i]"#,
];

/// Ordered candidates for the name field.
pub const NAME_SELECTORS: &[&str] = &[
    r#"input[name*="name" i]"#,
    r#"input[id*="name" i]"#,
    r#"input[placeholder*="name" i]"#,
    r#"input[autocomplete="name"]"#,
];

/// Ordered candidates for the message field.
pub const MESSAGE_SELECTORS: &[&str] = &[
    r#"textarea[name*="message" i]"#,
    r#"textarea[id*="message" i]"#,
    r#"textarea[placeholder*="message" i]"#,
    r#"textarea[name*="comment" i]"#,
    r#"input[name*="message" i]"#,
];

/// Ordered candidates for the phone field.
pub const PHONE_SELECTORS: &[&str] = &[
    r#"input[type="tel"]"#,
    r#"input[name*="phone" i]"#,
    r#"input[id*="phone" i]"#,
    r#"input[name*="tel" i]"#,
];

/// Ordered candidates for the company field.
pub const COMPANY_SELECTORS: &[&str] = &[
    r#"input[name*="company" i]"#,
    r#"input[id*="company" i]"#,
    r#"input[name*="organization" i]"#,
    r#"input[placeholder*="company" i]"#,
];

/// Candidate list for a logical field.
#[must_use]
pub fn candidates_for(field: FieldKind) -> &'static [&'static str] {
    match field {
        FieldKind::Email => EMAIL_SELECTORS,
        FieldKind::Name => NAME_SELECTORS,
        FieldKind::Message => MESSAGE_SELECTORS,
        FieldKind::Phone => PHONE_SELECTORS,
        FieldKind::Company => COMPANY_SELECTORS,
    }
}

/// Last-resort target for the message body when no candidate matched.
pub const FALLBACK_TEXTAREA: &str = "textarea";

/// Form presence probe on a freshly loaded page.
pub const FORM_SELECTOR: &str = "form";

/// A submit control candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitCandidate {
    /// Structural selector.
    Css(&'static str),
    /// Visible button text.
    ButtonText(&'static str),
}

/// Ordered submit control candidates. Explicit submit types first,
/// then common button labels.
pub const SUBMIT_CANDIDATES: &[SubmitCandidate] = &[
    SubmitCandidate::Css(r#"button[type="submit"]"#),
    SubmitCandidate::Css(r#"input[type="submit"]"#),
    SubmitCandidate::ButtonText("Send"),
    SubmitCandidate::ButtonText("Send Message"),
    SubmitCandidate::ButtonText("Submit"),
    SubmitCandidate::ButtonText("Contact Us"),
];

/// CAPTCHA-indicating markup: provider iframes and provider classes.
pub const CAPTCHA_SELECTORS: &[&str] = &[
    r#"iframe[src*="recaptcha"]"#,
    r#"iframe[src*="hcaptcha"]"#,
    ".g-recaptcha",
    ".h-captcha",
    r#"div[class*="captcha" i]"#,
];

/// Cool-down joined with a submit click.
pub const CLICK_SETTLE: Duration = Duration::from_millis(2500);

/// Cool-down after the Enter-key fallback.
pub const ENTER_SETTLE: Duration = Duration::from_millis(1500);

/// Settle delay between triggering submission and reading the page.
pub const POST_SUBMIT_SETTLE: Duration = Duration::from_millis(2000);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_types_come_first() {
        assert_eq!(EMAIL_SELECTORS[0], r#"input[type="email"]"#);
        assert_eq!(PHONE_SELECTORS[0], r#"input[type="tel"]"#);
        assert_eq!(
            SUBMIT_CANDIDATES[0],
            SubmitCandidate::Css(r#"button[type="submit"]"#)
        );
    }

    #[test]
    fn test_every_field_has_candidates() {
        for field in FieldKind::PRIORITY {
            assert!(!candidates_for(field).is_empty(), "no candidates for {field}");
        }
    }
}
