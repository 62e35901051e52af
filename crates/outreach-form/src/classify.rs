//! CAPTCHA detection and post-submission outcome classification.

use crate::chain::first_match;
use crate::selectors::CAPTCHA_SELECTORS;
use outreach_browser::{PageDriver, Result};
use outreach_core::Verdict;
use regex::Regex;
use std::sync::OnceLock;

/// Reason attached to verdicts without a detectable confirmation.
pub const NO_SUCCESS_REASON: &str = "no success message";

/// Confirmation phrases, case-insensitive. English-only by design;
/// translated or unlisted confirmations classify as failures.
fn success_pattern() -> &'static Regex {
    static SUCCESS_PATTERN: OnceLock<Regex> = OnceLock::new();
    SUCCESS_PATTERN.get_or_init(|| {
        Regex::new(r"(?i)thank you|we received|message sent|thanks for contacting|we will contact you")
            .expect("valid regex")
    })
}

/// Whether the page carries CAPTCHA-indicating markup.
pub async fn detect_captcha(driver: &dyn PageDriver) -> bool {
    // Collect into an owned iterator rather than `.iter().copied()`: the
    // `Copied` adapter's `&str: Copy` bound cannot be pinned to a single
    // lifetime when this future is required to be `Send` (as it is behind
    // the axum handler), which otherwise trips a higher-ranked inference
    // error. Behaviour is identical — same candidates, same order.
    let candidates: Vec<&'static str> = CAPTCHA_SELECTORS.to_vec();
    first_match(candidates, |selector| async move {
        driver.exists(selector).await.then_some(selector)
    })
    .await
    .is_some()
}

/// Classify the page after a submission attempt.
///
/// Phrase-matching the rendered content is the only portable success
/// signal across sites with no common response schema; it is
/// approximate in both directions and documented as such.
pub async fn classify_submission(driver: &dyn PageDriver, clicked: bool) -> Result<Verdict> {
    let content = driver.content().await?;

    if success_pattern().is_match(&content) {
        return Ok(Verdict::success(clicked));
    }

    let screenshot = driver.screenshot_base64().await;
    Ok(Verdict::failure(clicked, NO_SUCCESS_REASON, screenshot))
}
