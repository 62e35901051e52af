//! End-to-end submission pipeline.

use crate::classify::{classify_submission, detect_captcha};
use crate::fill::fill_fields;
use crate::locate::locate_contact_page;
use crate::selectors::{FORM_SELECTOR, POST_SUBMIT_SETTLE};
use crate::submit::trigger_submit;
use outreach_browser::{PageDriver, Result};
use outreach_core::{SubmissionRequest, Verdict};

/// Run one submission attempt end to end.
///
/// Only navigation to the target and content reads are hard failures;
/// every heuristic miss inside degrades to the next step. The caller
/// owns the page's lifecycle and must release it on every exit path.
pub async fn run_submission(
    driver: &dyn PageDriver,
    request: &SubmissionRequest,
) -> Result<Verdict> {
    driver.goto(&request.url).await?;

    if !driver.exists(FORM_SELECTOR).await {
        let moved = locate_contact_page(driver, &request.url).await;
        tracing::debug!(moved, "no form on landing page, tried contact link");
    }

    let fill = fill_fields(driver, request).await;
    tracing::debug!(filled = fill.filled_count(), "field fill finished");

    if detect_captcha(driver).await {
        tracing::info!(url = %request.url, "captcha detected, skipping submission");
        return Ok(Verdict::captcha(driver.screenshot_base64().await));
    }

    let clicked = trigger_submit(driver).await;
    tokio::time::sleep(POST_SUBMIT_SETTLE).await;

    classify_submission(driver, clicked).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakePage, PageFixture};
    use crate::selectors::{SubmitCandidate, SUBMIT_CANDIDATES};

    const LANDING: &str = "https://site.test/";
    const CONTACT: &str = "https://site.test/contact";

    fn request() -> SubmissionRequest {
        SubmissionRequest {
            url: LANDING.to_string(),
            email: Some("a@b.com".to_string()),
            message: Some("hi".to_string()),
            ..Default::default()
        }
    }

    fn contact_form() -> PageFixture {
        PageFixture::new()
            .selector("form")
            .selector(r#"input[name*="email" i]"#)
            .selector(r#"textarea[name*="message" i]"#)
            .button("Send")
            .content("<form>...</form>")
            .after_submit("<h1>Thank you</h1>")
    }

    // Scenario A: form on the landing page, "Send" button, post-submit
    // content confirms.
    #[tokio::test(start_paused = true)]
    async fn test_direct_form_submission_succeeds() {
        let fake = FakePage::new();
        fake.add_page(LANDING, contact_form());

        let verdict = run_submission(&fake, &request()).await.expect("pipeline");
        assert!(verdict.is_success());
        assert!(verdict.clicked);
        assert!(verdict.reason.is_none());

        let typed: Vec<_> = fake.typed().into_iter().map(|(sel, _)| sel).collect();
        assert_eq!(
            typed,
            [r#"input[name*="email" i]"#, r#"textarea[name*="message" i]"#]
        );
        assert_eq!(fake.clicked(), ["text:Send"]);
    }

    // Scenario B: landing page has no form, a "Contact Us" link leads to
    // the page that does.
    #[tokio::test(start_paused = true)]
    async fn test_contact_link_hop_then_success() {
        let fake = FakePage::new();
        fake.add_page(
            LANDING,
            PageFixture::new()
                .anchor("/about", "About")
                .anchor("/contact", "Contact Us"),
        );
        fake.add_page(CONTACT, contact_form());

        let verdict = run_submission(&fake, &request()).await.expect("pipeline");
        assert!(verdict.is_success());
        assert_eq!(fake.navigations(), [LANDING, CONTACT]);
        // The fill must happen after the hop, on the contact page.
        assert!(!fake.typed().is_empty());
    }

    // Scenario C: CAPTCHA markup blocks everything after the fill.
    #[tokio::test(start_paused = true)]
    async fn test_captcha_short_circuits_submission() {
        let fake = FakePage::new();
        fake.add_page(
            LANDING,
            contact_form().selector(".g-recaptcha"),
        );

        let verdict = run_submission(&fake, &request()).await.expect("pipeline");
        assert!(verdict.is_captcha());
        assert!(!verdict.is_success());
        assert!(!verdict.clicked);
        assert_eq!(verdict.reason.as_deref(), Some("captcha detected"));
        assert!(verdict.screenshot.is_some());

        // The submission trigger must never run: no submit-selector
        // probes, no button-text probes, no clicks, no Enter.
        let submit_css: Vec<_> = SUBMIT_CANDIDATES
            .iter()
            .filter_map(|candidate| match candidate {
                SubmitCandidate::Css(selector) => Some(selector.to_string()),
                SubmitCandidate::ButtonText(_) => None,
            })
            .collect();
        assert!(fake.probes().iter().all(|probe| !submit_css.contains(probe)));
        assert!(fake.button_probes().is_empty());
        assert!(fake.clicked().is_empty());
        assert_eq!(fake.enter_presses(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_confirmation_is_failure() {
        let fake = FakePage::new();
        fake.add_page(
            LANDING,
            PageFixture::new()
                .selector("form")
                .selector(r#"input[name*="email" i]"#)
                .button("Send")
                .content("<form>...</form>")
                .after_submit("<h1>Something went wrong</h1>"),
        );

        let verdict = run_submission(&fake, &request()).await.expect("pipeline");
        assert!(!verdict.is_success());
        assert!(verdict.clicked);
        assert_eq!(verdict.reason.as_deref(), Some("no success message"));
        assert!(verdict.screenshot.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigation_failure_is_hard_error() {
        let fake = FakePage::new(); // no fixture for the landing URL

        let result = run_submission(&fake, &request()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_form_anywhere_still_attempts() {
        // Nothing to find and nothing to fill; Enter fallback fires and
        // the unchanged content yields a failure verdict.
        let fake = FakePage::new();
        fake.add_page(
            LANDING,
            PageFixture::new().content("<p>landing</p>"),
        );

        let verdict = run_submission(&fake, &request()).await.expect("pipeline");
        assert!(!verdict.is_success());
        assert!(verdict.clicked);
        assert_eq!(fake.enter_presses(), 1);
    }
}
