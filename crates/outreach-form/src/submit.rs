//! Submission triggering.

use crate::chain::first_match;
use crate::selectors::{SubmitCandidate, CLICK_SETTLE, ENTER_SETTLE, SUBMIT_CANDIDATES};
use outreach_browser::PageDriver;

/// Try to trigger form submission.
///
/// Returns true iff some submission action was taken; the site may
/// still have rejected it. The click runs joined with a fixed cool-down
/// so the page's own async reactions overlap the wait.
pub async fn trigger_submit(driver: &dyn PageDriver) -> bool {
    let found = first_match(SUBMIT_CANDIDATES.iter().copied(), |candidate| async move {
        let present = match candidate {
            SubmitCandidate::Css(selector) => driver.exists(selector).await,
            SubmitCandidate::ButtonText(label) => driver.has_button_with_text(label).await,
        };
        present.then_some(candidate)
    })
    .await;

    if let Some(candidate) = found {
        tracing::debug!(?candidate, "submit control found");
        let click = async {
            match candidate {
                SubmitCandidate::Css(selector) => driver.click(selector).await,
                SubmitCandidate::ButtonText(label) => driver.click_button_with_text(label).await,
            }
        };
        let (clicked, ()) = tokio::join!(click, tokio::time::sleep(CLICK_SETTLE));
        if !clicked {
            tracing::debug!(?candidate, "submit control vanished before click");
        }
        return true;
    }

    // No recognizable control; a bare Enter submits many single-field forms.
    if driver.press_enter().await {
        tracing::debug!("submitted via Enter fallback");
        tokio::time::sleep(ENTER_SETTLE).await;
        return true;
    }

    false
}
