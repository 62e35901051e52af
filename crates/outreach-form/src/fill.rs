//! Heuristic field filling.

use crate::chain::first_match;
use crate::selectors::{candidates_for, FALLBACK_TEXTAREA};
use outreach_browser::PageDriver;
use outreach_core::{FieldKind, FillOutcome, SubmissionRequest};

/// Fill every recognizable field with the request's values.
///
/// Fields are tried in priority order; a field whose value is absent is
/// skipped without an attempt. Within a field, the first candidate that
/// lands wins and the rest are never tried. One field failing never
/// stops the others.
pub async fn fill_fields(driver: &dyn PageDriver, request: &SubmissionRequest) -> FillOutcome {
    let mut outcome = FillOutcome::default();

    for field in FieldKind::PRIORITY {
        let Some(value) = request.value(field) else {
            continue;
        };

        // Owned iterator rather than `.iter().copied()`: the `Copied`
        // adapter's `&str: Copy` bound cannot be pinned to one lifetime
        // when this future must be `Send` (behind the axum handler),
        // which otherwise trips a higher-ranked inference error.
        // Behaviour is identical — same candidates, same order.
        let candidates: Vec<&'static str> = candidates_for(field).to_vec();
        let hit = first_match(candidates, |selector| async move {
            driver.clear_and_type(selector, value).await.then_some(selector)
        })
        .await;

        if let Some(selector) = hit {
            tracing::debug!(field = %field, selector, "field filled");
            outcome.mark(field);
        } else {
            tracing::debug!(field = %field, "no candidate matched");
        }
    }

    // Last resort: dump the message into the first bare textarea.
    if !outcome.is_filled(FieldKind::Message) {
        if let Some(message) = request.value(FieldKind::Message) {
            if driver.clear_and_type(FALLBACK_TEXTAREA, message).await {
                tracing::debug!("message filled via bare textarea fallback");
                outcome.mark(FieldKind::Message);
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakePage, PageFixture};
    use crate::selectors::{EMAIL_SELECTORS, MESSAGE_SELECTORS};

    const URL: &str = "https://site.test/contact";

    fn request() -> SubmissionRequest {
        SubmissionRequest {
            url: URL.to_string(),
            name: Some("Ada Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            message: Some("hello there".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_first_candidate_wins() {
        // Both the first and second email candidates exist; only the
        // first may be touched.
        let fake = FakePage::on_page(
            URL,
            PageFixture::new()
                .selector(EMAIL_SELECTORS[0])
                .selector(EMAIL_SELECTORS[1]),
        );

        let outcome = fill_fields(&fake, &request()).await;
        assert!(outcome.email);

        let email_writes: Vec<_> = fake
            .typed()
            .into_iter()
            .filter(|(_, value)| value == "ada@example.com")
            .collect();
        assert_eq!(
            email_writes,
            [(EMAIL_SELECTORS[0].to_string(), "ada@example.com".to_string())]
        );
    }

    #[tokio::test]
    async fn test_later_candidate_used_when_earlier_miss() {
        let fake = FakePage::on_page(
            URL,
            PageFixture::new().selector(EMAIL_SELECTORS[2]),
        );

        let outcome = fill_fields(&fake, &request()).await;
        assert!(outcome.email);
        assert_eq!(
            fake.typed()[0],
            (EMAIL_SELECTORS[2].to_string(), "ada@example.com".to_string())
        );
    }

    #[tokio::test]
    async fn test_absent_values_are_skipped() {
        let fake = FakePage::on_page(
            URL,
            PageFixture::new()
                .selector(EMAIL_SELECTORS[0])
                .selector(r#"input[type="tel"]"#),
        );

        let request = SubmissionRequest {
            url: URL.to_string(),
            email: Some("ada@example.com".to_string()),
            ..Default::default()
        };

        let outcome = fill_fields(&fake, &request).await;
        assert!(outcome.email);
        assert!(!outcome.phone);
        // No phone value, so the phone input is never touched.
        assert_eq!(fake.typed().len(), 1);
    }

    #[tokio::test]
    async fn test_one_field_missing_does_not_stop_others() {
        // No email input anywhere; name and message still land.
        let fake = FakePage::on_page(
            URL,
            PageFixture::new()
                .selector(r#"input[name*="name" i]"#)
                .selector(MESSAGE_SELECTORS[0]),
        );

        let outcome = fill_fields(&fake, &request()).await;
        assert!(!outcome.email);
        assert!(outcome.name);
        assert!(outcome.message);
        assert_eq!(outcome.filled_count(), 2);
    }

    #[tokio::test]
    async fn test_message_fallback_to_bare_textarea() {
        let fake = FakePage::on_page(URL, PageFixture::new().selector(FALLBACK_TEXTAREA));

        let outcome = fill_fields(&fake, &request()).await;
        assert!(outcome.message);
        assert_eq!(
            fake.typed(),
            [(FALLBACK_TEXTAREA.to_string(), "hello there".to_string())]
        );
    }

    #[tokio::test]
    async fn test_no_fallback_when_message_already_filled() {
        let fake = FakePage::on_page(
            URL,
            PageFixture::new()
                .selector(MESSAGE_SELECTORS[0])
                .selector(FALLBACK_TEXTAREA),
        );

        let outcome = fill_fields(&fake, &request()).await;
        assert!(outcome.message);

        let targets: Vec<_> = fake.typed().into_iter().map(|(sel, _)| sel).collect();
        assert!(!targets.contains(&FALLBACK_TEXTAREA.to_string()));
    }

    #[tokio::test]
    async fn test_empty_page_fills_nothing() {
        let fake = FakePage::on_page(URL, PageFixture::new());

        let outcome = fill_fields(&fake, &request()).await;
        assert_eq!(outcome.filled_count(), 0);
        assert!(fake.typed().is_empty());
    }
}
