//! Request, outcome, and verdict types shared across the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Payload for one submission attempt.
///
/// Only `url` is required; every other value is filled into the target
/// form on a best-effort basis. A missing `url` deserializes to an empty
/// string so the server can reject it as a client error rather than a
/// deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionRequest {
    /// Target site to submit against.
    pub url: String,
    /// Sender name.
    pub name: Option<String>,
    /// Sender email address.
    pub email: Option<String>,
    /// Message body.
    pub message: Option<String>,
    /// Sender phone number.
    pub phone: Option<String>,
    /// Sender company or organization.
    pub company: Option<String>,
}

impl SubmissionRequest {
    /// Whether the required `url` is present and non-empty.
    #[must_use]
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// The value for a logical field, if present and non-empty.
    #[must_use]
    pub fn value(&self, field: FieldKind) -> Option<&str> {
        let value = match field {
            FieldKind::Email => self.email.as_deref(),
            FieldKind::Name => self.name.as_deref(),
            FieldKind::Message => self.message.as_deref(),
            FieldKind::Phone => self.phone.as_deref(),
            FieldKind::Company => self.company.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

/// Logical form fields the fill heuristics know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Email,
    Name,
    Message,
    Phone,
    Company,
}

impl FieldKind {
    /// Fill order. Email first: it is the most reliably recognizable
    /// field and the one most forms require.
    pub const PRIORITY: [FieldKind; 5] = [
        FieldKind::Email,
        FieldKind::Name,
        FieldKind::Message,
        FieldKind::Phone,
        FieldKind::Company,
    ];

    /// Stable key used in logs and the fill outcome.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Name => "name",
            Self::Message => "message",
            Self::Phone => "phone",
            Self::Company => "company",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Which logical fields were located and populated.
///
/// Flags are only ever set, never retracted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillOutcome {
    pub email: bool,
    pub name: bool,
    pub message: bool,
    pub phone: bool,
    pub company: bool,
}

impl FillOutcome {
    /// Mark a field as filled.
    pub fn mark(&mut self, field: FieldKind) {
        match field {
            FieldKind::Email => self.email = true,
            FieldKind::Name => self.name = true,
            FieldKind::Message => self.message = true,
            FieldKind::Phone => self.phone = true,
            FieldKind::Company => self.company = true,
        }
    }

    /// Whether a field has been filled.
    #[must_use]
    pub fn is_filled(&self, field: FieldKind) -> bool {
        match field {
            FieldKind::Email => self.email,
            FieldKind::Name => self.name,
            FieldKind::Message => self.message,
            FieldKind::Phone => self.phone,
            FieldKind::Company => self.company,
        }
    }

    /// Number of filled fields.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        FieldKind::PRIORITY
            .iter()
            .filter(|field| self.is_filled(**field))
            .count()
    }
}

/// Final classification of a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Post-submit content contained a confirmation phrase.
    Success,
    /// CAPTCHA markup found before submission; nothing was submitted.
    CaptchaDetected,
    /// Submission attempted (or not) without a detectable confirmation.
    Failure,
}

/// Result of one full submission attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Final classification.
    pub outcome: Outcome,
    /// Whether some submit action was triggered. Does not imply the
    /// site accepted it.
    pub clicked: bool,
    /// Human-readable reason; absent on success.
    pub reason: Option<String>,
    /// Base64-encoded PNG, attached only when the outcome is not a
    /// success.
    pub screenshot: Option<String>,
}

impl Verdict {
    /// A successful submission.
    #[must_use]
    pub fn success(clicked: bool) -> Self {
        Self {
            outcome: Outcome::Success,
            clicked,
            reason: None,
            screenshot: None,
        }
    }

    /// A CAPTCHA block. Terminal, not an error.
    #[must_use]
    pub fn captcha(screenshot: Option<String>) -> Self {
        Self {
            outcome: Outcome::CaptchaDetected,
            clicked: false,
            reason: Some("captcha detected".to_string()),
            screenshot,
        }
    }

    /// A failed or unconfirmed submission.
    #[must_use]
    pub fn failure(
        clicked: bool,
        reason: impl Into<String>,
        screenshot: Option<String>,
    ) -> Self {
        Self {
            outcome: Outcome::Failure,
            clicked,
            reason: Some(reason.into()),
            screenshot,
        }
    }

    /// Whether the attempt was classified as successful.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    /// Whether the attempt was blocked by a CAPTCHA.
    #[must_use]
    pub fn is_captcha(&self) -> bool {
        self.outcome == Outcome::CaptchaDetected
    }
}

/// Wire format returned by `POST /submit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub captcha: bool,
    pub clicked: bool,
    pub reason: Option<String>,
    pub screenshot: Option<String>,
}

impl SubmitResponse {
    /// Response body for requests rejected before any browser work.
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            captcha: false,
            clicked: false,
            reason: Some(reason.into()),
            screenshot: None,
        }
    }
}

impl From<Verdict> for SubmitResponse {
    fn from(verdict: Verdict) -> Self {
        Self {
            success: verdict.is_success(),
            captcha: verdict.is_captcha(),
            clicked: verdict.clicked,
            reason: verdict.reason,
            screenshot: verdict.screenshot,
        }
    }
}
