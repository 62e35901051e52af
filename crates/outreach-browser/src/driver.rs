use crate::error::Result;
use serde::{Deserialize, Serialize};

/// An anchor element with its derived attributes, captured in one DOM pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    /// Raw `href` attribute, possibly relative or empty.
    pub href: String,
    /// Trimmed visible text.
    pub text: String,
}

/// Page-level browser capability the heuristics are written against.
///
/// Probe-style methods return `bool`/`Option`/empty collections on a
/// miss: a selector that matches nothing is an expected outcome, not an
/// error. Only navigation and content reads are hard failures.
#[async_trait::async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate to a URL and wait for basic DOM readiness.
    async fn goto(&self, url: &str) -> Result<()>;

    /// Whether any element matches the selector.
    async fn exists(&self, selector: &str) -> bool;

    /// Clear the first element matching the selector, then type the
    /// value into it keystroke by keystroke. False when nothing matched
    /// or the element rejected input.
    async fn clear_and_type(&self, selector: &str, value: &str) -> bool;

    /// Click the first element matching the selector.
    async fn click(&self, selector: &str) -> bool;

    /// Whether a button-like control with the given visible text exists.
    async fn has_button_with_text(&self, label: &str) -> bool;

    /// Click the first button-like control with the given visible text.
    async fn click_button_with_text(&self, label: &str) -> bool;

    /// Dispatch an Enter key event to the focused element.
    async fn press_enter(&self) -> bool;

    /// All anchors on the page with href and visible text.
    async fn anchors(&self) -> Vec<Anchor>;

    /// Full rendered page content.
    async fn content(&self) -> Result<String>;

    /// Screenshot of the page as base64-encoded PNG.
    async fn screenshot_base64(&self) -> Option<String>;

    /// Release the underlying page. Idempotent.
    async fn close(&self) {}
}

/// Produces one exclusive page per request.
#[async_trait::async_trait]
pub trait PageFactory: Send + Sync {
    /// Open a fresh page with its own lifecycle.
    async fn open_page(&self) -> Result<Box<dyn PageDriver>>;
}
