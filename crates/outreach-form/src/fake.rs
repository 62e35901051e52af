//! Scripted in-memory page driver for heuristics tests.
//!
//! Fixtures register which selector strings "exist" on a page; the
//! engine under test is exercised against exact candidate strings, so
//! no CSS matching is emulated. Every probe and action is recorded so
//! tests can assert what was (and was not) attempted.

use outreach_browser::{Anchor, BrowserError, PageDriver, Result};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// One page's scripted state.
#[derive(Debug, Clone, Default)]
pub struct PageFixture {
    /// Selector strings that resolve to an element on this page.
    pub selectors: HashSet<String>,
    /// Anchors returned by enumeration.
    pub anchors: Vec<Anchor>,
    /// Visible labels of button-like controls.
    pub buttons: Vec<String>,
    /// Rendered content.
    pub content: String,
    /// Content the page swaps to after any submit action.
    pub content_after_submit: Option<String>,
}

impl PageFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selector(mut self, selector: &str) -> Self {
        self.selectors.insert(selector.to_string());
        self
    }

    pub fn anchor(mut self, href: &str, text: &str) -> Self {
        self.anchors.push(Anchor {
            href: href.to_string(),
            text: text.to_string(),
        });
        self
    }

    pub fn button(mut self, label: &str) -> Self {
        self.buttons.push(label.to_string());
        self
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }

    pub fn after_submit(mut self, content: &str) -> Self {
        self.content_after_submit = Some(content.to_string());
        self
    }

    // Same matching rule as the real driver's JS: case-insensitive
    // equals-or-contains on the visible label.
    fn has_button(&self, label: &str) -> bool {
        let wanted = label.to_lowercase();
        self.buttons
            .iter()
            .any(|button| button.to_lowercase().contains(&wanted))
    }
}

#[derive(Debug, Default)]
struct Inner {
    pages: HashMap<String, PageFixture>,
    current: Option<String>,
    navigations: Vec<String>,
    typed: Vec<(String, String)>,
    clicked: Vec<String>,
    probes: Vec<String>,
    button_probes: Vec<String>,
    enter_presses: usize,
    enter_works: bool,
}

/// Scripted [`PageDriver`] with full action recording.
pub struct FakePage {
    inner: Mutex<Inner>,
}

impl FakePage {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                enter_works: true,
                ..Default::default()
            }),
        }
    }

    /// A driver already navigated to `url` with the given fixture.
    pub fn on_page(url: &str, fixture: PageFixture) -> Self {
        let fake = Self::new();
        fake.add_page(url, fixture);
        fake.inner.lock().unwrap().current = Some(url.to_string());
        fake
    }

    pub fn add_page(&self, url: &str, fixture: PageFixture) {
        self.inner
            .lock()
            .unwrap()
            .pages
            .insert(url.to_string(), fixture);
    }

    /// Make the Enter-key fallback fail.
    pub fn break_enter(&self) {
        self.inner.lock().unwrap().enter_works = false;
    }

    pub fn navigations(&self) -> Vec<String> {
        self.inner.lock().unwrap().navigations.clone()
    }

    pub fn typed(&self) -> Vec<(String, String)> {
        self.inner.lock().unwrap().typed.clone()
    }

    pub fn clicked(&self) -> Vec<String> {
        self.inner.lock().unwrap().clicked.clone()
    }

    /// Every selector passed to `exists`.
    pub fn probes(&self) -> Vec<String> {
        self.inner.lock().unwrap().probes.clone()
    }

    /// Every label passed to `has_button_with_text`.
    pub fn button_probes(&self) -> Vec<String> {
        self.inner.lock().unwrap().button_probes.clone()
    }

    pub fn enter_presses(&self) -> usize {
        self.inner.lock().unwrap().enter_presses
    }

    fn with_current<T>(&self, f: impl FnOnce(&PageFixture) -> T) -> Option<T> {
        let inner = self.inner.lock().unwrap();
        let url = inner.current.as_ref()?;
        inner.pages.get(url).map(f)
    }

    fn apply_submit_side_effect(inner: &mut Inner) {
        let Some(url) = inner.current.clone() else {
            return;
        };
        if let Some(fixture) = inner.pages.get_mut(&url) {
            if let Some(after) = fixture.content_after_submit.take() {
                fixture.content = after;
            }
        }
    }
}

#[async_trait::async_trait]
impl PageDriver for FakePage {
    async fn goto(&self, url: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.navigations.push(url.to_string());
        if inner.pages.contains_key(url) {
            inner.current = Some(url.to_string());
            Ok(())
        } else {
            Err(BrowserError::Navigation(format!("no fixture for {url}")))
        }
    }

    async fn exists(&self, selector: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();
        inner.probes.push(selector.to_string());
        let Some(url) = inner.current.as_ref() else {
            return false;
        };
        inner
            .pages
            .get(url)
            .is_some_and(|fixture| fixture.selectors.contains(selector))
    }

    async fn clear_and_type(&self, selector: &str, value: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let Some(url) = inner.current.clone() else {
            return false;
        };
        let hit = inner
            .pages
            .get(&url)
            .is_some_and(|fixture| fixture.selectors.contains(selector));
        if hit {
            inner.typed.push((selector.to_string(), value.to_string()));
        }
        hit
    }

    async fn click(&self, selector: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let Some(url) = inner.current.clone() else {
            return false;
        };
        let hit = inner
            .pages
            .get(&url)
            .is_some_and(|fixture| fixture.selectors.contains(selector));
        if hit {
            inner.clicked.push(selector.to_string());
            Self::apply_submit_side_effect(&mut inner);
        }
        hit
    }

    async fn has_button_with_text(&self, label: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();
        inner.button_probes.push(label.to_string());
        let Some(url) = inner.current.as_ref() else {
            return false;
        };
        inner
            .pages
            .get(url)
            .is_some_and(|fixture| fixture.has_button(label))
    }

    async fn click_button_with_text(&self, label: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let Some(url) = inner.current.clone() else {
            return false;
        };
        let hit = inner
            .pages
            .get(&url)
            .is_some_and(|fixture| fixture.has_button(label));
        if hit {
            inner.clicked.push(format!("text:{label}"));
            Self::apply_submit_side_effect(&mut inner);
        }
        hit
    }

    async fn press_enter(&self) -> bool {
        let mut inner = self.inner.lock().unwrap();
        inner.enter_presses += 1;
        if inner.enter_works {
            Self::apply_submit_side_effect(&mut inner);
        }
        inner.enter_works
    }

    async fn anchors(&self) -> Vec<Anchor> {
        self.with_current(|fixture| fixture.anchors.clone())
            .unwrap_or_default()
    }

    async fn content(&self) -> Result<String> {
        self.with_current(|fixture| fixture.content.clone())
            .ok_or_else(|| BrowserError::Content("no page loaded".to_string()))
    }

    async fn screenshot_base64(&self) -> Option<String> {
        Some("c2NyZWVuc2hvdA==".to_string())
    }
}
