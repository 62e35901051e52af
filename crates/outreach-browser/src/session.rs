use crate::driver::{Anchor, PageDriver};
use crate::error::{BrowserError, Result};
use base64::engine::general_purpose;
use base64::Engine as _;
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType,
};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// One exclusive page, held for the duration of a single request.
///
/// Release is guaranteed on every exit path: callers close explicitly,
/// and `Drop` spawns a background close as a fallback. chromiumoxide
/// pages hold CDP connections until closed, so leaking them would
/// eventually exhaust the browser under load.
pub struct PageSession {
    page: Page,
    type_delay: Duration,
    navigation_timeout: Duration,
    closed: AtomicBool,
}

impl PageSession {
    pub(crate) fn new(page: Page, type_delay: Duration, navigation_timeout: Duration) -> Self {
        Self {
            page,
            type_delay,
            navigation_timeout,
            closed: AtomicBool::new(false),
        }
    }

    /// JSON-quote a string for safe embedding in an evaluate script.
    fn quote(value: &str) -> String {
        serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
    }

    async fn evaluate_bool(&self, script: String) -> bool {
        match self.page.evaluate(script).await {
            Ok(result) => result.into_value::<bool>().unwrap_or(false),
            Err(_) => false,
        }
    }

    async fn dispatch_enter(&self, event_type: DispatchKeyEventType, with_text: bool) -> bool {
        let mut builder = DispatchKeyEventParams::builder()
            .r#type(event_type)
            .key("Enter".to_string())
            .code("Enter".to_string())
            .windows_virtual_key_code(13)
            .native_virtual_key_code(13);
        if with_text {
            builder = builder.text("\r".to_string());
        }
        let Ok(params) = builder.build() else {
            return false;
        };
        self.page.execute(params).await.is_ok()
    }
}

#[async_trait::async_trait]
impl PageDriver for PageSession {
    async fn goto(&self, url: &str) -> Result<()> {
        let navigation = async {
            self.page
                .goto(url)
                .await
                .map_err(|e| BrowserError::Navigation(e.to_string()))?;
            self.page
                .wait_for_navigation()
                .await
                .map_err(|e| BrowserError::Navigation(e.to_string()))?;
            Ok(())
        };

        match tokio::time::timeout(self.navigation_timeout, navigation).await {
            Ok(result) => result,
            Err(_) => Err(BrowserError::NavigationTimeout {
                url: url.to_string(),
                timeout_secs: self.navigation_timeout.as_secs(),
            }),
        }
    }

    async fn exists(&self, selector: &str) -> bool {
        self.page.find_element(selector).await.is_ok()
    }

    async fn clear_and_type(&self, selector: &str, value: &str) -> bool {
        let Ok(element) = self.page.find_element(selector).await else {
            return false;
        };
        if element.click().await.is_err() {
            return false;
        }

        let clear = format!(
            "(() => {{ const el = document.querySelector({sel}); if (el) {{ el.value = ''; }} }})()",
            sel = Self::quote(selector)
        );
        let _ = self.page.evaluate(clear).await;

        // Keystroke by keystroke; instantaneous input is suppressed by
        // some form frameworks.
        for ch in value.chars() {
            let Ok(params) = DispatchKeyEventParams::builder()
                .r#type(DispatchKeyEventType::Char)
                .text(ch.to_string())
                .build()
            else {
                return false;
            };
            if self.page.execute(params).await.is_err() {
                return false;
            }
            tokio::time::sleep(self.type_delay).await;
        }
        true
    }

    async fn click(&self, selector: &str) -> bool {
        let Ok(element) = self.page.find_element(selector).await else {
            return false;
        };
        element.click().await.is_ok()
    }

    async fn has_button_with_text(&self, label: &str) -> bool {
        let script = format!(
            r#"(() => {{
                const wanted = {label}.trim().toLowerCase();
                const controls = Array.from(document.querySelectorAll(
                    'button, input[type="submit"], input[type="button"], a[role="button"]'));
                const text = el => ((el.tagName === 'INPUT' ? el.value : el.innerText || el.textContent) || '')
                    .trim().toLowerCase();
                return controls.some(el => text(el) === wanted || text(el).includes(wanted));
            }})()"#,
            label = Self::quote(label)
        );
        self.evaluate_bool(script).await
    }

    async fn click_button_with_text(&self, label: &str) -> bool {
        let script = format!(
            r#"(() => {{
                const wanted = {label}.trim().toLowerCase();
                const controls = Array.from(document.querySelectorAll(
                    'button, input[type="submit"], input[type="button"], a[role="button"]'));
                const text = el => ((el.tagName === 'INPUT' ? el.value : el.innerText || el.textContent) || '')
                    .trim().toLowerCase();
                const target = controls.find(el => text(el) === wanted || text(el).includes(wanted));
                if (!target) return false;
                target.click();
                return true;
            }})()"#,
            label = Self::quote(label)
        );
        self.evaluate_bool(script).await
    }

    async fn press_enter(&self) -> bool {
        self.dispatch_enter(DispatchKeyEventType::KeyDown, false).await
            && self.dispatch_enter(DispatchKeyEventType::Char, true).await
            && self.dispatch_enter(DispatchKeyEventType::KeyUp, false).await
    }

    async fn anchors(&self) -> Vec<Anchor> {
        let script = r#"Array.from(document.querySelectorAll('a')).map(a => ({
            href: a.getAttribute('href') || '',
            text: (a.innerText || a.textContent || '').trim()
        }))"#;

        match self.page.evaluate(script).await {
            Ok(result) => result.into_value::<Vec<Anchor>>().unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    async fn content(&self) -> Result<String> {
        self.page
            .content()
            .await
            .map_err(|e| BrowserError::Content(e.to_string()))
    }

    async fn screenshot_base64(&self) -> Option<String> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build();

        match self.page.screenshot(params).await {
            Ok(bytes) => Some(general_purpose::STANDARD.encode(bytes)),
            Err(error) => {
                tracing::debug!(%error, "screenshot capture failed");
                None
            }
        }
    }

    async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Err(error) = self.page.clone().close().await {
            tracing::warn!(%error, "failed to close page");
        }
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        let page = self.page.clone();
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                let _ = page.close().await;
            });
        }
    }
}
