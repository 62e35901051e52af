use crate::driver::{PageDriver, PageFactory};
use crate::error::{BrowserError, Result};
use crate::fingerprint::FingerprintConfig;
use crate::session::PageSession;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::handler::viewport::Viewport;
use futures_util::stream::StreamExt;
use outreach_core::BrowserSettings;
use std::time::Duration;

/// Browser automation engine.
///
/// Launched once per process; hands out one exclusive page per request.
pub struct BrowserEngine {
    browser: Browser,
    settings: BrowserSettings,
}

impl BrowserEngine {
    /// Launch a headless browser with the given settings.
    pub async fn launch(settings: BrowserSettings) -> Result<Self> {
        let fingerprint = FingerprintConfig::for_settings(&settings);

        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .viewport(Some(Viewport {
                width: fingerprint.viewport_width,
                height: fingerprint.viewport_height,
                device_scale_factor: Some(1.0),
                ..Default::default()
            }))
            .args(vec![
                "--disable-dev-shm-usage".to_string(),
                "--disable-gpu".to_string(),
                format!("--user-agent={}", fingerprint.user_agent),
            ]);
        if !settings.headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(BrowserError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        // Drive the CDP event loop for the lifetime of the browser.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        tracing::info!(
            user_agent = %fingerprint.user_agent,
            headless = settings.headless,
            "browser launched"
        );

        Ok(Self { browser, settings })
    }

    /// Open a fresh page for one request.
    pub async fn new_session(&self) -> Result<PageSession> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::Launch(format!("failed to create page: {e}")))?;

        Ok(PageSession::new(
            page,
            Duration::from_millis(self.settings.type_delay_ms),
            Duration::from_secs(self.settings.navigation_timeout_secs),
        ))
    }
}

#[async_trait::async_trait]
impl PageFactory for BrowserEngine {
    async fn open_page(&self) -> Result<Box<dyn PageDriver>> {
        Ok(Box::new(self.new_session().await?))
    }
}
