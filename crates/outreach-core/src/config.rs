//! Process configuration.
//!
//! All settings have working defaults and can be overridden through
//! environment variables at startup. Nothing is reloaded at runtime.

use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Browser automation settings
    pub browser: BrowserSettings,
}

impl AppConfig {
    /// Build configuration from defaults plus environment overrides.
    ///
    /// Supported variables:
    /// - `OUTREACH_PORT`: listening port
    /// - `OUTREACH_USER_AGENT`: outbound user-agent string
    /// - `OUTREACH_HEADLESS`: run the browser headless (true/false)
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("OUTREACH_PORT") {
            if let Ok(port) = val.parse() {
                config.server.port = port;
                tracing::debug!(port, "override server.port from env");
            }
        }

        if let Ok(val) = std::env::var("OUTREACH_USER_AGENT") {
            if !val.trim().is_empty() {
                config.browser.user_agent = Some(val);
                tracing::debug!("override browser.user_agent from env");
            }
        }

        if let Ok(val) = std::env::var("OUTREACH_HEADLESS") {
            if let Ok(headless) = val.parse() {
                config.browser.headless = headless;
                tracing::debug!(headless, "override browser.headless from env");
            }
        }

        config
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listening port
    pub port: u16,
    /// Maximum accepted request body size in bytes
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            body_limit_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Run the browser in headless mode
    pub headless: bool,
    /// Outbound user-agent string; `None` picks from a rotating pool
    pub user_agent: Option<String>,
    /// Navigation timeout in seconds
    pub navigation_timeout_secs: u64,
    /// Delay between keystrokes when typing into fields, in milliseconds
    pub type_delay_ms: u64,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            user_agent: None,
            navigation_timeout_secs: 30,
            type_delay_ms: 35,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.body_limit_bytes, 2 * 1024 * 1024);
        assert!(config.browser.headless);
        assert!(config.browser.user_agent.is_none());
        assert_eq!(config.browser.navigation_timeout_secs, 30);
    }

    // Env vars are process-global; one test covers all override paths to
    // avoid racing parallel test threads.
    #[test]
    fn test_env_overrides() {
        std::env::set_var("OUTREACH_PORT", "9090");
        std::env::set_var("OUTREACH_USER_AGENT", "outreach-test/1.0");
        std::env::set_var("OUTREACH_HEADLESS", "false");

        let config = AppConfig::from_env();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.browser.user_agent.as_deref(), Some("outreach-test/1.0"));
        assert!(!config.browser.headless);

        // Unparseable values fall back to the default.
        std::env::set_var("OUTREACH_PORT", "not-a-port");
        let config = AppConfig::from_env();
        assert_eq!(config.server.port, 8080);

        std::env::remove_var("OUTREACH_PORT");
        std::env::remove_var("OUTREACH_USER_AGENT");
        std::env::remove_var("OUTREACH_HEADLESS");
    }
}
