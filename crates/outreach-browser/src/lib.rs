//! Browser automation engine for arbitrary third-party sites.
//!
//! Provides a headless Chromium engine and the `PageDriver` capability
//! the form heuristics are written against.

pub mod driver;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod session;

pub use driver::{Anchor, PageDriver, PageFactory};
pub use engine::BrowserEngine;
pub use error::{BrowserError, Result};
pub use fingerprint::FingerprintConfig;
pub use session::PageSession;
