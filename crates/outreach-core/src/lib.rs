//! Shared types and configuration for the Outreach form submitter.
//!
//! Everything here is request-scoped data or process-wide configuration;
//! no state survives a request.

pub mod config;
pub mod types;

pub use config::{AppConfig, BrowserSettings, ServerConfig};
pub use types::{FieldKind, FillOutcome, Outcome, SubmissionRequest, SubmitResponse, Verdict};
