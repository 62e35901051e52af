//! HTTP surface for the Outreach form submitter.

pub mod routes;

pub use routes::{router, AppState};
