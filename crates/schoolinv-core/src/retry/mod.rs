//! Retry and backoff for idempotent API reads.
//!
//! Only GET requests go through here; mutations are sent exactly once so a
//! timed-out POST can never create a duplicate asset or incident.

mod classify;
mod policy;
mod run;

pub use classify::{classify, classify_http_status};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
