//! Retry support for lookups that race item propagation

pub mod retry;

pub use retry::{RetryConfig, RetryPolicy};
