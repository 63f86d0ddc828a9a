//! Power BI REST API access
//!
//! Authenticated GET/POST plumbing, name lookups for workspaces, reports and
//! datasets, the report rebind call, and the retry policy used while copied
//! items propagate.

pub mod client;
pub mod constants;
pub mod models;
pub mod rebind;
pub mod resilience;
pub mod resolver;

pub use client::{PowerBiClient, RawResponse, build_http_client};
pub use models::{NamedObject, RebindRequest};
pub use rebind::rebind_report;
pub use resilience::{RetryConfig, RetryPolicy};
pub use resolver::{NameResolver, Resolution, resolve_name};
