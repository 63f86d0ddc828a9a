//! Promote a Power BI report and its semantic model between Fabric workspaces.
//!
//! The Fabric CLI copies both items, then the Power BI REST API resolves the
//! copies by name and rebinds the copied report to the copied model.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod fabric;
pub mod promote;

pub use error::{PromoteError, Result};
pub use promote::{PromoteOutcome, PromoteRequest, Promoter};
