//! Error type shared by every stage of a promotion run.
//!
//! Each variant is classified as recoverable or fatal. The retry policy only
//! re-runs recoverable failures, and `main` maps the variant to an exit code.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PromoteError>;

/// The kind of object a name lookup was searching for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Workspace,
    Report,
    Dataset,
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ObjectKind::Workspace => "Workspace",
            ObjectKind::Report => "Report",
            ObjectKind::Dataset => "Dataset",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum PromoteError {
    #[error("{0} environment variable not set")]
    MissingEnvVar(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to start '{command}': {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} failed with code {code}")]
    CommandFailed { command: String, code: i32 },

    #[error("Authentication failed ({status}): {body}")]
    Authentication { status: u16, body: String },

    #[error("{method} {url} failed: {status} {body}")]
    Http {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    #[error("Request error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{kind} '{name}' not found{}", scope_suffix(.scope))]
    NotFound {
        kind: ObjectKind,
        name: String,
        scope: Option<String>,
    },

    #[error("Rebind failed: {status} {body}")]
    Rebind { status: u16, body: String },

    #[error("Exhausted {attempts} attempts. Last error: {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: Box<PromoteError>,
    },
}

fn scope_suffix(scope: &Option<String>) -> String {
    match scope {
        Some(workspace_id) => format!(" in workspace {}", workspace_id),
        None => String::new(),
    }
}

impl PromoteError {
    /// Whether a bounded retry may clear this failure.
    ///
    /// Lookups that miss are recoverable: freshly copied items can take a few
    /// seconds to appear in listings.
    pub fn is_recoverable(&self) -> bool {
        match self {
            PromoteError::NotFound { .. } => true,
            PromoteError::Http { .. } => true,
            PromoteError::Network(_) => true,
            PromoteError::MissingEnvVar(_)
            | PromoteError::Config(_)
            | PromoteError::CommandSpawn { .. }
            | PromoteError::CommandFailed { .. }
            | PromoteError::Authentication { .. }
            | PromoteError::Rebind { .. }
            | PromoteError::RetriesExhausted { .. } => false,
        }
    }

    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            PromoteError::CommandFailed { code, .. } => *code,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failure_keeps_exit_code() {
        let err = PromoteError::CommandFailed {
            command: "fab cp a b".to_string(),
            code: 3,
        };
        assert_eq!(err.exit_code(), 3);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_other_failures_exit_with_one() {
        assert_eq!(PromoteError::MissingEnvVar("FABRIC_TENANT_ID".into()).exit_code(), 1);
        assert_eq!(
            PromoteError::Rebind {
                status: 404,
                body: "nope".into()
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn test_recoverable_classification() {
        let not_found = PromoteError::NotFound {
            kind: ObjectKind::Dataset,
            name: "dev-SalesModel".into(),
            scope: Some("ws-1".into()),
        };
        assert!(not_found.is_recoverable());

        let http = PromoteError::Http {
            method: "GET",
            url: "https://example.test/groups".into(),
            status: 500,
            body: String::new(),
        };
        assert!(http.is_recoverable());

        let auth = PromoteError::Authentication {
            status: 401,
            body: "invalid_client".into(),
        };
        assert!(!auth.is_recoverable());
    }

    #[test]
    fn test_not_found_message() {
        let err = PromoteError::NotFound {
            kind: ObjectKind::Report,
            name: "dev-Sales".into(),
            scope: Some("ws-1".into()),
        };
        assert_eq!(err.to_string(), "Report 'dev-Sales' not found in workspace ws-1");

        let err = PromoteError::NotFound {
            kind: ObjectKind::Workspace,
            name: "Dev".into(),
            scope: None,
        };
        assert_eq!(err.to_string(), "Workspace 'Dev' not found");
    }

    #[test]
    fn test_exhausted_wraps_last_error() {
        let err = PromoteError::RetriesExhausted {
            attempts: 12,
            last: Box::new(PromoteError::NotFound {
                kind: ObjectKind::Dataset,
                name: "x".into(),
                scope: None,
            }),
        };
        assert!(err.to_string().starts_with("Exhausted 12 attempts. Last error: Dataset 'x'"));
        assert!(!err.is_recoverable());
    }
}
