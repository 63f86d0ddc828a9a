use log::info;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{PromoteError, Result};

pub const TENANT_ID_VAR: &str = "FABRIC_TENANT_ID";
pub const CLIENT_ID_VAR: &str = "FABRIC_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "FABRIC_CLIENT_SECRET";

/// Service principal used for the client-credentials exchange.
#[derive(Clone)]
pub struct Credentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Credentials> {
        info!("Reading credentials from environment variables");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials from a `.env` file. Variables already present in the
    /// process environment take precedence over the file.
    pub fn from_env_file(path: &Path) -> Result<Credentials> {
        info!("Reading credentials from .env file: {:?}", path);

        if !path.exists() {
            return Err(PromoteError::Config(format!(
                "Environment file not found: {}",
                path.display()
            )));
        }

        let mut values = HashMap::new();
        let entries = dotenvy::from_path_iter(path).map_err(|e| {
            PromoteError::Config(format!("Failed to load .env file '{}': {}", path.display(), e))
        })?;
        for entry in entries {
            let (key, value) = entry.map_err(|e| {
                PromoteError::Config(format!("Failed to parse .env file '{}': {}", path.display(), e))
            })?;
            values.insert(key, value);
        }

        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| values.get(key).cloned()))
    }

    /// Build credentials from an arbitrary variable lookup. Empty values are
    /// treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Credentials>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| PromoteError::MissingEnvVar(key.to_string()))
        };

        Ok(Credentials {
            tenant_id: require(TENANT_ID_VAR)?,
            client_id: require(CLIENT_ID_VAR)?,
            client_secret: require(CLIENT_SECRET_VAR)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_complete() {
        let creds = Credentials::from_lookup(lookup_from(&[
            (TENANT_ID_VAR, "tenant"),
            (CLIENT_ID_VAR, "client"),
            (CLIENT_SECRET_VAR, "secret"),
        ]))
        .unwrap();

        assert_eq!(creds.tenant_id, "tenant");
        assert_eq!(creds.client_id, "client");
        assert_eq!(creds.client_secret, "secret");
    }

    #[test]
    fn test_missing_variable_is_named() {
        let err = Credentials::from_lookup(lookup_from(&[
            (TENANT_ID_VAR, "tenant"),
            (CLIENT_SECRET_VAR, "secret"),
        ]))
        .unwrap_err();

        match err {
            PromoteError::MissingEnvVar(name) => assert_eq!(name, CLIENT_ID_VAR),
            other => panic!("Expected MissingEnvVar, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_variable_counts_as_missing() {
        let err = Credentials::from_lookup(lookup_from(&[
            (TENANT_ID_VAR, ""),
            (CLIENT_ID_VAR, "client"),
            (CLIENT_SECRET_VAR, "secret"),
        ]))
        .unwrap_err();

        assert!(matches!(err, PromoteError::MissingEnvVar(name) if name == TENANT_ID_VAR));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials {
            tenant_id: "tenant".into(),
            client_id: "client".into(),
            client_secret: "super-secret".into(),
        };
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_from_env_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "FABRIC_TENANT_ID=file-tenant-7f3a").unwrap();
        writeln!(file, "FABRIC_CLIENT_ID=file-client-7f3a").unwrap();
        writeln!(file, "FABRIC_CLIENT_SECRET=file-secret-7f3a").unwrap();

        // Variables may also be set in the test process; only assert on the
        // ones that are not.
        let creds = Credentials::from_env_file(file.path()).unwrap();
        if std::env::var(TENANT_ID_VAR).is_err() {
            assert_eq!(creds.tenant_id, "file-tenant-7f3a");
        }
        if std::env::var(CLIENT_SECRET_VAR).is_err() {
            assert_eq!(creds.client_secret, "file-secret-7f3a");
        }
    }

    #[test]
    fn test_from_env_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = Credentials::from_env_file(&dir.path().join(".env")).unwrap_err();
        assert!(matches!(err, PromoteError::Config(_)));
    }
}
