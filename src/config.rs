use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::constants;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub retry: RetrySettings,
    #[serde(default)]
    pub fabric: FabricSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_authority_host")]
    pub authority_host: String,
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_workspace_page_size")]
    pub workspace_page_size: u32,
    #[serde(default = "default_retry_after_secs")]
    pub default_retry_after_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FabricSettings {
    #[serde(default = "default_binary")]
    pub binary: String,
}

fn default_base_url() -> String {
    constants::API_BASE_URL.to_string()
}

fn default_authority_host() -> String {
    constants::AUTHORITY_HOST.to_string()
}

fn default_scope() -> String {
    constants::POWERBI_SCOPE.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_workspace_page_size() -> u32 {
    5000
}

fn default_retry_after_secs() -> u64 {
    5
}

fn default_max_attempts() -> u32 {
    12
}

fn default_delay_secs() -> u64 {
    5
}

fn default_binary() -> String {
    "fab".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            authority_host: default_authority_host(),
            scope: default_scope(),
            timeout_secs: default_timeout_secs(),
            workspace_page_size: default_workspace_page_size(),
            default_retry_after_secs: default_retry_after_secs(),
        }
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_secs: default_delay_secs(),
        }
    }
}

impl Default for FabricSettings {
    fn default() -> Self {
        Self {
            binary: default_binary(),
        }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn default_retry_after(&self) -> Duration {
        Duration::from_secs(self.default_retry_after_secs)
    }
}

impl Settings {
    /// Default settings file location. Never created by this tool.
    pub fn default_path() -> Option<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            dirs::config_dir()?.join("fabric-promote")
        } else {
            dirs::home_dir()?.join(".fabric-promote")
        };
        Some(config_dir.join("config.toml"))
    }

    /// Load settings from `path` if given (it must exist), otherwise from the
    /// default location when present, otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    debug!("No settings file found, using defaults");
                    Self::default()
                }
            },
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading settings from: {:?}", path);

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;
        let settings = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse settings file: {:?}", path))?;

        info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.retry.max_attempts == 0 {
            anyhow::bail!("retry.max_attempts must be at least 1");
        }
        if self.api.timeout_secs == 0 {
            anyhow::bail!("api.timeout_secs must be at least 1");
        }
        if self.api.workspace_page_size == 0 {
            anyhow::bail!("api.workspace_page_size must be at least 1");
        }
        Ok(())
    }
}
