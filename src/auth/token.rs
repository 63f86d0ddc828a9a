use log::{debug, info};
use reqwest::Client;
use serde_json::Value;

use super::credentials::Credentials;
use crate::api::constants;
use crate::config::ApiSettings;
use crate::error::{PromoteError, Result};

/// Bearer token for one run. Held in memory only.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// Client-credentials exchange against the Microsoft identity platform
pub struct TokenAcquirer {
    client: Client,
    authority_host: String,
    scope: String,
}

impl TokenAcquirer {
    pub fn new(client: Client, settings: &ApiSettings) -> Self {
        Self {
            client,
            authority_host: settings.authority_host.clone(),
            scope: settings.scope.clone(),
        }
    }

    pub async fn acquire(&self, credentials: &Credentials) -> Result<AccessToken> {
        let token_url = constants::token_endpoint(&self.authority_host, &credentials.tenant_id);

        info!("Requesting access token for client {}", credentials.client_id);
        debug!("Token endpoint: {}", token_url);

        let response = self
            .client
            .post(&token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
                ("scope", self.scope.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        debug!("Token request status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PromoteError::Authentication {
                status: status.as_u16(),
                body,
            });
        }

        let token_data: Value = response.json().await?;
        match token_data.get("access_token").and_then(|t| t.as_str()) {
            Some(access_token) => {
                debug!("Access token obtained successfully");
                Ok(AccessToken::new(access_token))
            }
            None => Err(PromoteError::Authentication {
                status: status.as_u16(),
                body: "No access token in response".to_string(),
            }),
        }
    }
}
