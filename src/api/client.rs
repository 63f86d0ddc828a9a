use log::{debug, error, warn};
use reqwest::header::HeaderMap;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::constants::headers::RETRY_AFTER;
use crate::auth::AccessToken;
use crate::config::ApiSettings;
use crate::error::{PromoteError, Result};

/// Status and body of a response the caller inspects itself
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Build the shared HTTP client used for both the token exchange and the REST API
pub fn build_http_client(settings: &ApiSettings) -> Result<Client> {
    let client = Client::builder()
        .timeout(settings.timeout())
        .connect_timeout(Duration::from_secs(10))
        .user_agent(concat!("fabric-promote/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Authenticated Power BI REST client for a single run
pub struct PowerBiClient {
    http_client: Client,
    base_url: String,
    token: AccessToken,
    default_retry_after: Duration,
}

impl PowerBiClient {
    pub fn new(http_client: Client, settings: &ApiSettings, token: AccessToken) -> Self {
        Self {
            http_client,
            base_url: settings.base_url.clone(),
            token,
            default_retry_after: settings.default_retry_after(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `url` and parse the JSON body.
    ///
    /// A 429 is retried exactly once after the server's `Retry-After`; any
    /// status >= 400 after that is returned as [`PromoteError::Http`].
    pub async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        let mut response = self.send_get(url, query).await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let delay = retry_after(response.headers(), self.default_retry_after);
            warn!(
                "429 from Power BI API. Retrying after {}s...",
                delay.as_secs()
            );
            tokio::time::sleep(delay).await;
            response = self.send_get(url, query).await?;
        }

        let status = response.status();
        if status.as_u16() >= 400 {
            let body = response.text().await.unwrap_or_default();
            error!("GET {} failed: {} {}", url, status.as_u16(), body);
            return Err(PromoteError::Http {
                method: "GET",
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    /// POST a JSON body. The status is not inspected here.
    pub async fn post_json<B>(&self, url: &str, body: &B) -> Result<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        debug!("POST {}", url);

        let response = self
            .http_client
            .post(url)
            .bearer_auth(self.token.secret())
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("POST {} returned {}", url, status);

        Ok(RawResponse { status, body })
    }

    async fn send_get(&self, url: &str, query: &[(&str, String)]) -> Result<Response> {
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(url)
            .bearer_auth(self.token.secret())
            .query(query)
            .send()
            .await?;

        debug!("GET {} returned {}", url, response.status());
        Ok(response)
    }
}

/// Delay requested by a `Retry-After` header in whole seconds, or `default`
/// when the header is absent or not an integer.
pub fn retry_after(headers: &HeaderMap, default: Duration) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_retry_after_header() {
        let mut headers = HeaderMap::new();
        headers.insert("Retry-After", HeaderValue::from_static("3"));
        assert_eq!(retry_after(&headers, Duration::from_secs(5)), Duration::from_secs(3));
    }

    #[test]
    fn test_retry_after_defaults() {
        let headers = HeaderMap::new();
        assert_eq!(retry_after(&headers, Duration::from_secs(5)), Duration::from_secs(5));

        let mut headers = HeaderMap::new();
        headers.insert(
            "Retry-After",
            HeaderValue::from_static("Wed, 21 Oct 2026 07:28:00 GMT"),
        );
        assert_eq!(retry_after(&headers, Duration::from_secs(5)), Duration::from_secs(5));
    }
}
