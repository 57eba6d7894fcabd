use async_trait::async_trait;
use reqwest::Client;
use screener_core::{
    AppConfig, PublishApiError, PublishClient, PublishReceipt, PublishStatus, ScreenerError,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Serialize)]
struct CreateTweetRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct CreateTweetResponse {
    data: CreatedTweet,
}

#[derive(Debug, Clone, Deserialize)]
struct CreatedTweet {
    id: String,
}

#[derive(Debug, Clone, Deserialize)]
struct UserResponse {
    data: UserData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub username: String,
}

/// Twitter API v2 client for the publish collaborator. Holds no workflow
/// state; retry and at-most-once discipline live in the orchestrator.
#[derive(Debug)]
pub struct TwitterClient {
    http_client: Client,
    api_base: String,
    bearer_token: Option<String>,
}

impl TwitterClient {
    pub fn new(config: &AppConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            api_base: config.twitter_api_base.clone(),
            bearer_token: config.twitter_bearer_token.clone(),
        }
    }

    fn token(&self) -> Result<&str, ScreenerError> {
        self.bearer_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or(ScreenerError::PublishApi(PublishApiError::NotConfigured))
    }

    async fn check_response(
        &self,
        response: reqwest::Response,
        endpoint: &str,
    ) -> Result<reqwest::Response, ScreenerError> {
        let status = response.status();
        if status.is_success() {
            debug!("Request successful: {} {}", status, endpoint);
            return Ok(response);
        }
        error!("Request failed with status: {} for {}", status, endpoint);

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(60);
            warn!("Rate limited, retry after {} seconds", retry_after);
            return Err(ScreenerError::PublishApi(
                PublishApiError::RateLimitExceeded { retry_after },
            ));
        }
        if status.as_u16() == 401 {
            return Err(ScreenerError::PublishApi(
                PublishApiError::AuthenticationFailed {
                    reason: "invalid or expired token".to_string(),
                },
            ));
        }

        let details = response
            .text()
            .await
            .unwrap_or_else(|_| "no response body".to_string());
        Err(ScreenerError::PublishApi(PublishApiError::Rejected {
            status_code: status.as_u16(),
            details,
        }))
    }

    fn map_send_error(error: reqwest::Error, endpoint: &str) -> ScreenerError {
        error!("Network error for {}: {}", endpoint, error);
        if error.is_timeout() {
            ScreenerError::PublishApi(PublishApiError::RequestTimeout)
        } else {
            ScreenerError::Network(error)
        }
    }

    pub async fn get_me(&self) -> Result<UserData, ScreenerError> {
        let token = self.token()?;
        let endpoint = "/2/users/me";
        let url = format!("{}{}", self.api_base, endpoint);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Self::map_send_error(e, endpoint))?;
        let response = self.check_response(response, endpoint).await?;

        let user: UserResponse = response.json().await.map_err(|e| {
            error!("Failed to parse user data: {}", e);
            ScreenerError::PublishApi(PublishApiError::InvalidResponse {
                details: "Failed to parse user data".to_string(),
            })
        })?;

        debug!("Retrieved user info for: @{}", user.data.username);
        Ok(user.data)
    }
}

#[async_trait]
impl PublishClient for TwitterClient {
    fn is_configured(&self) -> bool {
        self.token().is_ok()
    }

    async fn post_tweet(&self, text: &str) -> Result<PublishReceipt, ScreenerError> {
        let token = self.token()?;
        let endpoint = "/2/tweets";
        let url = format!("{}{}", self.api_base, endpoint);

        info!("Posting tweet ({} chars)", text.chars().count());
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token)
            .json(&CreateTweetRequest { text })
            .send()
            .await
            .map_err(|e| Self::map_send_error(e, endpoint))?;
        let response = self.check_response(response, endpoint).await?;

        let created: CreateTweetResponse = response.json().await.map_err(|e| {
            error!("Failed to parse tweet response: {}", e);
            ScreenerError::PublishApi(PublishApiError::InvalidResponse {
                details: "Failed to parse tweet response".to_string(),
            })
        })?;

        let tweet_id = created.data.id;
        let tweet_url = format!("https://twitter.com/user/status/{tweet_id}");
        info!("Tweet posted successfully: {}", tweet_url);

        Ok(PublishReceipt {
            tweet_id,
            tweet_url,
        })
    }

    async fn verify_credentials(&self) -> Result<String, ScreenerError> {
        let user = self.get_me().await?;
        Ok(user.username)
    }

    async fn status(&self) -> PublishStatus {
        if !self.is_configured() {
            return PublishStatus {
                configured: false,
                verified: None,
                message: "Twitter API not configured".to_string(),
            };
        }
        match self.verify_credentials().await {
            Ok(username) => PublishStatus {
                configured: true,
                verified: Some(true),
                message: format!("Twitter API configured and ready (@{username})"),
            },
            Err(e) => PublishStatus {
                configured: true,
                verified: Some(false),
                message: format!("Twitter credentials could not be verified: {e}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: Option<&str>) -> AppConfig {
        AppConfig {
            twitter_bearer_token: token.map(|t| t.to_string()),
            twitter_api_base: "https://api.twitter.com".to_string(),
            use_premium: false,
        }
    }

    #[test]
    fn configured_only_with_nonempty_token() {
        assert!(!TwitterClient::new(&config(None)).is_configured());
        assert!(!TwitterClient::new(&config(Some(""))).is_configured());
        assert!(TwitterClient::new(&config(Some("token"))).is_configured());
    }

    #[tokio::test]
    async fn post_without_token_fails_locally() {
        let client = TwitterClient::new(&config(None));
        let result = client.post_tweet("hello").await;
        assert!(matches!(
            result,
            Err(ScreenerError::PublishApi(PublishApiError::NotConfigured))
        ));
    }

    #[tokio::test]
    async fn status_reports_unconfigured_without_calling_out() {
        let client = TwitterClient::new(&config(None));
        let status = client.status().await;
        assert!(!status.configured);
        assert!(status.verified.is_none());
        assert!(status.message.contains("not configured"));
    }

    #[test]
    fn parses_create_tweet_response() {
        let body = r#"{"data": {"id": "1460323737035677698", "text": "hello"}}"#;
        let parsed: CreateTweetResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.id, "1460323737035677698");
    }

    #[test]
    fn parses_user_response() {
        let body = r#"{"data": {"id": "2244994945", "name": "Dev", "username": "TwitterDev"}}"#;
        let parsed: UserResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.username, "TwitterDev");
    }
}
