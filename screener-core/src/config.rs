use serde::Deserialize;

/// Application configuration, read from the environment the way the
/// deployment sets it. Only the publish collaborator needs credentials;
/// scoring and composition run without any configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    pub twitter_bearer_token: Option<String>,
    #[serde(default = "default_api_base")]
    pub twitter_api_base: String,
    #[serde(default)]
    pub use_premium: bool,
}

fn default_api_base() -> String {
    "https://api.twitter.com".to_string()
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            twitter_bearer_token: std::env::var("TWITTER_BEARER_TOKEN").ok(),
            twitter_api_base: std::env::var("TWITTER_API_BASE")
                .unwrap_or_else(|_| default_api_base()),
            use_premium: std::env::var("TWITTER_USE_PREMIUM")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
        }
    }

    /// The only signal the core needs from the credential surface.
    pub fn is_publishing_configured(&self) -> bool {
        self.twitter_bearer_token
            .as_deref()
            .is_some_and(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_without_token() {
        let config = AppConfig::default();
        assert!(!config.is_publishing_configured());

        let config = AppConfig {
            twitter_bearer_token: Some(String::new()),
            ..Default::default()
        };
        assert!(!config.is_publishing_configured());
    }

    #[test]
    fn configured_with_token() {
        let config = AppConfig {
            twitter_bearer_token: Some("token".to_string()),
            twitter_api_base: default_api_base(),
            use_premium: false,
        };
        assert!(config.is_publishing_configured());
    }
}
