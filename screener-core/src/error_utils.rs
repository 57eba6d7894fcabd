use crate::error::*;
use std::time::Duration;
use tracing::{error, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn is_retryable(&self) -> bool;
    fn retry_after(&self) -> Option<Duration>;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for ScreenerError {
    fn log_error(&self) -> &Self {
        error!("ScreenerError: {}", self);
        if let ScreenerError::PublishApi(e) = self {
            error!("Twitter API error details: {:?}", e);
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ScreenerError (warning): {}", self);
        self
    }

    /// Retryable means a *manual* retry can succeed without changing
    /// parameters. Nothing here is ever retried automatically.
    fn is_retryable(&self) -> bool {
        match self {
            ScreenerError::PublishApi(e) => e.is_retryable(),
            ScreenerError::Network(_) => true,
            // Local failures: parameters must change before another attempt.
            ScreenerError::PresetNotFound { .. } => false,
            ScreenerError::Validation { .. } => false,
            ScreenerError::Composition { .. } => false,
            ScreenerError::DuplicatePost { .. } => false,
            ScreenerError::PostInFlight { .. } => false,
            ScreenerError::InvalidTransition { .. } => false,
            _ => false,
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            ScreenerError::PublishApi(PublishApiError::RateLimitExceeded { retry_after }) => {
                Some(Duration::from_secs(*retry_after))
            }
            _ if self.is_retryable() => Some(Duration::from_secs(5)),
            _ => None,
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ScreenerError::PublishApi(e) => e.user_friendly_message(),
            ScreenerError::Config(e) => format!("Configuration problem: {}", e),
            ScreenerError::Network(_) => {
                "Network connection error. Please check your internet connection.".to_string()
            }
            ScreenerError::PresetNotFound { key } => {
                format!("Unknown filter preset: {}", key)
            }
            ScreenerError::Validation { message } => {
                format!("Invalid request: {}", message)
            }
            ScreenerError::Composition { limit, .. } => format!(
                "The tweet cannot fit within the {} character limit. \
                 Try disabling hashtags or shortening the message.",
                limit
            ),
            ScreenerError::DuplicatePost { .. } => {
                "This article has already been posted.".to_string()
            }
            ScreenerError::PostInFlight { .. } => {
                "A post for this article is already in progress.".to_string()
            }
            ScreenerError::InvalidTransition { reason, .. } => {
                format!("Cannot post yet: {}", reason)
            }
            _ => "An unexpected error occurred. Please try again later.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            ScreenerError::PublishApi(_) => "PUBLISH_API".to_string(),
            ScreenerError::Config(_) => "CONFIG".to_string(),
            ScreenerError::Io(_) => "IO".to_string(),
            ScreenerError::Serialization(_) => "SERIALIZATION".to_string(),
            ScreenerError::Network(_) => "NETWORK".to_string(),
            ScreenerError::PresetNotFound { .. } => "PRESET_NOT_FOUND".to_string(),
            ScreenerError::Validation { .. } => "VALIDATION".to_string(),
            ScreenerError::Composition { .. } => "COMPOSITION".to_string(),
            ScreenerError::DuplicatePost { .. } => "DUPLICATE_POST".to_string(),
            ScreenerError::PostInFlight { .. } => "POST_IN_FLIGHT".to_string(),
            ScreenerError::InvalidTransition { .. } => "INVALID_TRANSITION".to_string(),
            ScreenerError::Internal { .. } => "INTERNAL".to_string(),
        }
    }
}

impl PublishApiError {
    pub fn is_retryable(&self) -> bool {
        match self {
            PublishApiError::RateLimitExceeded { .. } => true,
            PublishApiError::RequestTimeout => true,
            PublishApiError::Rejected { status_code, .. } => *status_code >= 500,
            PublishApiError::NotConfigured => false,
            PublishApiError::AuthenticationFailed { .. } => false,
            PublishApiError::InvalidResponse { .. } => false,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PublishApiError::NotConfigured => {
                "Twitter API is not configured. Set the Twitter credentials first.".to_string()
            }
            PublishApiError::AuthenticationFailed { .. } => {
                "Twitter authentication failed. Please check the credentials.".to_string()
            }
            PublishApiError::RateLimitExceeded { retry_after } => {
                format!("Twitter rate limit reached. Try again in {} seconds.", retry_after)
            }
            PublishApiError::Rejected { details, .. } => {
                format!("Twitter rejected the post: {}", details)
            }
            PublishApiError::InvalidResponse { .. } => {
                "Twitter returned an unexpected response.".to_string()
            }
            PublishApiError::RequestTimeout => {
                "The request to Twitter timed out. Please try again.".to_string()
            }
        }
    }
}
