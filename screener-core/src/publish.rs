use crate::error::ScreenerError;
use crate::types::PublishStatus;
use async_trait::async_trait;

/// What a successful external publish call hands back.
#[derive(Debug, Clone)]
pub struct PublishReceipt {
    pub tweet_id: String,
    pub tweet_url: String,
}

/// Seam to the external publish collaborator. The orchestrator only needs
/// a configured-or-not signal and an opaque call that returns
/// success/failure plus an identifier; tests substitute a scripted mock.
#[async_trait]
pub trait PublishClient: Send + Sync {
    fn is_configured(&self) -> bool;

    /// One external publish attempt. Never retried automatically.
    async fn post_tweet(&self, text: &str) -> Result<PublishReceipt, ScreenerError>;

    /// Verify the configured credentials; returns the account username.
    async fn verify_credentials(&self) -> Result<String, ScreenerError>;

    async fn status(&self) -> PublishStatus;
}
