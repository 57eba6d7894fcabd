use crate::composer::TweetComposer;
use crate::session::{PublishSession, SessionState};
use screener_core::{
    Article, PostOutcome, PublishApiError, PublishClient, PublishStatus, ScreenerError,
    TweetPreview, TweetRequest,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Sequences the preview (pure, repeatable) and post (external,
/// at-most-once) operations, holding per-article session state. Sessions
/// are independent; the map lock is never held across the external call.
pub struct PublishOrchestrator {
    sessions: Mutex<HashMap<i64, PublishSession>>,
    client: Arc<dyn PublishClient>,
}

impl PublishOrchestrator {
    pub fn new(client: Arc<dyn PublishClient>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            client,
        }
    }

    /// Issue a new preview sequence for this article, superseding any
    /// in-flight preview. Exposed separately from [`Self::preview`] so
    /// arrival order can be exercised in tests.
    pub async fn begin_preview(&self, article_id: i64) -> Result<u64, ScreenerError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .entry(article_id)
            .or_insert_with(|| PublishSession::new(article_id));
        match session.state {
            SessionState::Posted { .. } => Err(ScreenerError::InvalidTransition {
                article_id,
                reason: "article already posted in this session".to_string(),
            }),
            SessionState::Posting { .. } => Err(ScreenerError::PostInFlight { article_id }),
            _ => Ok(session.begin_preview()),
        }
    }

    /// Apply a preview result if it still carries the latest sequence.
    /// Returns whether it was applied; stale results are discarded.
    pub async fn apply_preview(
        &self,
        article_id: i64,
        seq: u64,
        result: &Result<TweetPreview, ScreenerError>,
    ) -> bool {
        let mut sessions = self.sessions.lock().await;
        let Some(session) = sessions.get_mut(&article_id) else {
            return false;
        };
        let applied = session.apply_preview(
            seq,
            result.as_ref().map(|preview| preview.clone()).map_err(|_| ()),
        );
        if !applied {
            debug!(article_id, seq, "discarded superseded preview result");
        }
        applied
    }

    /// Compute the exact text that would be published. Pure with respect
    /// to the outside world; session state only records the latest result.
    pub async fn preview(
        &self,
        article: &Article,
        request: &TweetRequest,
    ) -> Result<TweetPreview, ScreenerError> {
        if article.id != request.article_id {
            return Err(ScreenerError::Validation {
                message: format!(
                    "request targets article {} but article {} was supplied",
                    request.article_id, article.id
                ),
            });
        }
        let seq = self.begin_preview(article.id).await?;
        let result = TweetComposer::compose(
            article,
            request.custom_message.as_deref(),
            request.include_hashtags,
            request.use_premium,
        );
        self.apply_preview(article.id, seq, &result).await;
        result
    }

    /// Execute the external publish call for a previously previewed
    /// article. At most one successful post per session; a failed post
    /// may be retried manually, never automatically.
    pub async fn execute_post(&self, article_id: i64) -> Result<PostOutcome, ScreenerError> {
        if !self.client.is_configured() {
            return Err(ScreenerError::PublishApi(PublishApiError::NotConfigured));
        }

        // Claim the Posting state under the lock, then release it for the
        // duration of the external call.
        let preview = {
            let mut sessions = self.sessions.lock().await;
            let session =
                sessions
                    .get_mut(&article_id)
                    .ok_or_else(|| ScreenerError::InvalidTransition {
                        article_id,
                        reason: "no preview session for this article".to_string(),
                    })?;
            match &session.state {
                SessionState::Posted { .. } => {
                    return Err(ScreenerError::DuplicatePost { article_id });
                }
                SessionState::Posting { .. } => {
                    return Err(ScreenerError::PostInFlight { article_id });
                }
                SessionState::PreviewReady { preview, .. }
                | SessionState::PostFailed { preview } => {
                    let preview = preview.clone();
                    session.state = SessionState::Posting {
                        preview: preview.clone(),
                    };
                    preview
                }
                _ => {
                    return Err(ScreenerError::InvalidTransition {
                        article_id,
                        reason: "no completed preview for the current parameters".to_string(),
                    });
                }
            }
        };

        info!(article_id, chars = preview.character_count, "posting tweet");
        match self.client.post_tweet(&preview.tweet_text).await {
            Ok(receipt) => {
                let outcome = PostOutcome {
                    success: true,
                    tweet_id: Some(receipt.tweet_id),
                    tweet_url: Some(receipt.tweet_url),
                    message: "Tweet posted successfully".to_string(),
                };
                let mut sessions = self.sessions.lock().await;
                if let Some(session) = sessions.get_mut(&article_id) {
                    session.state = SessionState::Posted {
                        outcome: outcome.clone(),
                    };
                }
                info!(article_id, "post confirmed");
                Ok(outcome)
            }
            Err(e) => {
                warn!(article_id, error = %e, "post failed");
                let mut sessions = self.sessions.lock().await;
                if let Some(session) = sessions.get_mut(&article_id) {
                    session.state = SessionState::PostFailed { preview };
                }
                Err(e)
            }
        }
    }

    pub async fn publish_status(&self) -> PublishStatus {
        self.client.status().await
    }

    pub async fn session_state(&self, article_id: i64) -> Option<SessionState> {
        let sessions = self.sessions.lock().await;
        sessions.get(&article_id).map(|session| session.state.clone())
    }

    /// Drop a session once the interaction is over. A later preview for
    /// the same article starts a fresh session.
    pub async fn clear_session(&self, article_id: i64) {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(&article_id);
    }
}
