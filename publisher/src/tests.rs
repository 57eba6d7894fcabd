use crate::composer::TweetComposer;
use crate::orchestrator::PublishOrchestrator;
use crate::session::SessionState;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use screener_core::{
    Article, PublishApiError, PublishClient, PublishReceipt, PublishStatus, ScreenerError,
    TweetRequest,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

fn article(id: i64) -> Article {
    Article {
        id,
        title: "Metro phase two approved".to_string(),
        content: "The corridor will link four districts.".to_string(),
        url: format!("https://example.com/story/{id}"),
        published_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    }
}

fn request(id: i64) -> TweetRequest {
    TweetRequest {
        article_id: id,
        custom_message: None,
        include_hashtags: true,
        use_premium: false,
    }
}

/// Scripted publish client: pops one pre-seeded result per call and
/// counts external calls, so at-most-once can be asserted directly.
struct MockPublishClient {
    configured: bool,
    results: Mutex<VecDeque<Result<PublishReceipt, ScreenerError>>>,
    calls: AtomicUsize,
}

impl MockPublishClient {
    fn with_results(results: Vec<Result<PublishReceipt, ScreenerError>>) -> Arc<Self> {
        Arc::new(Self {
            configured: true,
            results: Mutex::new(results.into()),
            calls: AtomicUsize::new(0),
        })
    }

    fn unconfigured() -> Arc<Self> {
        Arc::new(Self {
            configured: false,
            results: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn receipt(id: &str) -> PublishReceipt {
    PublishReceipt {
        tweet_id: id.to_string(),
        tweet_url: format!("https://twitter.com/user/status/{id}"),
    }
}

#[async_trait]
impl PublishClient for MockPublishClient {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn post_tweet(&self, _text: &str) -> Result<PublishReceipt, ScreenerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(receipt("fallback")))
    }

    async fn verify_credentials(&self) -> Result<String, ScreenerError> {
        Ok("screener_bot".to_string())
    }

    async fn status(&self) -> PublishStatus {
        PublishStatus {
            configured: self.configured,
            verified: self.configured.then_some(true),
            message: if self.configured {
                "ready".to_string()
            } else {
                "Twitter API not configured".to_string()
            },
        }
    }
}

/// Publish client that blocks inside the external call until released,
/// to exercise the in-flight guard.
struct GatedPublishClient {
    started: Notify,
    release: Notify,
    calls: AtomicUsize,
}

impl GatedPublishClient {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            started: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl PublishClient for GatedPublishClient {
    fn is_configured(&self) -> bool {
        true
    }

    async fn post_tweet(&self, _text: &str) -> Result<PublishReceipt, ScreenerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        self.release.notified().await;
        Ok(receipt("42"))
    }

    async fn verify_credentials(&self) -> Result<String, ScreenerError> {
        Ok("screener_bot".to_string())
    }

    async fn status(&self) -> PublishStatus {
        PublishStatus {
            configured: true,
            verified: Some(true),
            message: "ready".to_string(),
        }
    }
}

#[tokio::test]
async fn preview_then_post_succeeds_once() {
    let client = MockPublishClient::with_results(vec![Ok(receipt("100"))]);
    let orchestrator = PublishOrchestrator::new(client.clone());
    let article = article(1);

    let preview = orchestrator.preview(&article, &request(1)).await.unwrap();
    assert!(preview.character_count <= crate::MAX_TWEET_LEN);

    let outcome = orchestrator.execute_post(1).await.unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.tweet_id.as_deref(), Some("100"));
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn second_post_is_a_duplicate_no_matter_how_often_retried() {
    let client = MockPublishClient::with_results(vec![Ok(receipt("100"))]);
    let orchestrator = PublishOrchestrator::new(client.clone());
    let article = article(1);

    orchestrator.preview(&article, &request(1)).await.unwrap();
    orchestrator.execute_post(1).await.unwrap();

    for _ in 0..3 {
        let result = orchestrator.execute_post(1).await;
        assert!(matches!(
            result,
            Err(ScreenerError::DuplicatePost { article_id: 1 })
        ));
    }
    // The external service only ever saw one call.
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn post_without_preview_is_rejected() {
    let client = MockPublishClient::with_results(vec![]);
    let orchestrator = PublishOrchestrator::new(client.clone());

    let result = orchestrator.execute_post(7).await;
    assert!(matches!(
        result,
        Err(ScreenerError::InvalidTransition { article_id: 7, .. })
    ));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn post_fails_when_not_configured() {
    let orchestrator = PublishOrchestrator::new(MockPublishClient::unconfigured());
    let article = article(1);
    orchestrator.preview(&article, &request(1)).await.unwrap();

    let result = orchestrator.execute_post(1).await;
    assert!(matches!(
        result,
        Err(ScreenerError::PublishApi(PublishApiError::NotConfigured))
    ));
}

#[tokio::test]
async fn failed_post_allows_manual_retry() {
    let client = MockPublishClient::with_results(vec![
        Err(ScreenerError::PublishApi(PublishApiError::Rejected {
            status_code: 503,
            details: "overloaded".to_string(),
        })),
        Ok(receipt("200")),
    ]);
    let orchestrator = PublishOrchestrator::new(client.clone());
    let article = article(1);
    orchestrator.preview(&article, &request(1)).await.unwrap();

    let first = orchestrator.execute_post(1).await;
    assert!(first.is_err());
    assert!(matches!(
        orchestrator.session_state(1).await,
        Some(SessionState::PostFailed { .. })
    ));

    // The orchestrator never retried on its own.
    assert_eq!(client.call_count(), 1);

    let second = orchestrator.execute_post(1).await.unwrap();
    assert!(second.success);
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn superseded_preview_is_discarded_regardless_of_arrival_order() {
    let orchestrator = PublishOrchestrator::new(MockPublishClient::with_results(vec![]));
    let article = article(1);

    // Issue P1 then P2 before P1 resolves.
    let p1 = orchestrator.begin_preview(1).await.unwrap();
    let p2 = orchestrator.begin_preview(1).await.unwrap();

    let p1_result = TweetComposer::compose(&article, Some("first"), false, false);
    let p2_result = TweetComposer::compose(&article, Some("second"), false, false);

    // P2 resolves first, then the stale P1 arrives.
    assert!(orchestrator.apply_preview(1, p2, &p2_result).await);
    assert!(!orchestrator.apply_preview(1, p1, &p1_result).await);

    match orchestrator.session_state(1).await {
        Some(SessionState::PreviewReady { preview, .. }) => {
            assert!(preview.tweet_text.starts_with("second"));
        }
        other => panic!("unexpected state: {other:?}"),
    }
}

#[tokio::test]
async fn preview_reflects_latest_parameters() {
    let orchestrator = PublishOrchestrator::new(MockPublishClient::with_results(vec![]));
    let article = article(1);

    let mut req = request(1);
    orchestrator.preview(&article, &req).await.unwrap();

    req.include_hashtags = false;
    req.use_premium = true;
    let preview = orchestrator.preview(&article, &req).await.unwrap();
    assert!(!preview.tweet_text.contains('#'));

    match orchestrator.session_state(1).await {
        Some(SessionState::PreviewReady { preview: latest, .. }) => {
            assert_eq!(latest.tweet_text, preview.tweet_text);
        }
        other => panic!("unexpected state: {other:?}"),
    }
}

#[tokio::test]
async fn concurrent_post_fails_fast_with_busy() {
    let client = GatedPublishClient::new();
    let orchestrator = Arc::new(PublishOrchestrator::new(client.clone()));
    let article = article(1);
    orchestrator.preview(&article, &request(1)).await.unwrap();

    let background = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move { orchestrator.execute_post(1).await })
    };

    // Wait until the first post is inside the external call.
    client.started.notified().await;

    let second = orchestrator.execute_post(1).await;
    assert!(matches!(
        second,
        Err(ScreenerError::PostInFlight { article_id: 1 })
    ));

    client.release.notify_one();
    let first = background.await.unwrap().unwrap();
    assert!(first.success);
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn mismatched_request_article_is_rejected() {
    let orchestrator = PublishOrchestrator::new(MockPublishClient::with_results(vec![]));
    let result = orchestrator.preview(&article(1), &request(2)).await;
    assert!(matches!(result, Err(ScreenerError::Validation { .. })));
}

#[tokio::test]
async fn cleared_session_starts_fresh() {
    let client = MockPublishClient::with_results(vec![Ok(receipt("100")), Ok(receipt("101"))]);
    let orchestrator = PublishOrchestrator::new(client.clone());
    let article = article(1);

    orchestrator.preview(&article, &request(1)).await.unwrap();
    orchestrator.execute_post(1).await.unwrap();
    assert!(matches!(
        orchestrator.execute_post(1).await,
        Err(ScreenerError::DuplicatePost { .. })
    ));

    // A terminal session is discarded; a new interaction may publish again.
    orchestrator.clear_session(1).await;
    orchestrator.preview(&article, &request(1)).await.unwrap();
    let outcome = orchestrator.execute_post(1).await.unwrap();
    assert_eq!(outcome.tweet_id.as_deref(), Some("101"));
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn publish_status_passes_through() {
    let orchestrator = PublishOrchestrator::new(MockPublishClient::unconfigured());
    let status = orchestrator.publish_status().await;
    assert!(!status.configured);
    assert!(status.message.contains("not configured"));
}
