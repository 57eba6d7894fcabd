use screener_core::{PostOutcome, TweetPreview};

/// Workflow state for one article-publish session.
///
/// `Idle -> PreviewPending -> PreviewReady | PreviewFailed -> Posting ->
/// Posted | PostFailed`. `Posted` is terminal; `PostFailed` keeps the
/// previewed text so the user can retry manually.
#[derive(Debug, Clone)]
pub enum SessionState {
    Idle,
    PreviewPending { seq: u64 },
    PreviewReady { seq: u64, preview: TweetPreview },
    PreviewFailed { seq: u64 },
    Posting { preview: TweetPreview },
    Posted { outcome: PostOutcome },
    PostFailed { preview: TweetPreview },
}

/// Ephemeral per-article workflow state, owned by the orchestrator for
/// the lifetime of one user interaction.
#[derive(Debug)]
pub struct PublishSession {
    pub article_id: i64,
    latest_seq: u64,
    pub state: SessionState,
}

impl PublishSession {
    pub fn new(article_id: i64) -> Self {
        Self {
            article_id,
            latest_seq: 0,
            state: SessionState::Idle,
        }
    }

    /// Issue a new preview sequence number, superseding any in-flight
    /// preview. Only a result carrying the latest number may be applied.
    pub fn begin_preview(&mut self) -> u64 {
        self.latest_seq += 1;
        self.state = SessionState::PreviewPending {
            seq: self.latest_seq,
        };
        self.latest_seq
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest_seq
    }

    /// Last-write-wins: stale results are discarded on arrival, and a
    /// session that moved on to posting no longer accepts previews.
    pub fn apply_preview(&mut self, seq: u64, result: Result<TweetPreview, ()>) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        let accepting = matches!(
            self.state,
            SessionState::Idle
                | SessionState::PreviewPending { .. }
                | SessionState::PreviewReady { .. }
                | SessionState::PreviewFailed { .. }
        );
        if !accepting {
            return false;
        }
        self.state = match result {
            Ok(preview) => SessionState::PreviewReady { seq, preview },
            Err(()) => SessionState::PreviewFailed { seq },
        };
        true
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, SessionState::Posted { .. })
    }
}
