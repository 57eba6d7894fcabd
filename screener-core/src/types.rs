use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news article as delivered by the ingestion collaborator. Read-only
/// in this workspace; articles are never persisted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
}

/// A single preset keyword with its relevance weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

impl Keyword {
    pub fn new(term: impl Into<String>, weight: u32) -> Self {
        Self {
            term: term.into(),
            weight,
        }
    }
}

/// A named topic taxonomy: weighted keywords plus positive/negative
/// sentiment indicator terms. Loaded once at startup, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterPreset {
    pub key: String,
    pub name: String,
    pub description: String,
    pub keywords: Vec<Keyword>,
    pub positive_indicators: Vec<String>,
    pub negative_indicators: Vec<String>,
}

impl FilterPreset {
    /// Derived, never stored: always the length of the keyword list.
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Neutral => write!(f, "neutral"),
            Sentiment::Negative => write!(f, "negative"),
        }
    }
}

/// An article annotated with relevance and sentiment for one preset.
/// Computed fresh per request; the matched term lists explain *why* the
/// article matched and are ordered by first occurrence in the text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredArticle {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub relevance_score: u64,
    pub matched_keywords: Vec<String>,
    pub sentiment: Sentiment,
    pub positive_matches: Vec<String>,
    pub negative_matches: Vec<String>,
}

/// Request shape for tweet preview and post operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweetRequest {
    pub article_id: i64,
    #[serde(default)]
    pub custom_message: Option<String>,
    #[serde(default)]
    pub include_hashtags: bool,
    #[serde(default)]
    pub use_premium: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: i64,
    pub title: String,
    pub url: String,
}

impl From<&Article> for ArticleSummary {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id,
            title: article.title.clone(),
            url: article.url.clone(),
        }
    }
}

/// The exact text that would be published, with no side effect. Safe to
/// discard and recompute with different parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweetPreview {
    pub tweet_text: String,
    pub character_count: usize,
    pub article: ArticleSummary,
}

/// Result of one external publish call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostOutcome {
    pub success: bool,
    pub tweet_id: Option<String>,
    pub tweet_url: Option<String>,
    pub message: String,
}

/// Publish collaborator status for the status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishStatus {
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    pub message: String,
}
