use crate::presets::PresetCatalog;
use crate::relevance::RelevanceScorer;
use crate::sentiment::SentimentClassifier;
use screener_core::{Article, ScoredArticle, ScreenerError, Sentiment};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Query shape for the scored-article listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RankParams {
    pub filter_preset: String,
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
    #[serde(default)]
    pub min_score: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

impl RankParams {
    pub fn for_preset(key: impl Into<String>) -> Self {
        Self {
            filter_preset: key.into(),
            sentiment: None,
            min_score: 0,
            limit: default_limit(),
        }
    }
}

/// Scores a batch of articles against one preset, filters, and orders the
/// result. Scoring each article is pure and independent; ordering is the
/// only whole-batch step.
pub struct ArticleRanker {
    catalog: Arc<PresetCatalog>,
    classifier: SentimentClassifier,
}

impl ArticleRanker {
    pub fn new(catalog: Arc<PresetCatalog>) -> Self {
        let classifier = SentimentClassifier::from_catalog(&catalog);
        Self {
            catalog,
            classifier,
        }
    }

    pub fn rank(
        &self,
        articles: &[Article],
        params: &RankParams,
    ) -> Result<Vec<ScoredArticle>, ScreenerError> {
        // Parameters are rejected before any scoring work.
        if params.min_score < 0 {
            return Err(ScreenerError::Validation {
                message: format!("min_score must be non-negative, got {}", params.min_score),
            });
        }
        if params.limit <= 0 {
            return Err(ScreenerError::Validation {
                message: format!("limit must be positive, got {}", params.limit),
            });
        }
        let preset = self.catalog.get(&params.filter_preset)?;
        let min_score = params.min_score as u64;

        let mut scored: Vec<ScoredArticle> = articles
            .iter()
            .filter_map(|article| {
                let keyword_score = RelevanceScorer::score(article, preset);
                if keyword_score.relevance_score < min_score {
                    return None;
                }
                let report = self.classifier.classify(article);
                if params
                    .sentiment
                    .is_some_and(|wanted| wanted != report.sentiment)
                {
                    return None;
                }
                Some(ScoredArticle {
                    id: article.id,
                    title: article.title.clone(),
                    content: article.content.clone(),
                    url: article.url.clone(),
                    published_at: article.published_at,
                    relevance_score: keyword_score.relevance_score,
                    matched_keywords: keyword_score.matched_keywords,
                    sentiment: report.sentiment,
                    positive_matches: report.positive_matches,
                    negative_matches: report.negative_matches,
                })
            })
            .collect();

        // Highest score first; ties go to the more recent article.
        scored.sort_by(|a, b| {
            b.relevance_score
                .cmp(&a.relevance_score)
                .then(b.published_at.cmp(&a.published_at))
        });
        scored.truncate(params.limit as usize);

        debug!(
            preset = %params.filter_preset,
            checked = articles.len(),
            returned = scored.len(),
            "ranked articles"
        );
        Ok(scored)
    }
}
