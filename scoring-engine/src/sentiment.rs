use crate::presets::PresetCatalog;
use crate::relevance::search_text;
use screener_core::{Article, Sentiment};

/// Sentiment of one article with the indicator terms that support it,
/// each listed once in first-occurrence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentReport {
    pub sentiment: Sentiment,
    pub positive_matches: Vec<String>,
    pub negative_matches: Vec<String>,
}

/// Classifies articles against the global indicator lexicon, independent
/// of any preset.
#[derive(Debug, Clone)]
pub struct SentimentClassifier {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl SentimentClassifier {
    pub fn new(positive: Vec<String>, negative: Vec<String>) -> Self {
        Self { positive, negative }
    }

    pub fn from_catalog(catalog: &PresetCatalog) -> Self {
        let (positive, negative) = catalog.sentiment_lexicon();
        Self::new(positive.to_vec(), negative.to_vec())
    }

    /// The label is decided by the number of *distinct* matched terms on
    /// each side, not raw occurrence counts. Equal counts, including
    /// zero/zero, are neutral.
    pub fn classify(&self, article: &Article) -> SentimentReport {
        let text = search_text(article);
        let positive_matches = match_terms(&text, &self.positive);
        let negative_matches = match_terms(&text, &self.negative);

        let sentiment = match positive_matches.len().cmp(&negative_matches.len()) {
            std::cmp::Ordering::Greater => Sentiment::Positive,
            std::cmp::Ordering::Less => Sentiment::Negative,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        };

        SentimentReport {
            sentiment,
            positive_matches,
            negative_matches,
        }
    }
}

fn match_terms(text: &str, terms: &[String]) -> Vec<String> {
    let mut matches: Vec<(usize, String)> = Vec::new();
    for term in terms {
        let needle = term.to_lowercase();
        if needle.is_empty() {
            continue;
        }
        if let Some(pos) = text.find(&needle) {
            if !matches.iter().any(|(_, seen)| seen == term) {
                matches.push((pos, term.clone()));
            }
        }
    }
    matches.sort_by_key(|(pos, _)| *pos);
    matches.into_iter().map(|(_, term)| term).collect()
}
