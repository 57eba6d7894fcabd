use screener_core::{Article, FilterPreset};
use std::collections::HashSet;

/// Relevance of one article for one preset: the weighted occurrence score
/// and the matched terms in the order they first appear in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordScore {
    pub relevance_score: u64,
    pub matched_keywords: Vec<String>,
}

pub struct RelevanceScorer;

impl RelevanceScorer {
    /// Count case-insensitive substring occurrences of each preset keyword
    /// in title + content and sum `occurrences x weight`. Substring (not
    /// word-boundary) matching tolerates compound mentions. Empty content
    /// or an empty keyword list scores 0; that is not an error.
    pub fn score(article: &Article, preset: &FilterPreset) -> KeywordScore {
        let text = search_text(article);

        let mut seen: HashSet<String> = HashSet::new();
        let mut matches: Vec<(usize, String)> = Vec::new();
        let mut relevance_score: u64 = 0;

        for keyword in &preset.keywords {
            let term = keyword.term.to_lowercase();
            if term.is_empty() || !seen.insert(term.clone()) {
                continue;
            }
            let occurrences = text.matches(&term).count() as u64;
            if occurrences == 0 {
                continue;
            }
            relevance_score += occurrences * u64::from(keyword.weight);
            let first_pos = text.find(&term).unwrap_or(usize::MAX);
            matches.push((first_pos, keyword.term.clone()));
        }

        // First-occurrence order in the search text, not preset order.
        matches.sort_by_key(|(pos, _)| *pos);

        KeywordScore {
            relevance_score,
            matched_keywords: matches.into_iter().map(|(_, term)| term).collect(),
        }
    }
}

/// Title and content form one lowercased search text for both relevance
/// and sentiment matching.
pub(crate) fn search_text(article: &Article) -> String {
    format!("{} {}", article.title, article.content).to_lowercase()
}
