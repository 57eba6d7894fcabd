pub mod presets;
pub mod ranker;
pub mod relevance;
pub mod sentiment;

pub use presets::{PresetCatalog, PresetSummary};
pub use ranker::{ArticleRanker, RankParams};
pub use relevance::{KeywordScore, RelevanceScorer};
pub use sentiment::{SentimentClassifier, SentimentReport};
