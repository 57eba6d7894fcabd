use publisher::PublishOrchestrator;
use scoring_engine::{ArticleRanker, PresetCatalog, RankParams};
use screener_core::{AppConfig, Article, ScreenerError};
use std::sync::Arc;
use twitter_client::TwitterClient;

#[tokio::main]
async fn main() -> Result<(), ScreenerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            "news_screener=debug,scoring_engine=debug,publisher=debug,twitter_client=debug",
        )
        .init();

    tracing::info!("Starting News Screener");

    let config = AppConfig::from_env();
    let catalog = Arc::new(PresetCatalog::builtin());
    let ranker = ArticleRanker::new(catalog.clone());
    let orchestrator = PublishOrchestrator::new(Arc::new(TwitterClient::new(&config)));

    let mut args = std::env::args().skip(1);
    let articles_path = args.next().unwrap_or_else(|| "articles.json".to_string());
    let preset_key = args.next().unwrap_or_else(|| "tourism".to_string());

    let status = orchestrator.publish_status().await;
    tracing::info!("Publish status: {}", status.message);

    println!("Available presets:");
    for (key, summary) in catalog.summaries() {
        println!(
            "  {key}: {} ({} keywords)",
            summary.name, summary.keyword_count
        );
    }

    let raw = std::fs::read_to_string(&articles_path)?;
    let articles: Vec<Article> = serde_json::from_str(&raw)?;
    tracing::info!("Loaded {} articles from {}", articles.len(), articles_path);

    let scored = ranker.rank(&articles, &RankParams::for_preset(preset_key.as_str()))?;
    println!("\nTop articles for preset '{preset_key}':");
    for article in &scored {
        println!(
            "  [{:>4}] {} ({}) matched: {}",
            article.relevance_score,
            article.title,
            article.sentiment,
            article.matched_keywords.join(", ")
        );
    }

    Ok(())
}
