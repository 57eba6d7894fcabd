pub mod composer;
pub mod orchestrator;
pub mod session;

pub use composer::{TweetComposer, MAX_PREMIUM_TWEET_LEN, MAX_TWEET_LEN};
pub use orchestrator::PublishOrchestrator;
pub use session::{PublishSession, SessionState};

#[cfg(test)]
mod tests;
