use screener_core::{Article, ArticleSummary, ScreenerError, TweetPreview};

/// Hard ceiling for free-tier accounts.
pub const MAX_TWEET_LEN: usize = 280;
/// Hard ceiling for premium (long-form) accounts.
pub const MAX_PREMIUM_TWEET_LEN: usize = 4000;

/// Upper end of the free-tier auto-body target before hashtags and link.
const FREE_BODY_TARGET: usize = 250;
const HASHTAGS: &str = "#Haryana #HaryanaNews";
const SEPARATOR: &str = "\n\n";
const ELLIPSIS: char = '…';

/// Builds tier-budgeted tweet text from an article. Pure and
/// deterministic; every call is independent of any previous one.
pub struct TweetComposer;

impl TweetComposer {
    /// Segments are appended in fixed priority: body, hashtags, link.
    /// Only the body is ever trimmed; hashtags and the URL appear
    /// verbatim or composition fails.
    pub fn compose(
        article: &Article,
        custom_message: Option<&str>,
        include_hashtags: bool,
        use_premium: bool,
    ) -> Result<TweetPreview, ScreenerError> {
        let url = article.url.trim();
        if url.is_empty() {
            return Err(ScreenerError::Validation {
                message: "article has no URL to link".to_string(),
            });
        }

        let limit = if use_premium {
            MAX_PREMIUM_TWEET_LEN
        } else {
            MAX_TWEET_LEN
        };
        let sep_len = SEPARATOR.chars().count();
        let url_len = url.chars().count();
        let hashtags = include_hashtags.then_some(HASHTAGS);
        let tail_len = match hashtags {
            Some(tags) => tags.chars().count() + sep_len + url_len,
            None => url_len,
        };
        if tail_len > limit {
            return Err(ScreenerError::Composition {
                required: tail_len,
                limit,
            });
        }

        let mut body = match custom_message {
            Some(message) => message.to_string(),
            None if use_premium => {
                let excerpt = article.content.trim();
                if excerpt.is_empty() {
                    article.title.clone()
                } else {
                    format!("{}{}{}", article.title, SEPARATOR, excerpt)
                }
            }
            None => clamp_to(&article.title, FREE_BODY_TARGET),
        };
        if body.trim().is_empty() {
            body.clear();
        }

        if !body.is_empty() {
            let available = limit.saturating_sub(tail_len + sep_len);
            if available == 0 {
                // Not even one body character fits next to the
                // mandatory segments.
                return Err(ScreenerError::Composition {
                    required: tail_len + sep_len + 1,
                    limit,
                });
            }
            if body.chars().count() > available {
                body = clamp_to(&body, available);
            }
        }

        let mut segments: Vec<&str> = Vec::new();
        if !body.is_empty() {
            segments.push(&body);
        }
        if let Some(tags) = hashtags {
            segments.push(tags);
        }
        segments.push(url);

        let tweet_text = segments.join(SEPARATOR);
        let character_count = tweet_text.chars().count();
        debug_assert!(character_count <= limit);

        Ok(TweetPreview {
            tweet_text,
            character_count,
            article: ArticleSummary::from(article),
        })
    }
}

/// Truncate to at most `max_chars` characters at the last whole-word
/// boundary, appending an ellipsis. Text already within the budget is
/// returned unchanged; a hard cut is the fallback when no boundary
/// exists in range.
fn clamp_to(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let prefix: String = text.chars().take(max_chars - 1).collect();
    let cut = match prefix.rfind(char::is_whitespace) {
        Some(pos) if pos > 0 => prefix[..pos].trim_end().to_string(),
        _ => prefix,
    };
    format!("{cut}{ELLIPSIS}")
}
