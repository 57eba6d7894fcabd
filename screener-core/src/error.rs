use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("Twitter API error: {0}")]
    PublishApi(#[from] PublishApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Filter preset not found: {key}")]
    PresetNotFound { key: String },

    #[error("Invalid parameters: {message}")]
    Validation { message: String },

    #[error("Composition exceeds tier limit: {required} characters needed, limit is {limit}")]
    Composition { required: usize, limit: usize },

    #[error("Article {article_id} has already been posted in this session")]
    DuplicatePost { article_id: i64 },

    #[error("A post for article {article_id} is already in flight")]
    PostInFlight { article_id: i64 },

    #[error("Invalid publish transition for article {article_id}: {reason}")]
    InvalidTransition { article_id: i64, reason: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

#[derive(Error, Debug, Clone)]
pub enum PublishApiError {
    #[error("Twitter API not configured")]
    NotConfigured,

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Rate limit exceeded. Retry after {retry_after} seconds")]
    RateLimitExceeded { retry_after: u64 },

    #[error("Tweet rejected with status {status_code}: {details}")]
    Rejected { status_code: u16, details: String },

    #[error("Invalid API response: {details}")]
    InvalidResponse { details: String },

    #[error("Request timeout")]
    RequestTimeout,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid configuration format: {details}")]
    InvalidFormat { details: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Environment variable not set: {var_name}")]
    MissingEnvironmentVariable { var_name: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
