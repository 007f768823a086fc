use thiserror::Error;

#[derive(Error, Debug)]
pub enum MagpieError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("curl error: {0}")]
    Curl(#[from] curl::Error),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("search provider error: {0}")]
    SearchProvider(String),

    #[error("verification failed: {0}")]
    Verification(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("task error: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, MagpieError>;
