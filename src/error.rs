use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Repository not found or inaccessible")]
    RepositoryNotFound,

    #[error("Could not analyze enough repositories for comparison")]
    InsufficientComparison,

    #[error("invalid repository target: {0}")]
    InvalidTarget(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Transport-level failures seen by the GitHub client. These never leave the
/// provider boundary; they are logged and degraded to empty results.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
