use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GitHub API error ({status}): {body}")]
    Request {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to load page: {0}")]
    Navigation(String),

    #[error("Audit failed for {url}: {reason}")]
    Audit { url: String, reason: String },

    #[error("Required tool not found: {0}")]
    ToolNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for failures of the remote call itself: a non-2xx response or a
    /// transport error.
    pub fn is_request_error(&self) -> bool {
        matches!(self, Error::Request { .. } | Error::Network(_))
    }

    pub fn audit(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Audit {
            url: url.into(),
            reason: reason.into(),
        }
    }
}
