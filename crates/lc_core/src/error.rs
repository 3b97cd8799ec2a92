use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider refused the request because of a rate limit. Callers may retry after a pause.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Keyword error: {0}")]
    Keywords(String),

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_is_structural() {
        assert!(Error::RateLimited("slow down".to_string()).is_rate_limited());

        // A message that merely mentions the limit is not a rate limit.
        let api = Error::Api {
            status: 500,
            message: "rate_limit exceeded upstream".to_string(),
        };
        assert!(!api.is_rate_limited());
        assert!(!Error::Inference("rate_limit".to_string()).is_rate_limited());
    }

    #[test]
    fn test_error_messages() {
        let err = Error::Api { status: 401, message: "invalid x-api-key".to_string() };
        assert_eq!(err.to_string(), "API error 401: invalid x-api-key");
        assert_eq!(Error::Pipeline("boom".to_string()).to_string(), "Pipeline error: boom");
    }
}
