use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("NewsAPI responded with status {0}")]
    Status(u16),

    #[error("NewsAPI error: {0}")]
    Upstream(String),

    #[error("No articles found in NewsAPI response")]
    NoArticles,

    #[error("{0}")]
    NoQualifyingArticle(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_upstream_wording() {
        assert_eq!(Error::Status(429).to_string(), "NewsAPI responded with status 429");
        assert_eq!(
            Error::Upstream("apiKeyInvalid".to_string()).to_string(),
            "NewsAPI error: apiKeyInvalid"
        );
        assert_eq!(Error::NoArticles.to_string(), "No articles found in NewsAPI response");
    }
}
