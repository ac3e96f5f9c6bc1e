use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthorityError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authority unavailable: {0}")]
    Unavailable(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<config::ConfigError> for AuthorityError {
    fn from(err: config::ConfigError) -> Self {
        AuthorityError::Configuration(err.to_string())
    }
}
