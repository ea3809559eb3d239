use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlignyxError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network capabilities capped: {0}")]
    Security(String),

    #[error("Structure search error: {0}")]
    Search(String),

    #[error("Alignment engine error: {0}")]
    Engine(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AlignyxError>;
