use thiserror::Error;

#[derive(Error, Debug)]
pub enum LegalEaseError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error(transparent)]
    Common(#[from] legalease_common::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<legalease_common::TransportError> for LegalEaseError {
    fn from(error: legalease_common::TransportError) -> Self {
        LegalEaseError::Common(error.into())
    }
}

pub type Result<T> = std::result::Result<T, LegalEaseError>;
