use thiserror::Error;

/// Errors raised while translating text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslatorError {
    /// Missing or invalid startup configuration. Fatal; never raised per request.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Network failure, timeout, non-success status or malformed payload.
    #[error("Provider error: {0}")]
    Provider(String),
}

impl From<reqwest::Error> for TranslatorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TranslatorError::Provider(format!("request timed out: {}", err))
        } else if err.is_decode() {
            TranslatorError::Provider(format!("malformed response: {}", err))
        } else {
            TranslatorError::Provider(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, TranslatorError>;
