use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    /// A 200 response that lacks a field the caller depends on.
    #[error("Response error: missing field `{0}` in generation response")]
    MissingField(&'static str),
}

pub type Result<T> = std::result::Result<T, GenerateError>;
