use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),
}
